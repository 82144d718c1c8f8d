//! Serial implementation of the configuration search.

use super::space::{RsdTable, SearchSpace};
use super::traits::SearchOps;
use crate::errors::ValidationError;
use tracing::info;

/// Serial implementation of `SearchOps`.
pub struct SerialSearch;

impl Default for SerialSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialSearch {
    pub const fn new() -> Self {
        Self
    }
}

impl SearchOps for SerialSearch {
    fn evaluate(&self, space: &SearchSpace) -> Result<RsdTable, ValidationError> {
        let configurations = space.configurations()?;
        let mut table = RsdTable::new();
        let mut current_layers = None;

        for onion in &configurations {
            if current_layers != Some(onion.num_layers()) {
                current_layers = Some(onion.num_layers());
                info!(num_layers = onion.num_layers(), "evaluating layer count");
            }
            let (key, rsd) = self.score(onion, space);
            table.insert(key, rsd);
        }

        info!(entries = table.len(), "search complete");
        Ok(table)
    }
}
