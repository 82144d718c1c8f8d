//! Parallel implementation of the configuration search.

use super::space::{RsdTable, SearchSpace};
use super::traits::SearchOps;
use crate::errors::ValidationError;
use rayon::prelude::*;
use tracing::info;

/// Parallel implementation of `SearchOps`.
///
/// Each configuration writes a distinct key, so workers never coordinate; the
/// per-thread results are merged into one ordered table at the end.
pub struct ParallelSearch;

impl Default for ParallelSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelSearch {
    pub const fn new() -> Self {
        Self
    }
}

impl SearchOps for ParallelSearch {
    fn evaluate(&self, space: &SearchSpace) -> Result<RsdTable, ValidationError> {
        let configurations = space.configurations()?;
        info!(
            configurations = configurations.len(),
            threads = rayon::current_num_threads(),
            "evaluating in parallel"
        );

        let table: RsdTable = configurations
            .par_iter()
            .map(|onion| self.score(onion, space))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        info!(entries = table.len(), "search complete");
        Ok(table)
    }
}
