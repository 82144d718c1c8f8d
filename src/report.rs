//! Per-(layers, cuts) optima over a precomputed RSD table.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::key::StorageKey;
use crate::search::RsdTable;
use crate::stats::{Evenness, Summary};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// The most even configuration found for one `(numLayers, numCuts)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimum {
    pub num_layers: usize,
    pub num_cuts: usize,
    pub storage_key: String,
    pub rsd: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Ordered by layers, then cuts.
    pub optima: Vec<Optimum>,
    /// Spread of every RSD in the table; `None` for an empty table.
    pub summary: Option<Summary>,
}

impl Report {
    /// Groups the table by parsed `(numLayers, numCuts)` and keeps each group's
    /// minimum. Ties go to the lexicographically smallest key.
    pub fn from_table(table: &RsdTable) -> Result<Self, ValidationError> {
        let mut best: BTreeMap<(usize, usize), (&str, Real)> = BTreeMap::new();
        let mut values = Vec::with_capacity(table.len());

        for (key, &rsd) in table {
            let parsed = StorageKey::parse(key)?;
            if !rsd.is_finite() {
                warn!(key = %key, rsd, "skipping non-finite RSD");
                continue;
            }
            values.push(rsd);

            best.entry(parsed.group())
                .and_modify(|current| {
                    if rsd < current.1 {
                        *current = (key.as_str(), rsd);
                    }
                })
                .or_insert((key.as_str(), rsd));
        }

        let optima = best
            .into_iter()
            .map(|((num_layers, num_cuts), (key, rsd))| Optimum {
                num_layers,
                num_cuts,
                storage_key: key.to_string(),
                rsd,
            })
            .collect();

        let summary = Summary::from_values(&values);
        if summary.is_none() {
            warn!("RSD table is empty; no summary");
        }

        Ok(Self { optima, summary })
    }

    /// The optimum for one pair, if the table covered it.
    pub fn optimum(&self, num_layers: usize, num_cuts: usize) -> Option<&Optimum> {
        self.optima
            .iter()
            .find(|optimum| optimum.num_layers == num_layers && optimum.num_cuts == num_cuts)
    }

    /// Evenness bucket of `rsd` against the table's quartiles.
    pub fn classify(&self, rsd: Real) -> Option<Evenness> {
        self.summary.map(|summary| summary.classify(rsd))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for optimum in &self.optima {
            writeln!(
                f,
                "{:>2} layers, {:>2} cuts: {:<16} {:.3}",
                optimum.num_layers, optimum.num_cuts, optimum.storage_key, optimum.rsd
            )?;
        }
        if let Some(Summary { min, q1, median, q3, max }) = self.summary {
            writeln!(
                f,
                "min {min:.3} · Q1 {q1:.3} · median {median:.3} · Q3 {q3:.3} · max {max:.3}"
            )?;
        }
        Ok(())
    }
}
