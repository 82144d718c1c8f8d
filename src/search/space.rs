//! The enumerated configuration space and the table it produces.

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::onion::{MAX_HORIZONTAL_CUTS, OnionConfiguration};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_LAYERS: usize = 7;
pub const MAX_LAYERS: usize = 13;
pub const MIN_CUTS: usize = 1;
pub const MAX_CUTS: usize = 10;
pub const MIN_HORIZONTAL_CUTS: usize = 0;
/// Arbitrary but fixed: the 80% of a 300px-high canvas the tables were first drawn at.
pub const DEFAULT_RADIUS: Real = 240.0;

/// Storage key → RSD, ordered by key.
pub type RsdTable = BTreeMap<String, Real>;

/// Bounds of the exhaustive search. All ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSpace {
    pub radius: Real,
    pub min_layers: usize,
    pub max_layers: usize,
    pub min_cuts: usize,
    pub max_cuts: usize,
    pub min_horizontal_cuts: usize,
    pub max_horizontal_cuts: usize,
    /// Radial depths are `0/steps, 1/steps, …, steps/steps` of the radius.
    pub depth_steps: u32,
    /// Decimal places the stored RSD values are rounded to.
    pub decimals: u32,
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            min_layers: MIN_LAYERS,
            max_layers: MAX_LAYERS,
            min_cuts: MIN_CUTS,
            max_cuts: MAX_CUTS,
            min_horizontal_cuts: MIN_HORIZONTAL_CUTS,
            max_horizontal_cuts: MAX_HORIZONTAL_CUTS,
            depth_steps: 100,
            decimals: 3,
        }
    }
}

impl SearchSpace {
    /// Every configuration in deterministic order: layers, then cuts, then
    /// horizontal cuts; within those, the vertical configuration followed by the
    /// radial ones by increasing depth.
    ///
    /// A single radial cut is the same at every depth, so it is only tried at 0.
    pub fn configurations(&self) -> Result<Vec<OnionConfiguration>, ValidationError> {
        let mut configurations = Vec::with_capacity(self.len());
        let steps = self.depth_steps.max(1);

        for num_layers in self.min_layers..=self.max_layers {
            for num_cuts in self.min_cuts..=self.max_cuts {
                for num_horizontal_cuts in self.min_horizontal_cuts..=self.max_horizontal_cuts {
                    configurations.push(OnionConfiguration::vertical(
                        self.radius,
                        num_layers,
                        num_cuts,
                        num_horizontal_cuts,
                    )?);

                    let max_depth = if num_cuts > 1 { self.depth_steps } else { 0 };
                    for depth in 0..=max_depth {
                        configurations.push(OnionConfiguration::radial(
                            self.radius,
                            num_layers,
                            num_cuts,
                            depth as Real / steps as Real,
                            num_horizontal_cuts,
                        )?);
                    }
                }
            }
        }

        Ok(configurations)
    }

    /// Number of configurations [`Self::configurations`] yields.
    pub fn len(&self) -> usize {
        let layers = (self.min_layers..=self.max_layers).count();
        let horizontals = (self.min_horizontal_cuts..=self.max_horizontal_cuts).count();
        let per_cut: usize = (self.min_cuts..=self.max_cuts)
            .map(|num_cuts| {
                let radial = if num_cuts > 1 { self.depth_steps as usize + 1 } else { 1 };
                1 + radial
            })
            .sum();
        layers * horizontals * per_cut
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onion::CutType;

    #[test]
    fn default_space_size() {
        let space = SearchSpace::default();
        // 7 layer counts × 3 horizontal counts × (cuts = 1: 2, cuts 2..=10: 1 + 101 each)
        assert_eq!(space.len(), 7 * 3 * (2 + 9 * 102));
        assert_eq!(space.configurations().expect("valid").len(), space.len());
    }

    #[test]
    fn single_cut_only_tries_zero_depth() {
        let space = SearchSpace {
            min_layers: 7,
            max_layers: 7,
            min_cuts: 1,
            max_cuts: 1,
            min_horizontal_cuts: 0,
            max_horizontal_cuts: 0,
            ..SearchSpace::default()
        };
        let keys: Vec<String> = space
            .configurations()
            .expect("valid")
            .iter()
            .map(OnionConfiguration::storage_key)
            .collect();
        assert_eq!(keys, vec!["7l:1c:v:0h", "7l:1c:r:0d:0h"]);
    }

    #[test]
    fn depth_steps_span_zero_to_one() {
        let space = SearchSpace {
            min_layers: 8,
            max_layers: 8,
            min_cuts: 3,
            max_cuts: 3,
            min_horizontal_cuts: 1,
            max_horizontal_cuts: 1,
            depth_steps: 4,
            ..SearchSpace::default()
        };
        let radial: Vec<Real> = space
            .configurations()
            .expect("valid")
            .iter()
            .filter(|onion| onion.cut_type() == CutType::Radial)
            .map(OnionConfiguration::cut_target_depth_percentage)
            .collect();
        assert_eq!(radial, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn invalid_space_is_rejected() {
        let space = SearchSpace {
            radius: -1.0,
            ..SearchSpace::default()
        };
        assert_eq!(space.configurations(), Err(ValidationError::NonPositiveRadius(-1.0)));
    }

    #[test]
    fn deserializes_with_defaults() {
        let space: SearchSpace = serde_json::from_str(r#"{ "max_layers": 8, "depth_steps": 10 }"#).expect("valid json");
        assert_eq!(space.max_layers, 8);
        assert_eq!(space.depth_steps, 10);
        assert_eq!(space.min_layers, MIN_LAYERS);
        assert_eq!(space.radius, DEFAULT_RADIUS);
    }
}
