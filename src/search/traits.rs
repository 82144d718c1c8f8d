//! Traits for configuration-space search.

use super::space::{RsdTable, SearchSpace};
use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::onion::OnionConfiguration;

/// Trait for evaluating every configuration of a [`SearchSpace`].
pub trait SearchOps {
    /// Scores every configuration in `space`, keyed by storage key.
    fn evaluate(&self, space: &SearchSpace) -> Result<RsdTable, ValidationError>;

    /// Scores one configuration with the space's rounding.
    fn score(&self, onion: &OnionConfiguration, space: &SearchSpace) -> (String, Real) {
        (
            onion.storage_key(),
            onion.relative_standard_deviation(space.decimals),
        )
    }
}
