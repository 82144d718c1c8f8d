//! Validation errors

use crate::float_types::Real;

/// All the possible configuration issues we might encounter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (NonPositiveRadius) The disk radius must be strictly positive
    #[error("(NonPositiveRadius) The radius must be greater than 0, got {0}")]
    NonPositiveRadius(Real),
    /// (NonFiniteRadius) The disk radius is NaN or infinite
    #[error("(NonFiniteRadius) The radius ({0}) is NaN or infinite")]
    NonFiniteRadius(Real),
    /// (ZeroLayers) At least one layer is required
    #[error("(ZeroLayers) The number of layers must be at least 1")]
    ZeroLayers,
    /// (ZeroCuts) At least one cut is required
    #[error("(ZeroCuts) The number of cuts must be at least 1")]
    ZeroCuts,
    /// (DepthOutOfRange) The cut target depth percentage is outside [0, 1]
    #[error("(DepthOutOfRange) The cut target depth percentage must be within [0, 1], got {0}")]
    DepthOutOfRange(Real),
    /// (TooManyHorizontalCuts) More horizontal lines than a piece can be split by
    #[error("(TooManyHorizontalCuts) At most {max} horizontal cuts are supported, got {got}")]
    TooManyHorizontalCuts { got: usize, max: usize },
    /// (UnknownCutType) A cut type name other than "vertical" or "radial"
    #[error("(UnknownCutType) Expected \"vertical\" or \"radial\", got {0:?}")]
    UnknownCutType(String),
    /// (MalformedStorageKey) A storage key that does not follow `<l>l:<c>c:<v|r>[:<d>d]:<h>h`
    #[error("(MalformedStorageKey) {reason} in {key:?}")]
    MalformedStorageKey { key: String, reason: String },
}

impl ValidationError {
    pub(crate) fn malformed_key(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedStorageKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
