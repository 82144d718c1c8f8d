//! Canonical storage keys.
//!
//! `<numLayers>l:<numCuts>c:<v|r>[:<depthPercent>d]:<numHorizontalCuts>h`, e.g.
//! `10l:3c:r:25d:2h` or `7l:1c:v:0h`. The depth segment only appears for radial
//! cuts and is a whole percentage.

use crate::errors::ValidationError;
use crate::onion::CutType;
use core::fmt;
use core::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey {
    pub num_layers: usize,
    pub num_cuts: usize,
    pub cut_type: CutType,
    /// Present exactly when `cut_type` is radial.
    pub depth_percent: Option<u32>,
    pub num_horizontal_cuts: usize,
}

impl StorageKey {
    /// The `(numLayers, numCuts)` group this key is reported under.
    pub const fn group(&self) -> (usize, usize) {
        (self.num_layers, self.num_cuts)
    }

    pub fn parse(key: &str) -> Result<Self, ValidationError> {
        key.parse()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}l:{}c:{}", self.num_layers, self.num_cuts, self.cut_type.code())?;
        if let Some(depth) = self.depth_percent {
            write!(f, ":{depth}d")?;
        }
        write!(f, ":{}h", self.num_horizontal_cuts)
    }
}

fn parse_segment<T: FromStr>(key: &str, segment: Option<&str>, suffix: char) -> Result<T, ValidationError> {
    let segment = segment.ok_or_else(|| ValidationError::malformed_key(key, format!("missing `{suffix}` segment")))?;
    segment
        .strip_suffix(suffix)
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ValidationError::malformed_key(key, format!("bad `{suffix}` segment {segment:?}")))
}

impl FromStr for StorageKey {
    type Err = ValidationError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let mut segments = key.split(':');

        let num_layers = parse_segment(key, segments.next(), 'l')?;
        let num_cuts = parse_segment(key, segments.next(), 'c')?;
        let cut_type = match segments.next() {
            Some("v") => CutType::Vertical,
            Some("r") => CutType::Radial,
            Some(other) => return Err(ValidationError::malformed_key(key, format!("unknown cut type {other:?}"))),
            None => return Err(ValidationError::malformed_key(key, "missing cut type")),
        };
        let depth_percent = match cut_type {
            CutType::Radial => Some(parse_segment(key, segments.next(), 'd')?),
            CutType::Vertical => None,
        };
        let num_horizontal_cuts = parse_segment(key, segments.next(), 'h')?;

        if segments.next().is_some() {
            return Err(ValidationError::malformed_key(key, "trailing segments"));
        }

        Ok(Self {
            num_layers,
            num_cuts,
            cut_type,
            depth_percent,
            num_horizontal_cuts,
        })
    }
}
