//! Onion configurations and their derived scales.

use crate::errors::ValidationError;
use crate::float_types::{FRAC_PI_2, Real};
use crate::key::StorageKey;
use crate::partition::{HorizontalCuts, LeafAreas, Partition, RadialPartition, VerticalPartition};
use crate::scale::LinearScale;
use crate::stats;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Most horizontal lines any piece can be split by.
pub const MAX_HORIZONTAL_CUTS: usize = 2;

/// How the layers are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutType {
    /// Parallel vertical chords at evenly spaced x offsets.
    #[default]
    Vertical,
    /// Lines fanning out from an apex on the y-axis at evenly spaced angles.
    Radial,
}

impl CutType {
    /// Single-letter code used in storage keys.
    pub const fn code(&self) -> char {
        match self {
            CutType::Vertical => 'v',
            CutType::Radial => 'r',
        }
    }
}

impl fmt::Display for CutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CutType::Vertical => "vertical",
            CutType::Radial => "radial",
        })
    }
}

impl FromStr for CutType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" | "v" => Ok(CutType::Vertical),
            "radial" | "r" => Ok(CutType::Radial),
            other => Err(ValidationError::UnknownCutType(other.to_string())),
        }
    }
}

/// An immutable, validated description of how one onion is cut.
///
/// Everything else (layer radii, cut positions, the storage key, the partition
/// and its evenness) is derived on demand; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OnionConfiguration {
    radius: Real,
    num_layers: usize,
    num_cuts: usize,
    cut_type: CutType,
    cut_target_depth_percentage: Real,
    num_horizontal_cuts: usize,
}

/// Leaf areas and evenness of one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub storage_key: String,
    pub piece_areas: Vec<Real>,
    pub mean: Real,
    pub standard_deviation: Real,
    /// Relative standard deviation in percent, rounded as requested.
    pub rsd: Real,
}

impl Default for OnionConfiguration {
    fn default() -> Self {
        Self {
            radius: 240.0,
            num_layers: 10,
            num_cuts: 3,
            cut_type: CutType::Vertical,
            cut_target_depth_percentage: 0.0,
            num_horizontal_cuts: 2,
        }
    }
}

impl OnionConfiguration {
    /// Validates and builds a configuration.
    ///
    /// The depth percentage only matters for radial cuts; vertical cuts ignore it
    /// and store 0.
    pub fn new(
        radius: Real,
        num_layers: usize,
        num_cuts: usize,
        cut_type: CutType,
        cut_target_depth_percentage: Real,
        num_horizontal_cuts: usize,
    ) -> Result<Self, ValidationError> {
        if !radius.is_finite() {
            return Err(ValidationError::NonFiniteRadius(radius));
        }
        if radius <= 0.0 {
            return Err(ValidationError::NonPositiveRadius(radius));
        }
        if num_layers == 0 {
            return Err(ValidationError::ZeroLayers);
        }
        if num_cuts == 0 {
            return Err(ValidationError::ZeroCuts);
        }
        if num_horizontal_cuts > MAX_HORIZONTAL_CUTS {
            return Err(ValidationError::TooManyHorizontalCuts {
                got: num_horizontal_cuts,
                max: MAX_HORIZONTAL_CUTS,
            });
        }
        let cut_target_depth_percentage = match cut_type {
            CutType::Vertical => 0.0,
            CutType::Radial if (0.0..=1.0).contains(&cut_target_depth_percentage) => {
                cut_target_depth_percentage
            },
            CutType::Radial => {
                return Err(ValidationError::DepthOutOfRange(cut_target_depth_percentage));
            },
        };

        Ok(Self {
            radius,
            num_layers,
            num_cuts,
            cut_type,
            cut_target_depth_percentage,
            num_horizontal_cuts,
        })
    }

    /// Vertical cuts, no apex.
    pub fn vertical(
        radius: Real,
        num_layers: usize,
        num_cuts: usize,
        num_horizontal_cuts: usize,
    ) -> Result<Self, ValidationError> {
        Self::new(radius, num_layers, num_cuts, CutType::Vertical, 0.0, num_horizontal_cuts)
    }

    /// Radial cuts aimed from `cut_target_depth_percentage × radius` below the centre.
    pub fn radial(
        radius: Real,
        num_layers: usize,
        num_cuts: usize,
        cut_target_depth_percentage: Real,
        num_horizontal_cuts: usize,
    ) -> Result<Self, ValidationError> {
        Self::new(
            radius,
            num_layers,
            num_cuts,
            CutType::Radial,
            cut_target_depth_percentage,
            num_horizontal_cuts,
        )
    }

    pub const fn radius(&self) -> Real {
        self.radius
    }

    pub const fn num_layers(&self) -> usize {
        self.num_layers
    }

    pub const fn num_cuts(&self) -> usize {
        self.num_cuts
    }

    pub const fn cut_type(&self) -> CutType {
        self.cut_type
    }

    pub const fn cut_target_depth_percentage(&self) -> Real {
        self.cut_target_depth_percentage
    }

    pub const fn num_horizontal_cuts(&self) -> usize {
        self.num_horizontal_cuts
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Derived scales
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Layer index → radius, `[0, numLayers] → [0, radius]`.
    pub fn layer_scale(&self) -> LinearScale {
        LinearScale::new([0.0, self.num_layers as Real], [0.0, self.radius])
    }

    /// Outer radius of every layer, innermost first; the last equals `radius`.
    pub fn layer_radii(&self) -> Vec<Real> {
        let scale = self.layer_scale();
        (1..=self.num_layers).map(|i| scale.at(i)).collect()
    }

    pub fn layer_thickness(&self) -> Real {
        self.layer_scale().at(1)
    }

    /// Cut index → x offset, `[0, numCuts] → [0, radius]`.
    pub fn cut_width_scale(&self) -> LinearScale {
        LinearScale::new([0.0, self.num_cuts as Real], [0.0, self.radius])
    }

    /// `numCuts + 1` column boundaries from 0 to `radius`.
    pub fn cut_boundaries(&self) -> Vec<Real> {
        let scale = self.cut_width_scale();
        (0..=self.num_cuts).map(|i| scale.at(i)).collect()
    }

    pub fn cut_thickness(&self) -> Real {
        self.cut_width_scale().at(1)
    }

    /// Cut index → angle from the x-axis, `[0, numCuts] → [π/2, 0]`.
    pub fn cut_angle_scale(&self) -> LinearScale {
        LinearScale::new([0.0, self.num_cuts as Real], [FRAC_PI_2, 0.0])
    }

    /// One angle per cut, starting with the vertical cut at π/2.
    pub fn cut_angles(&self) -> Vec<Real> {
        let scale = self.cut_angle_scale();
        (0..self.num_cuts).map(|i| scale.at(i)).collect()
    }

    /// Distance of the radial apex below the centre.
    pub fn cut_target_depth(&self) -> Real {
        self.radius * self.cut_target_depth_percentage
    }

    /// Line index → height as a fraction of radius,
    /// `[0, numHorizontalCuts] → [1 / (numHorizontalCuts + 1), 1]`.
    pub fn horizontal_cut_scale(&self) -> LinearScale {
        let n = self.num_horizontal_cuts as Real;
        LinearScale::new([0.0, n], [1.0 / (n + 1.0), 1.0])
    }

    /// Horizontal line heights as fractions of radius, lowest first.
    pub fn horizontal_cut_heights(&self) -> Vec<Real> {
        let scale = self.horizontal_cut_scale();
        (0..self.num_horizontal_cuts).map(|i| scale.at(i)).collect()
    }

    /// Absolute horizontal line heights, highest first (the order pieces are split in).
    pub fn horizontal_cut_ys(&self) -> Vec<Real> {
        self.horizontal_cut_heights()
            .into_iter()
            .rev()
            .map(|height| height * self.radius)
            .collect()
    }

    /// [`Self::horizontal_cut_ys`] in the form the builders take.
    pub fn horizontal_cuts(&self) -> HorizontalCuts {
        HorizontalCuts::from_validated(self.horizontal_cut_ys())
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Keys and evaluation
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    pub fn key(&self) -> StorageKey {
        StorageKey {
            num_layers: self.num_layers,
            num_cuts: self.num_cuts,
            cut_type: self.cut_type,
            depth_percent: match self.cut_type {
                CutType::Radial => Some((self.cut_target_depth_percentage * 100.0).round() as u32),
                CutType::Vertical => None,
            },
            num_horizontal_cuts: self.num_horizontal_cuts,
        }
    }

    /// Canonical string used to look this configuration up in precomputed tables.
    pub fn storage_key(&self) -> String {
        self.key().to_string()
    }

    /// Runs the builder matching [`CutType`].
    pub fn partition(&self) -> Partition {
        let layer_radii = self.layer_radii();
        let horizontal_cuts = self.horizontal_cuts();

        match self.cut_type {
            CutType::Vertical => Partition::Vertical(VerticalPartition::build(
                &layer_radii,
                &self.cut_boundaries(),
                &horizontal_cuts,
            )),
            CutType::Radial => Partition::Radial(RadialPartition::build(
                self.radius,
                &layer_radii,
                &self.cut_angles(),
                self.cut_target_depth(),
                &horizontal_cuts,
            )),
        }
    }

    /// Builds the partition and scores it, rounding the RSD to `decimals` places.
    pub fn evaluate(&self, decimals: u32) -> Evaluation {
        let piece_areas = self.partition().leaf_areas();
        let mean = stats::mean(&piece_areas);
        let standard_deviation = stats::standard_deviation(&piece_areas);
        let rsd = stats::relative_standard_deviation(&piece_areas, decimals);
        let storage_key = self.storage_key();

        trace!(key = %storage_key, pieces = piece_areas.len(), rsd, "evaluated onion");

        Evaluation {
            storage_key,
            piece_areas,
            mean,
            standard_deviation,
            rsd,
        }
    }

    /// Evenness score alone.
    pub fn relative_standard_deviation(&self, decimals: u32) -> Real {
        stats::relative_standard_deviation(&self.partition().leaf_areas(), decimals)
    }
}
