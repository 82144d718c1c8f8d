//! Exact piece areas and evenness scores for **onion cutting**: a disk split into
//! concentric layers, then cut by vertical chords or by lines fanning out from an
//! apex on the y-axis, optionally crossed by horizontal lines.
//!
//! Every piece area comes from closed-form integrals over one quadrant (the
//! configuration is symmetric about the y-axis), and a configuration's evenness
//! is the relative standard deviation (RSD) of its piece areas.
//!
//! # Example
//! ```
//! use onion::OnionConfiguration;
//!
//! let onion = OnionConfiguration::radial(240.0, 10, 3, 0.25, 2)?;
//! assert_eq!(onion.storage_key(), "10l:3c:r:25d:2h");
//! let rsd = onion.relative_standard_deviation(1);
//! assert!(rsd > 0.0);
//! # Ok::<(), onion::errors::ValidationError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **parallel**: use rayon to evaluate the configuration space across threads

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod geometry;
pub mod io;
pub mod key;
pub mod onion;
pub mod partition;
pub mod report;
pub mod scale;
pub mod search;
pub mod stats;

pub use errors::ValidationError;
pub use key::StorageKey;
pub use onion::{CutType, Evaluation, OnionConfiguration};
pub use partition::{HorizontalCuts, LeafAreas, Partition, SubPieces};
pub use report::Report;
pub use search::{RsdTable, SearchOps, SearchSpace};
