//! Exhaustive search over the configuration space.
//!
//! Every configuration is evaluated independently, so the search is a plain map
//! from configurations to (storage key, RSD) pairs. The serial and parallel
//! implementations produce identical tables.

pub mod serial;
pub mod space;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export core types
pub use space::{RsdTable, SearchSpace};
pub use traits::SearchOps;

pub use serial::SerialSearch;

#[cfg(feature = "parallel")]
pub use parallel::ParallelSearch;

/// The fastest available search for this build.
#[cfg(feature = "parallel")]
pub fn default_search() -> ParallelSearch {
    ParallelSearch::new()
}

/// The fastest available search for this build.
#[cfg(not(feature = "parallel"))]
pub fn default_search() -> SerialSearch {
    SerialSearch::new()
}
