//! Brute-force oscillator search for Conway's Game of Life on a small, fixed
//! square grid whose border is permanently dead.
//!
//! Every pattern on a `side` × `side` grid is identified by a [`PatternId`],
//! whose bit `k` is the state of cell `k` in row-major order. The search
//! decodes each id, steps it forward a bounded number of generations, and
//! reports whether it returns to its seed without first becoming static.

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

pub mod config;
pub mod dataset;
pub mod io;
pub mod pattern;
pub mod search;
pub mod sim;
pub mod topology;

pub mod prelude {
    //! Types needed for nearly every search.

    pub use crate::config::{
        ConfigError, GridConfig, SearchConfig, DEFAULT_MAX_GENERATION, DEFAULT_SIDE,
        MAX_CHECKED_VALUE, MAX_SIDE,
    };
    pub use crate::pattern::{Grid, PatternCodec, PatternError, PatternId, PatternResult};
    pub use crate::search::{
        partition, Enumerator, ParallelSearch, SearchError, SearchResult, SearchSummary,
    };
    pub use crate::sim::{
        ClassificationResult, Classifier, GenerationTrace, LifeRule, StepFunction, Verdict, LIFE,
    };
    pub use crate::topology::NeighborTopology;
}
