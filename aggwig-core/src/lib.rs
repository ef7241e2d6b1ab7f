//! # aggwig-core
//!
//! Region-batched aggregation of per-basepair signal (BigWig) and one-hot
//! nucleotide sequence (2bit) over sets of BED regions: fixed-width windows
//! around region centers, order-preserving parallel reads, re-binning,
//! cross-region positional means, incremental JSON output, and per-region
//! log-normalized z-scores.

pub mod aggregate;
pub mod batch;
pub mod condense;
pub mod errors;
pub mod models;
pub mod sequence;
pub mod signal;
pub mod stream;
pub mod utils;
pub mod zscore;

pub use errors::{AggError, Result};

pub mod consts {
    pub const DEFAULT_EXTSIZE: u32 = 500;
    pub const DEFAULT_NUM_THREADS: usize = 8;
    pub const DEFAULT_BATCH_SIZE: usize = 1000;
    pub const DEFAULT_RESOLUTION: usize = 1;
    pub const DEFAULT_DECIMAL_RESOLUTION: u32 = 3;
}
