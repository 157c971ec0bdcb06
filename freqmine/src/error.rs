//! Error types for loading datasets and running the miners.
//!
//! The mining engines are infallible once they have an index to work on; every
//! variant here comes from the edges: reading input or standing up the pool.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to callers of the loader, the scheduler or the CLI.
#[derive(Debug, Error)]
pub enum MiningError {
    /// The dataset source could not be opened or read.
    #[error("cannot read dataset {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field in a transaction line is not an integer.
    #[error("malformed item {field:?} on line {line}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// The offending field, trimmed
        field: String,
    },

    /// The worker pool could not be created.
    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, MiningError>;
