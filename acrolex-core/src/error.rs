use std::path::PathBuf;
use thiserror::Error;

/// Failures at the batch boundary. Nothing inside the extraction rules
/// produces these: a candidate that does not match is simply dropped.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("input directory {path} could not be read: {source}")]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is still locked after {attempts} delete attempts: {source}")]
    CleanupExhausted {
        path: PathBuf,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {path}: {source}")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
