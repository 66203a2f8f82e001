//! Error taxonomy for a fetch run.
//!
//! `Directory` and `Config` abort the run; `Retrieval` and `Decompression`
//! are scoped to one archive and recorded in the run report.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Target directory could not be created. Nothing else can proceed.
    #[error("cannot create target directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Archive could not be fetched (network, HTTP status, or local write).
    #[error("retrieval of {url} failed: {source}")]
    Retrieval {
        url: String,
        #[source]
        source: RetrievalError,
    },

    /// Archive missing, corrupt, or output not writable.
    #[error("decompression of {} failed: {source}", .path.display())]
    Decompression {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Cause of a failed retrieval.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// Curl reported an error (DNS, connect, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Server answered with a non-success status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the archive to disk failed.
    #[error("storage: {0}")]
    Storage(#[from] io::Error),
}

impl RetrievalError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RetrievalError::Http(404 | 410))
    }
}
