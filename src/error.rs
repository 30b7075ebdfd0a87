use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// Rejected at construction time; no partial simulator is produced.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Statistics were finalized over zero accesses.
    #[error("cannot summarize an empty trace")]
    EmptyTrace,

    #[error("failed to read trace file {}: {source}", .path.display())]
    TraceFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid trace: {0}")]
    InvalidTrace(String),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
