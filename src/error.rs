//! Error types for ptop.

use std::io;
use thiserror::Error;

/// Error type for snapshot capture and terminal operations.
///
/// Per-process read failures never surface here: a process that exits or
/// denies access between enumeration and read degrades to default fields in
/// its record. Only a failed *listing* of the process table, or a terminal
/// failure, is fatal.
#[derive(Debug, Error)]
pub enum PtopError {
    /// The OS process table is not available on this system.
    #[error("process table is not available on this system")]
    ProcessTableUnavailable,

    /// Listing the process table failed.
    #[error("failed to enumerate processes: {message}")]
    Enumeration {
        /// Error message describing the failure.
        message: String,
    },

    /// Terminal initialization or rendering error.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Result alias for ptop operations.
pub type Result<T> = std::result::Result<T, PtopError>;
