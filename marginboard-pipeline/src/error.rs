//! Engine error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors at
//! the crate boundary. Inside the engine, missing data degrades to
//! `None`/undefined states instead of erroring; anything that reaches
//! these variants indicates a contract violation or an export failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Pipeline stage '{stage}' failed: {reason}")]
    StageFailed { stage: String, reason: String },

    #[error("CSV export error: {0}")]
    Export(#[from] csv::Error),

    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export buffer was not valid UTF-8: {0}")]
    ExportEncoding(#[from] std::string::FromUtf8Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Computation superseded by a newer invocation (generation {stale} < {current})")]
    Superseded { stale: u64, current: u64 },
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
