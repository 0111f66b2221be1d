// crates/phgeo-core/src/error.rs
use thiserror::Error;

/// Errors raised while loading or building the gazetteer.
///
/// Only load-time problems are errors. Everything that can go wrong while
/// resolving a single text (ambiguity, no match, inconsistent hierarchy) is
/// folded into an `Option` by the resolver.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Malformed dataset row {row}: {reason}")]
    Malformed { row: usize, reason: String },

    #[error("Dataset contains no administrative units")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, GeoError>;
