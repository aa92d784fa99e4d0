//! Benchmark setup error type.
//!
//! Aggregates the failures that may arise while preparing benchmark inputs
//! so that setup functions can propagate them with `?`.

use crate::contacts::SyntheticError;
use contagion_core::{NetworkError, QueryError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic network generation failed.
    #[error("synthetic network generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Loading the generated edge list failed.
    #[error("network load failed: {0}")]
    Network(#[from] NetworkError),
    /// A warm-up query was rejected.
    #[error("query failed: {0}")]
    Query(#[from] QueryError),
}
