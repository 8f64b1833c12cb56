//! Error type shared across the crate.

use thiserror::Error;

/// Errors raised by the simulation core and its collaborators.
#[derive(Debug, Error)]
pub enum SimError {
    /// Two particles share a position, so the pairwise force is undefined.
    #[error("degenerate distance: particles are coincident")]
    DegenerateDistance,

    #[error("invalid configuration: {field} is out of range (got {value})")]
    InvalidConfiguration { field: &'static str, value: f64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type SimResult<T> = Result<T, SimError>;

/// Reject non-positive (or NaN) values for a named parameter.
pub fn ensure_positive(field: &'static str, value: f64) -> SimResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidConfiguration { field, value })
    }
}
