use thiserror::Error;

/// Reasons a vignette transform can be refused.
///
/// Every check runs before the first pixel is written, so a failed call never yields a partially
/// shaded image.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VignetteError {
    #[error("invalid vignette configuration: {0}")]
    InvalidConfig(String),
    #[error("image must have non-zero dimensions (got {width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T, E = VignetteError> = std::result::Result<T, E>;
