//! Error types for acoustic operators and geometry construction.

use thiserror::Error;

/// Result type for pswave operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating geometry or applying operators.
///
/// All variants are input-validation failures: they are reported immediately
/// and never retried or recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A field lives on a different grid than the one it is combined with.
    #[error("Domain mismatch: {0}")]
    DomainMismatch(String),

    /// Positions or fields with an unsupported number of spatial axes.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Array lengths or shapes that must agree do not.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// PML thicker than half of a grid axis.
    #[error("Invalid PML size: {0}")]
    InvalidPmlSize(String),

    /// A time sample requested outside the recorded signal.
    #[error("Time out of range: {0}")]
    TimeOutOfRange(String),

    /// A scalar parameter outside its admissible range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Create a domain mismatch error.
    pub fn domain_mismatch(msg: impl Into<String>) -> Self {
        Self::DomainMismatch(msg.into())
    }

    /// Create an invalid dimension error.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create an invalid PML size error.
    pub fn invalid_pml_size(msg: impl Into<String>) -> Self {
        Self::InvalidPmlSize(msg.into())
    }

    /// Create a time out of range error.
    pub fn time_out_of_range(msg: impl Into<String>) -> Self {
        Self::TimeOutOfRange(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
