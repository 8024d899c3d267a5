//! Error types for inkframe operations.
//!
//! Every failure is raised where it is detected, before any mark is recorded on a surface, so a
//! chart build either returns a complete figure or nothing at all.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a chart.
#[derive(Error, Debug)]
pub enum Error {
    /// Input could not be coerced to a numeric vector.
    #[error("Could not convert {name} to a numeric vector: {reason}")]
    InvalidInputType {
        /// Name of the offending argument.
        name: String,
        /// What made the input unusable.
        reason: String,
    },

    /// Zero-length input after coercion.
    #[error("{name} is empty")]
    EmptyData {
        /// Name of the offending argument.
        name: String,
    },

    /// Every element of the input is NaN or infinite.
    #[error("{name} contains only NaN or infinite values")]
    AllNonFinite {
        /// Name of the offending argument.
        name: String,
    },

    /// Extent computation hit NaN or infinite values.
    #[error(
        "Non-finite data range [{lo}, {hi}]: input mixes finite and NaN/infinite values; \
         filter them out before plotting"
    )]
    NonFiniteRange {
        /// Computed lower bound.
        lo: f64,
        /// Computed upper bound.
        hi: f64,
    },

    /// Paired vectors of different lengths.
    #[error(
        "{x_name} and {y_name} must have the same length \
         ({x_name} has {x_len} elements, {y_name} has {y_len})"
    )]
    LengthMismatch {
        /// Name of the first vector.
        x_name: String,
        /// Length of the first vector.
        x_len: usize,
        /// Name of the second vector.
        y_name: String,
        /// Length of the second vector.
        y_len: usize,
    },

    /// Unusable bin specification (non-positive count, unknown rule name).
    #[error("Invalid bin specification: {0}")]
    InvalidBinSpec(String),

    /// Requested panel arrangement cannot be built from the supplied data.
    #[error("Layout unsupported: {0}")]
    LayoutUnsupported(String),

    /// Figure dimensions that round to an empty canvas.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Scale domain error (e.g. a zero-width pixel mapping).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}
