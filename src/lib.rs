//! # inkframe
//!
//! Minimalist statistical charts in pure Rust: percentage histograms, line plots and scatter
//! plots with marginal distributions, drawn with range frames.
//!
//! A range frame is an axis whose spine runs only across the data it describes. Every chart is
//! built in the same steps:
//!
//! 1. Raw input is coerced into validated numeric vectors ([`input`]).
//! 2. Exact extents and "nice" tick sets are computed per axis ([`frame`]); histograms also bin
//!    their data into percentages ([`bins`]).
//! 3. One or three surfaces are laid out on the figure ([`layout`]). Marginal panels share the
//!    main panel's axis frames exactly.
//! 4. Marks are recorded on the surfaces ([`plots`]) and the finished [`figure::Figure`] is
//!    exported as SVG or PNG.
//!
//! ## Quick Start
//!
//! ```rust
//! use inkframe::prelude::*;
//!
//! let data = [2.1, 2.4, 2.2, 3.8, 3.1, 2.9, 3.3, 2.7];
//! let (figure, _surface) = Histogram::new().title("Response time").draw(&data)?;
//! let svg = figure.to_svg();
//! assert!(svg.contains("Response time"));
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [1.5, 1.9, 3.2, 3.9];
//! let (figure, _axes) = ScatterPlot::new().marginals(true).draw(&x, &y)?;
//! let png = figure.to_png()?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok::<(), inkframe::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for styles, colors, extents, tick sets and bins

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Colors and the grayscale series palette.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives in pixel space.
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

// ============================================================================
// Chart Engine
// ============================================================================

/// Input coercion and validation.
pub mod input;

/// Extents, ticks and axis frames.
pub mod frame;

/// Histogram binning and percentage normalization.
pub mod bins;

/// Chart styling and figure sizes.
pub mod style;

/// Panel composition.
pub mod layout;

/// Figures, surfaces and recorded marks.
pub mod figure;

/// Histogram, line and scatter chart builders.
pub mod plots;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for inkframe operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use inkframe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bins::{bin_and_normalize, BinRule, BinSpec};
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, Mark, Surface, SurfaceId};
    pub use crate::frame::{compute_extent, compute_ticks, AxisFrame, Extent, TickSet};
    pub use crate::input::{normalize, normalize_pair, Column, NumericSource, RawData, RawValue};
    pub use crate::layout::{compose, Extents, PanelKind, SurfaceRole};
    pub use crate::plots::{
        histogram, line, scatter, Histogram, LineChart, ScatterAxes, ScatterPlot,
    };
    pub use crate::style::{FigureSize, Style};
}
