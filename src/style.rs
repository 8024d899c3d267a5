//! Chart styling.
//!
//! [`Style`] gathers every visual constant the builders and the compositor read: colors, line
//! and tick geometry, font sizes, marginal proportions and subplot margins. Sizes are in
//! typographic points and converted to pixels with the style's `dpi`.
//!
//! A process-wide default can be installed once with [`Style::install`]; builders that are not
//! given a style explicitly use [`Style::current`].

use crate::color::{Rgba, GRAYSCALE_PALETTE};
use crate::error::{Error, Result};
use std::sync::OnceLock;

static GLOBAL_STYLE: OnceLock<Style> = OnceLock::new();

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FigureSize {
    /// Width in inches.
    pub width: f32,
    /// Height in inches.
    pub height: f32,
}

impl FigureSize {
    /// 8 × 5 inches.
    pub const DEFAULT: Self = Self::new(8.0, 5.0);
    /// 8 × 8 inches, used for scatter plots with marginals.
    pub const SQUARE: Self = Self::new(8.0, 8.0);
    /// 10 × 5 inches.
    pub const WIDE: Self = Self::new(10.0, 5.0);
    /// 6 × 8 inches.
    pub const TALL: Self = Self::new(6.0, 8.0);

    /// Create a figure size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions at `dpi`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either side rounds to zero pixels or is not finite.
    pub fn pixels(self, dpi: f32) -> Result<(u32, u32)> {
        let to_px = |inches: f32| {
            let px = (inches * dpi).round();
            if px.is_finite() && px >= 1.0 && px <= u32::MAX as f32 {
                px as u32
            } else {
                0
            }
        };
        let (width, height) = (to_px(self.width), to_px(self.height));
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok((width, height))
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<(f32, f32)> for FigureSize {
    fn from((width, height): (f32, f32)) -> Self {
        Self::new(width, height)
    }
}

/// Subplot area as fractions of the figure, measured from the left and from the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Left edge of the plotting area.
    pub left: f32,
    /// Right edge of the plotting area.
    pub right: f32,
    /// Bottom edge of the plotting area.
    pub bottom: f32,
    /// Top edge of the plotting area.
    pub top: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
        }
    }
}

/// Visual configuration for charts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    /// Figure background.
    pub background: Rgba,
    /// Default color for data marks.
    pub primary: Rgba,
    /// Spine and tick color.
    pub spine_color: Rgba,
    /// Title, label and tick-label color.
    pub text_color: Rgba,
    /// Series colors for multi-line charts.
    pub palette: Vec<Rgba>,
    /// Data line width (points).
    pub line_width: f32,
    /// Spine width (points).
    pub spine_width: f32,
    /// Tick length (points).
    pub tick_length: f32,
    /// Tick width (points).
    pub tick_width: f32,
    /// Maximum ticks per axis.
    pub max_ticks: usize,
    /// Title font size (points).
    pub title_size: f32,
    /// Axis label font size (points).
    pub label_size: f32,
    /// Tick label font size (points).
    pub tick_label_size: f32,
    /// Legend font size (points).
    pub legend_size: f32,
    /// Gap between title and plot (points).
    pub title_pad: f32,
    /// Gap between tick labels and axis labels (points).
    pub label_pad: f32,
    /// Gap between ticks and tick labels (points).
    pub tick_pad: f32,
    /// Scatter marker area (points squared).
    pub marker_size: f32,
    /// Scatter marker opacity.
    pub marker_alpha: f32,
    /// Diameter of hollow line markers (points).
    pub line_marker_size: f32,
    /// Main-to-marginal size ratio.
    pub marginal_ratio: f32,
    /// Gap between main and marginal panels, relative to the average cell size.
    pub marginal_gap: f32,
    /// Marginal bar opacity.
    pub marginal_alpha: f32,
    /// View padding as a fraction of the data span.
    pub frame_padding: f64,
    /// Subplot area within the figure.
    pub margins: Margins,
    /// Pixels per inch.
    pub dpi: f32,
    /// Draw horizontal gridlines at the y ticks.
    pub show_grid: bool,
    /// Gridline color.
    pub grid_color: Rgba,
    /// Gridline opacity.
    pub grid_alpha: f32,
    /// Gridline width (points).
    pub grid_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self::tufte()
    }
}

impl Style {
    /// Black ink on white, gray spines, no gridlines.
    #[must_use]
    pub fn tufte() -> Self {
        Self {
            background: Rgba::WHITE,
            primary: Rgba::BLACK,
            spine_color: Rgba::DARK_GRAY,
            text_color: Rgba::BLACK,
            palette: GRAYSCALE_PALETTE.to_vec(),
            line_width: 1.5,
            spine_width: 0.75,
            tick_length: 4.0,
            tick_width: 0.75,
            max_ticks: crate::frame::DEFAULT_MAX_TICKS,
            title_size: 14.0,
            label_size: 11.0,
            tick_label_size: 9.0,
            legend_size: 9.0,
            title_pad: 12.0,
            label_pad: 8.0,
            tick_pad: 4.0,
            marker_size: 30.0,
            marker_alpha: 0.6,
            line_marker_size: 4.0,
            marginal_ratio: 4.0,
            marginal_gap: 0.05,
            marginal_alpha: 0.7,
            frame_padding: 0.02,
            margins: Margins::default(),
            dpi: 100.0,
            show_grid: false,
            grid_color: Rgba::GRID_GRAY,
            grid_alpha: 0.5,
            grid_width: 0.5,
        }
    }

    /// The default style at 300 dpi.
    #[must_use]
    pub fn print() -> Self {
        Self::tufte().dpi(300.0)
    }

    /// The default style with light horizontal gridlines.
    #[must_use]
    pub fn gridded() -> Self {
        Self::tufte().grid(true)
    }

    /// Install `self` as the process-wide default.
    ///
    /// Only the first install succeeds; later calls hand the rejected style back.
    pub fn install(self) -> std::result::Result<(), Box<Self>> {
        GLOBAL_STYLE.set(self).map_err(Box::new)
    }

    /// The installed default, or [`Style::tufte`] if none was installed.
    #[must_use]
    pub fn current() -> Self {
        GLOBAL_STYLE.get().cloned().unwrap_or_default()
    }

    /// Convert points to pixels at this style's dpi.
    #[must_use]
    pub fn pt(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }

    /// Set background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set the default data color.
    #[must_use]
    pub fn primary(mut self, color: Rgba) -> Self {
        self.primary = color;
        self
    }

    /// Set the series palette.
    #[must_use]
    pub fn palette(mut self, palette: Vec<Rgba>) -> Self {
        self.palette = palette;
        self
    }

    /// Set the maximum number of ticks per axis.
    #[must_use]
    pub fn max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Set the pixel density.
    #[must_use]
    pub fn dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Enable or disable gridlines.
    #[must_use]
    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Set main-to-marginal ratio and the gap between panels.
    #[must_use]
    pub fn marginals(mut self, ratio: f32, gap: f32) -> Self {
        self.marginal_ratio = ratio;
        self.marginal_gap = gap;
        self
    }

    /// Set the view padding fraction.
    #[must_use]
    pub fn frame_padding(mut self, fraction: f64) -> Self {
        self.frame_padding = fraction;
        self
    }

    /// Set the subplot margins.
    #[must_use]
    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }
}
