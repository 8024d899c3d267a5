//! Percentage histogram.
//!
//! Bars show each bin's share of the sample in percent. The horizontal spine spans the data
//! extent, the vertical axis starts at zero.

use super::{percentage_frame, resolve_style, Labels, Panel};
use crate::bins::{bin_and_normalize, BinSpec};
use crate::color::Rgba;
use crate::error::Result;
use crate::figure::{Bar, Figure, Mark, SurfaceId};
use crate::frame::AxisFrame;
use crate::input::{normalize, NumericSource};
use crate::style::{FigureSize, Style};

/// Builder for percentage histograms.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: BinSpec,
    labels: Labels,
    figsize: FigureSize,
    color: Option<Rgba>,
    style: Option<Style>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create a histogram builder with automatic binning and a "Percentage" y label.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bins: BinSpec::default(),
            labels: Labels {
                ylabel: Some("Percentage".to_string()),
                ..Labels::default()
            },
            figsize: FigureSize::DEFAULT,
            color: None,
            style: None,
        }
    }

    /// Set the binning: a count, a rule or explicit edges.
    #[must_use]
    pub fn bins(mut self, bins: impl Into<BinSpec>) -> Self {
        self.bins = bins.into();
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.labels.title = Some(title.into());
        self
    }

    /// Set the x-axis label.
    #[must_use]
    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.labels.xlabel = Some(label.into());
        self
    }

    /// Set the y-axis label.
    #[must_use]
    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.labels.ylabel = Some(label.into());
        self
    }

    /// Set the figure size in inches.
    #[must_use]
    pub fn figsize(mut self, size: impl Into<FigureSize>) -> Self {
        self.figsize = size.into();
        self
    }

    /// Set the bar color (defaults to the style's primary color).
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Use `style` instead of the process default.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    fn prepare<S: NumericSource + ?Sized>(&self, data: &S, style: &Style) -> Result<Panel> {
        let values = normalize(data)?;
        let binned = bin_and_normalize(&values, &self.bins)?;

        let x = AxisFrame::new(binned.extent(), style.max_ticks, style.frame_padding);
        let (lo, hi) = x.limits();
        let edges = binned.edge_extent();
        let x = x.with_limits(lo.min(edges.lo()), hi.max(edges.hi()));
        let y = percentage_frame(binned.max_percentage(), style)?;

        tracing::debug!(
            samples = values.len(),
            bins = binned.bins().len(),
            lo = binned.extent().lo(),
            hi = binned.extent().hi(),
            "prepared histogram"
        );

        let bars = binned.bins().iter().map(Bar::from).collect();
        let color = self.color.unwrap_or(style.primary);
        Ok(Panel { x, y, marks: vec![Mark::Bars { bars, color }], legend: false })
    }

    /// Draw `data` on a new figure.
    ///
    /// # Errors
    ///
    /// Input, binning and figure-size errors; nothing is drawn on failure.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe::plots::Histogram;
    ///
    /// let (figure, id) = Histogram::new()
    ///     .bins(4)
    ///     .title("Sizes")
    ///     .draw(&[1.0, 2.0, 2.5, 4.0])
    ///     .unwrap();
    /// assert_eq!(figure.surface(id).unwrap().title(), Some("Sizes"));
    /// ```
    pub fn draw<S: NumericSource + ?Sized>(&self, data: &S) -> Result<(Figure, SurfaceId)> {
        let style = resolve_style(self.style.as_ref(), Style::current);
        let panel = self.prepare(data, &style)?;
        panel.into_figure(self.figsize, style, &self.labels)
    }

    /// Draw `data` on an existing surface of `figure`.
    ///
    /// # Errors
    ///
    /// As [`Histogram::draw`], plus [`crate::Error::LayoutUnsupported`] for an unknown surface.
    pub fn draw_on<S: NumericSource + ?Sized>(
        &self,
        figure: &mut Figure,
        id: SurfaceId,
        data: &S,
    ) -> Result<()> {
        let style = resolve_style(self.style.as_ref(), || figure.style().clone());
        let panel = self.prepare(data, &style)?;
        panel.onto(figure, id, &self.labels)
    }
}

/// Draw a percentage histogram of `data` with default options.
///
/// # Errors
///
/// See [`Histogram::draw`].
pub fn histogram<S: NumericSource + ?Sized>(data: &S) -> Result<(Figure, SurfaceId)> {
    Histogram::new().draw(data)
}
