//! Scatter plot, optionally with marginal histograms.

use super::{percentage_frame, resolve_style, Labels, Panel};
use crate::bins::{bin_and_normalize, BinSpec};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::{Bar, Figure, Mark, SurfaceId};
use crate::frame::{compute_extent, AxisFrame};
use crate::input::{normalize_pair, NumericSource};
use crate::layout::{compose, Extents, PanelKind};
use crate::style::{FigureSize, Style};

/// Surfaces created by [`ScatterPlot::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterAxes {
    /// A plain scatter plot.
    Single(SurfaceId),
    /// Scatter plot with marginal histograms.
    Marginal {
        /// The scatter plot.
        main: SurfaceId,
        /// Histogram of x, above the main surface.
        top: SurfaceId,
        /// Histogram of y, right of the main surface.
        right: SurfaceId,
    },
}

impl ScatterAxes {
    /// The surface holding the points.
    #[must_use]
    pub fn main(self) -> SurfaceId {
        match self {
            Self::Single(main) | Self::Marginal { main, .. } => main,
        }
    }
}

/// Builder for scatter plots.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    marginals: bool,
    labels: Labels,
    figsize: Option<FigureSize>,
    color: Option<Rgba>,
    alpha: Option<f32>,
    size: Option<f32>,
    style: Option<Style>,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ScatterPlot {
    /// Create a scatter plot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            marginals: false,
            labels: Labels::default(),
            figsize: None,
            color: None,
            alpha: None,
            size: None,
            style: None,
        }
    }

    /// Add histograms of x (top) and y (right) sharing the main plot's axes.
    #[must_use]
    pub fn marginals(mut self, show: bool) -> Self {
        self.marginals = show;
        self
    }

    /// Set the title. With marginals it sits above the top histogram.
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

    /// Set the figure size in inches. Defaults to square with marginals.
    #[must_use]
    pub fn figsize(mut self, size: impl Into<FigureSize>) -> Self {
        self.figsize = Some(size.into());
        self
    }

    /// Set the marker color (defaults to the style's primary color).
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set marker opacity in `[0, 1]`.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Set marker area in points squared.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Use `style` instead of the process default.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    fn resolved_figsize(&self) -> FigureSize {
        let default = if self.marginals { FigureSize::SQUARE } else { FigureSize::DEFAULT };
        self.figsize.unwrap_or(default)
    }

    fn points_mark(&self, x: &[f64], y: &[f64], style: &Style) -> Mark {
        let color = self.color.unwrap_or(style.primary);
        Mark::Points {
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            color: color.with_opacity(self.alpha.unwrap_or(style.marker_alpha)),
            size: self.size.unwrap_or(style.marker_size),
        }
    }

    fn prepare<X, Y>(&self, x: &X, y: &Y, style: &Style) -> Result<Panel>
    where
        X: NumericSource + ?Sized,
        Y: NumericSource + ?Sized,
    {
        let (xs, ys) = normalize_pair(x, y)?;
        let x_extent = compute_extent(&xs)?;
        let y_extent = compute_extent(&ys)?;
        tracing::debug!(points = xs.len(), "prepared scatter plot");

        Ok(Panel {
            x: AxisFrame::new(x_extent, style.max_ticks, style.frame_padding),
            y: AxisFrame::new(y_extent, style.max_ticks, style.frame_padding),
            marks: vec![self.points_mark(xs.as_slice(), ys.as_slice(), style)],
            legend: false,
        })
    }

    /// Draw the points of `(x, y)` on a new figure.
    ///
    /// With marginals, three surfaces are created and the marginal histograms reuse the main
    /// plot's axis frames exactly.
    ///
    /// # Errors
    ///
    /// Input, binning, layout and figure-size errors; nothing is drawn on failure.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe::plots::{ScatterAxes, ScatterPlot};
    ///
    /// let x = [1.0, 2.0, 3.0, 4.0];
    /// let y = [2.0, 1.0, 4.0, 3.0];
    /// let (figure, axes) = ScatterPlot::new().marginals(true).draw(&x, &y).unwrap();
    /// let ScatterAxes::Marginal { main, top, .. } = axes else { unreachable!() };
    /// assert_eq!(
    ///     figure.surface(main).unwrap().x_frame(),
    ///     figure.surface(top).unwrap().x_frame(),
    /// );
    /// ```
    pub fn draw<X, Y>(&self, x: &X, y: &Y) -> Result<(Figure, ScatterAxes)>
    where
        X: NumericSource + ?Sized,
        Y: NumericSource + ?Sized,
    {
        let style = resolve_style(self.style.as_ref(), Style::current);
        if self.marginals {
            return self.draw_with_marginals(x, y, style);
        }
        let panel = self.prepare(x, y, &style)?;
        let (figure, id) = panel.into_figure(self.resolved_figsize(), style, &self.labels)?;
        Ok((figure, ScatterAxes::Single(id)))
    }

    /// Draw onto an existing surface of `figure`.
    ///
    /// # Errors
    ///
    /// As [`ScatterPlot::draw`]. Marginals need a figure of their own and fail with
    /// [`Error::LayoutUnsupported`] here, as does an unknown surface.
    pub fn draw_on<X, Y>(&self, figure: &mut Figure, id: SurfaceId, x: &X, y: &Y) -> Result<()>
    where
        X: NumericSource + ?Sized,
        Y: NumericSource + ?Sized,
    {
        if self.marginals {
            return Err(Error::LayoutUnsupported(
                "scatter plots with marginals create their own figure; use draw".to_string(),
            ));
        }
        let style = resolve_style(self.style.as_ref(), || figure.style().clone());
        let panel = self.prepare(x, y, &style)?;
        panel.onto(figure, id, &self.labels)
    }

    fn draw_with_marginals<X, Y>(&self, x: &X, y: &Y, style: Style) -> Result<(Figure, ScatterAxes)>
    where
        X: NumericSource + ?Sized,
        Y: NumericSource + ?Sized,
    {
        let (xs, ys) = normalize_pair(x, y)?;
        let extents = Extents::new(compute_extent(&xs)?, compute_extent(&ys)?);
        let x_bins = bin_and_normalize(&xs, &BinSpec::default())?;
        let y_bins = bin_and_normalize(&ys, &BinSpec::default())?;
        let top_counts = percentage_frame(x_bins.max_percentage(), &style)?;
        let right_counts = percentage_frame(y_bins.max_percentage(), &style)?;

        let mut figure = Figure::new(self.resolved_figsize(), style.clone())?;
        let layout = compose(PanelKind::ScatterWithMarginals, extents, &style, figure.size())?;
        let ids = figure.add_layout(layout);
        let (main, top, right) = (ids[0], ids[1], ids[2]);

        tracing::debug!(
            points = xs.len(),
            x_bins = x_bins.bins().len(),
            y_bins = y_bins.bins().len(),
            "prepared scatter plot with marginals"
        );

        let bar_color = self.color.unwrap_or(style.primary).with_opacity(style.marginal_alpha);
        let points = self.points_mark(xs.as_slice(), ys.as_slice(), &style);

        let surface = figure.require_surface(main)?;
        surface.add_mark(points);
        if let Some(xlabel) = &self.labels.xlabel {
            surface.set_xlabel(xlabel.clone());
        }
        if let Some(ylabel) = &self.labels.ylabel {
            surface.set_ylabel(ylabel.clone());
        }

        let surface = figure.require_surface(top)?;
        surface.set_y_frame(top_counts);
        surface.add_mark(Mark::Bars {
            bars: x_bins.bins().iter().map(Bar::from).collect(),
            color: bar_color,
        });
        if let Some(title) = &self.labels.title {
            surface.set_title(title.clone());
        }

        let surface = figure.require_surface(right)?;
        surface.set_x_frame(right_counts);
        surface.add_mark(Mark::HBars {
            bars: y_bins.bins().iter().map(Bar::from).collect(),
            color: bar_color,
        });

        Ok((figure, ScatterAxes::Marginal { main, top, right }))
    }
}

/// Draw a plain scatter plot of `(x, y)` with default options.
///
/// # Errors
///
/// See [`ScatterPlot::draw`].
pub fn scatter<X, Y>(x: &X, y: &Y) -> Result<(Figure, ScatterAxes)>
where
    X: NumericSource + ?Sized,
    Y: NumericSource + ?Sized,
{
    ScatterPlot::new().draw(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Spines, SurfaceRole};

    fn xy() -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..50).map(|i| f64::from(i) * 0.37).collect();
        let y: Vec<f64> = x.iter().map(|v| (v * 1.3).sin() * 4.0 + v).collect();
        (x, y)
    }

    #[test]
    fn test_plain_scatter() {
        let (x, y) = xy();
        let (figure, axes) = scatter(&x, &y).unwrap();
        let ScatterAxes::Single(id) = axes else { panic!("expected a single surface") };
        assert_eq!(figure.size(), (800, 500));
        assert_eq!(figure.surfaces().len(), 1);

        match &figure.surface(id).unwrap().marks()[0] {
            Mark::Points {
                points,
                color,
                size,
            } => {
                assert_eq!(points.len(), 50);
                assert_eq!(color.a, 153);
                assert_eq!(*size, 30.0);
            }
            other => panic!("unexpected mark {other:?}"),
        }
    }

    #[test]
    fn test_marginal_alignment_is_exact() {
        let (x, y) = xy();
        let (figure, axes) = ScatterPlot::new().marginals(true).title("T").draw(&x, &y).unwrap();
        let ScatterAxes::Marginal { main, top, right } = axes else { panic!("expected marginals") };
        assert_eq!(figure.size(), (800, 800));

        let main = figure.surface(main).unwrap();
        let top = figure.surface(top).unwrap();
        let right = figure.surface(right).unwrap();

        let (mx, tx) = (main.x_frame().unwrap(), top.x_frame().unwrap());
        assert_eq!(mx.extent().lo().to_bits(), tx.extent().lo().to_bits());
        assert_eq!(mx.extent().hi().to_bits(), tx.extent().hi().to_bits());
        assert_eq!(mx.limits(), tx.limits());
        let (my, ry) = (main.y_frame().unwrap(), right.y_frame().unwrap());
        assert_eq!(my.extent().lo().to_bits(), ry.extent().lo().to_bits());
        assert_eq!(my.extent().hi().to_bits(), ry.extent().hi().to_bits());

        assert_eq!(top.role(), SurfaceRole::TopMarginal);
        assert_eq!(top.spines(), Spines::BOTTOM);
        assert_eq!(right.spines(), Spines::LEFT);
        assert_eq!(top.title(), Some("T"));
        assert_eq!(main.title(), None);
        assert_eq!(top.y_frame().unwrap().limits().0, 0.0);
        assert_eq!(right.x_frame().unwrap().limits().0, 0.0);
    }

    #[test]
    fn test_marginal_histograms() {
        let (x, y) = xy();
        let (figure, axes) = ScatterPlot::new().marginals(true).draw(&x, &y).unwrap();
        let ScatterAxes::Marginal { top, right, .. } = axes else { panic!("expected marginals") };

        let total = |id| match &figure.surface(id).unwrap().marks()[0] {
            Mark::Bars { bars, color } | Mark::HBars { bars, color } => {
                assert!(color.a > 153 && color.a < 255);
                bars.iter().map(|b| b.value).sum::<f64>()
            }
            other => panic!("unexpected mark {other:?}"),
        };
        assert!((total(top) - 100.0).abs() < 1e-9);
        assert!((total(right) - 100.0).abs() < 1e-9);
        assert!(matches!(figure.surface(right).unwrap().marks()[0], Mark::HBars { .. }));
    }

    #[test]
    fn test_options() {
        let (figure, axes) = ScatterPlot::new()
            .color(Rgba::ACCENT_BLUE)
            .alpha(1.0)
            .size(9.0)
            .figsize(FigureSize::WIDE)
            .xlabel("x")
            .draw(&[1, 2, 3], &[3.0, 2.0, 1.0])
            .unwrap();
        let surface = figure.surface(axes.main()).unwrap();
        assert_eq!(figure.size(), (1000, 500));
        assert_eq!(surface.xlabel(), Some("x"));
        assert!(matches!(
            &surface.marks()[0],
            Mark::Points { color, size, .. } if *color == Rgba::ACCENT_BLUE && *size == 9.0
        ));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            scatter(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            ScatterPlot::new().marginals(true).draw(&[1.0, f64::NAN], &[1.0, 2.0]),
            Err(Error::NonFiniteRange { .. })
        ));
    }

    #[test]
    fn test_draw_on() {
        let (mut figure, id) = Figure::with_surface(FigureSize::DEFAULT, Style::default()).unwrap();
        ScatterPlot::new().draw_on(&mut figure, id, &[1.0, 2.0], &[2.0, 1.0]).unwrap();
        assert_eq!(figure.surface(id).unwrap().marks().len(), 1);

        let err = ScatterPlot::new().marginals(true).draw_on(&mut figure, id, &[1.0], &[1.0]);
        assert!(matches!(err, Err(Error::LayoutUnsupported(_))));
        assert_eq!(figure.surface(id).unwrap().marks().len(), 1);
    }

    #[test]
    fn test_degenerate_marginals() {
        let (figure, axes) = ScatterPlot::new().marginals(true).draw(&[2.0; 5], &[7.0; 5]).unwrap();
        assert_eq!(figure.surfaces().len(), 3);
        let main = figure.surface(axes.main()).unwrap();
        assert!(main.x_frame().unwrap().extent().is_degenerate());
        assert!(figure.to_framebuffer().is_ok());
    }
}
