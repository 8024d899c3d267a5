//! Line chart with one or more series over a shared x.

use super::{resolve_style, Labels, Panel};
use crate::color::{cycle, Rgba};
use crate::error::Result;
use crate::figure::{Figure, Mark, SurfaceId};
use crate::frame::{compute_extent, AxisFrame};
use crate::input::{normalize_series, NumericSource};
use crate::style::{FigureSize, Style};

/// Builder for line charts.
#[derive(Debug, Clone)]
pub struct LineChart {
    series_labels: Vec<Option<String>>,
    colors: Vec<Rgba>,
    labels: Labels,
    figsize: FigureSize,
    markers: bool,
    style: Option<Style>,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}

impl LineChart {
    /// Create a line chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            series_labels: Vec::new(),
            colors: Vec::new(),
            labels: Labels::default(),
            figsize: FigureSize::DEFAULT,
            markers: false,
            style: None,
        }
    }

    /// Label for the first series.
    #[must_use]
    pub fn label(self, label: impl Into<String>) -> Self {
        self.labels_from([label])
    }

    /// Legend labels, in series order. Series beyond the list stay unlabeled.
    #[must_use]
    pub fn labels_from<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.series_labels = labels.into_iter().map(|l| Some(l.into())).collect();
        self
    }

    /// Series colors, in order. Missing colors come from the style's palette.
    #[must_use]
    pub fn colors(mut self, colors: Vec<Rgba>) -> Self {
        self.colors = colors;
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

    /// Draw hollow markers at every vertex.
    #[must_use]
    pub fn markers(mut self, show: bool) -> Self {
        self.markers = show;
        self
    }

    /// Use `style` instead of the process default.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    fn series_color(&self, index: usize, style: &Style) -> Rgba {
        self.colors.get(index).copied().unwrap_or_else(|| cycle(&style.palette, index))
    }

    fn prepare<X, Y>(&self, x: &X, ys: &[Y], style: &Style) -> Result<Panel>
    where
        X: NumericSource + ?Sized,
        Y: NumericSource,
    {
        let (xs, series) = normalize_series(x, ys)?;
        let x_extent = compute_extent(&xs)?;
        let mut y_extent = compute_extent(&series[0])?;
        for s in &series[1..] {
            y_extent = y_extent.union(compute_extent(s)?);
        }

        tracing::debug!(
            points = xs.len(),
            series = series.len(),
            y_lo = y_extent.lo(),
            y_hi = y_extent.hi(),
            "prepared line chart"
        );

        let marks: Vec<Mark> = series
            .iter()
            .enumerate()
            .map(|(i, ys)| Mark::Line {
                points: xs.iter().zip(ys.iter()).collect(),
                color: self.series_color(i, style),
                width: style.line_width,
                markers: self.markers,
                label: self.series_labels.get(i).cloned().flatten(),
            })
            .collect();
        let legend = marks.iter().any(|m| matches!(m, Mark::Line { label: Some(_), .. }));

        Ok(Panel {
            x: AxisFrame::new(x_extent, style.max_ticks, style.frame_padding),
            y: AxisFrame::new(y_extent, style.max_ticks, style.frame_padding),
            marks,
            legend,
        })
    }

    /// Draw one series per entry of `ys` against `x` on a new figure.
    ///
    /// # Errors
    ///
    /// Input errors for `x` or any series (named `y[i]`), length mismatches and figure-size errors.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe::plots::LineChart;
    ///
    /// let x = [0.0, 1.0, 2.0];
    /// let ys = [[0.0, 1.0, 4.0], [0.0, 2.0, 8.0]];
    /// let (figure, id) = LineChart::new().labels_from(["a", "b"]).draw(&x, &ys).unwrap();
    /// assert_eq!(figure.surface(id).unwrap().legend_entries().len(), 2);
    /// ```
    pub fn draw<X, Y>(&self, x: &X, ys: &[Y]) -> Result<(Figure, SurfaceId)>
    where
        X: NumericSource + ?Sized,
        Y: NumericSource,
    {
        let style = resolve_style(self.style.as_ref(), Style::current);
        let panel = self.prepare(x, ys, &style)?;
        panel.into_figure(self.figsize, style, &self.labels)
    }

    /// Draw onto an existing surface of `figure`.
    ///
    /// # Errors
    ///
    /// As [`LineChart::draw`], plus [`crate::Error::LayoutUnsupported`] for an unknown surface.
    pub fn draw_on<X, Y>(&self, figure: &mut Figure, id: SurfaceId, x: &X, ys: &[Y]) -> Result<()>
    where
        X: NumericSource + ?Sized,
        Y: NumericSource,
    {
        let style = resolve_style(self.style.as_ref(), || figure.style().clone());
        let panel = self.prepare(x, ys, &style)?;
        panel.onto(figure, id, &self.labels)
    }
}

/// Draw a single `y` series against `x` with default options.
///
/// # Errors
///
/// See [`LineChart::draw`].
pub fn line<X, Y>(x: &X, y: &Y) -> Result<(Figure, SurfaceId)>
where
    X: NumericSource + ?Sized,
    Y: NumericSource,
{
    LineChart::new().draw(x, std::slice::from_ref(y))
}
