//! Chart builders.
//!
//! Each builder follows the same two phases. First every input is normalized, extents, bins and
//! axis frames are computed, and any failure is returned; then the finished marks are recorded on
//! a surface. A failed build therefore never leaves a partially drawn surface behind.

mod histogram;
mod line;
mod scatter;

pub use histogram::{histogram, Histogram};
pub use line::{line, LineChart};
pub use scatter::{scatter, ScatterAxes, ScatterPlot};

use crate::error::Result;
use crate::figure::{Figure, Mark, Surface, SurfaceId};
use crate::frame::{AxisFrame, Extent};
use crate::layout::{compose, Extents, PanelKind};
use crate::style::{FigureSize, Style};

/// Title and axis labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Labels {
    pub(crate) title: Option<String>,
    pub(crate) xlabel: Option<String>,
    pub(crate) ylabel: Option<String>,
}

impl Labels {
    fn apply(&self, surface: &mut Surface) {
        if let Some(title) = &self.title {
            surface.set_title(title.clone());
        }
        if let Some(xlabel) = &self.xlabel {
            surface.set_xlabel(xlabel.clone());
        }
        if let Some(ylabel) = &self.ylabel {
            surface.set_ylabel(ylabel.clone());
        }
    }
}

/// A fully computed single-surface chart, ready to be recorded.
#[derive(Debug, Clone)]
pub(crate) struct Panel {
    pub(crate) x: AxisFrame,
    pub(crate) y: AxisFrame,
    pub(crate) marks: Vec<Mark>,
    pub(crate) legend: bool,
}

impl Panel {
    fn record(self, surface: &mut Surface, labels: &Labels) {
        surface.set_x_frame(self.x);
        surface.set_y_frame(self.y);
        for mark in self.marks {
            surface.add_mark(mark);
        }
        surface.set_legend(self.legend);
        labels.apply(surface);
    }

    /// Record onto a fresh single-surface figure.
    fn into_figure(
        self,
        size: FigureSize,
        style: Style,
        labels: &Labels,
    ) -> Result<(Figure, SurfaceId)> {
        let mut figure = Figure::new(size, style)?;
        let layout = compose(PanelKind::Single, Extents::default(), figure.style(), figure.size())?;
        let id = figure.add_layout(layout)[0];
        self.record(figure.require_surface(id)?, labels);
        Ok((figure, id))
    }

    /// Record onto an existing surface.
    fn onto(self, figure: &mut Figure, id: SurfaceId, labels: &Labels) -> Result<()> {
        self.record(figure.require_surface(id)?, labels);
        Ok(())
    }
}

/// Style for a build: the builder's own, else `fallback`.
fn resolve_style(own: Option<&Style>, fallback: impl FnOnce() -> Style) -> Style {
    own.cloned().unwrap_or_else(fallback)
}

/// Frame for a percentage axis: ticks over `[0, max]`, view starting at zero.
fn percentage_frame(max_percentage: f64, style: &Style) -> Result<AxisFrame> {
    let extent = Extent::new(0.0, max_percentage)?;
    let frame = AxisFrame::new(extent, style.max_ticks, style.frame_padding);
    let (_, hi) = frame.limits();
    Ok(frame.with_limits(0.0, hi))
}
