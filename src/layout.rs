//! Panel composition.
//!
//! A chart occupies either a single surface or an L-shaped arrangement of three: the main plot,
//! a marginal panel above it sharing its horizontal axis, and a marginal panel to its right
//! sharing its vertical axis. Cell placement follows grid-spec arithmetic: the subplot area is
//! divided among cells in proportion to their ratios, with gaps expressed relative to the average
//! cell size.

use crate::error::{Error, Result};
use crate::frame::{AxisFrame, Extent};
use crate::geometry::Rect;
use crate::style::Style;

/// Panel arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// One surface.
    Single,
    /// Main surface plus top and right marginal surfaces.
    ScatterWithMarginals,
}

/// What a surface is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    /// The main plot.
    Main,
    /// Marginal panel above the main plot.
    TopMarginal,
    /// Marginal panel right of the main plot.
    RightMarginal,
}

/// Spine visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spines {
    /// Top spine.
    pub top: bool,
    /// Right spine.
    pub right: bool,
    /// Bottom spine.
    pub bottom: bool,
    /// Left spine.
    pub left: bool,
}

impl Spines {
    /// Bottom and left only.
    pub const RANGE_FRAME: Self = Self {
        top: false,
        right: false,
        bottom: true,
        left: true,
    };
    /// Bottom only.
    pub const BOTTOM: Self = Self {
        top: false,
        right: false,
        bottom: true,
        left: false,
    };
    /// Left only.
    pub const LEFT: Self = Self {
        top: false,
        right: false,
        bottom: false,
        left: true,
    };
}

/// Tick decoration for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDecor {
    /// Draw tick marks.
    pub ticks: bool,
    /// Draw tick labels.
    pub labels: bool,
}

impl AxisDecor {
    /// Tick marks and labels.
    pub const FULL: Self = Self {
        ticks: true,
        labels: true,
    };
    /// Tick marks only.
    pub const MARKS: Self = Self {
        ticks: true,
        labels: false,
    };
    /// Nothing.
    pub const HIDDEN: Self = Self {
        ticks: false,
        labels: false,
    };
}

/// Placement and axis setup for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceLayout {
    /// What the surface is for.
    pub role: SurfaceRole,
    /// Pixel rectangle within the figure.
    pub rect: Rect,
    /// Horizontal axis frame, if known at composition time.
    pub x: Option<AxisFrame>,
    /// Vertical axis frame, if known at composition time.
    pub y: Option<AxisFrame>,
    /// Visible spines.
    pub spines: Spines,
    /// Horizontal axis decoration.
    pub x_decor: AxisDecor,
    /// Vertical axis decoration.
    pub y_decor: AxisDecor,
}

/// The composed panel set.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    kind: PanelKind,
    surfaces: Vec<SurfaceLayout>,
}

impl PanelLayout {
    /// Arrangement kind.
    #[must_use]
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// All surfaces, main first.
    #[must_use]
    pub fn surfaces(&self) -> &[SurfaceLayout] {
        &self.surfaces
    }

    /// Consume the layout into its surfaces.
    #[must_use]
    pub fn into_surfaces(self) -> Vec<SurfaceLayout> {
        self.surfaces
    }

    /// The main surface.
    #[must_use]
    pub fn main(&self) -> &SurfaceLayout {
        &self.surfaces[0]
    }

    /// Surface with `role`, if present.
    #[must_use]
    pub fn get(&self, role: SurfaceRole) -> Option<&SurfaceLayout> {
        self.surfaces.iter().find(|s| s.role == role)
    }
}

/// Data extents handed to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extents {
    /// Horizontal data extent.
    pub x: Option<Extent>,
    /// Vertical data extent.
    pub y: Option<Extent>,
}

impl Extents {
    /// Both extents known.
    #[must_use]
    pub fn new(x: Extent, y: Extent) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Lay out the surfaces of `kind` on a canvas of `canvas` pixels.
///
/// # Errors
///
/// [`Error::LayoutUnsupported`] when marginals are requested without both extents or the style's
/// marginal proportions are unusable, [`Error::InvalidDimensions`] for an empty canvas.
///
/// # Example
///
/// ```
/// use inkframe::frame::Extent;
/// use inkframe::layout::{compose, Extents, PanelKind, SurfaceRole};
/// use inkframe::style::Style;
///
/// let extents = Extents::new(Extent::new(0.0, 1.0).unwrap(), Extent::new(-1.0, 1.0).unwrap());
/// let layout = compose(PanelKind::ScatterWithMarginals, extents, &Style::default(), (800, 800))
///     .unwrap();
/// let top = layout.get(SurfaceRole::TopMarginal).unwrap();
/// assert_eq!(top.x, layout.main().x);
/// ```
pub fn compose(
    kind: PanelKind,
    extents: Extents,
    style: &Style,
    canvas: (u32, u32),
) -> Result<PanelLayout> {
    let (width, height) = canvas;
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    let frame = |e: Option<Extent>| {
        e.map(|extent| AxisFrame::new(extent, style.max_ticks, style.frame_padding))
    };
    let area = subplot_area(style, canvas);

    let surfaces = match kind {
        PanelKind::Single => vec![SurfaceLayout {
            role: SurfaceRole::Main,
            rect: area,
            x: frame(extents.x),
            y: frame(extents.y),
            spines: Spines::RANGE_FRAME,
            x_decor: AxisDecor::FULL,
            y_decor: AxisDecor::FULL,
        }],
        PanelKind::ScatterWithMarginals => {
            let (Some(x), Some(y)) = (extents.x, extents.y) else {
                return Err(Error::LayoutUnsupported(
                    "scatter with marginals needs both an x and a y extent".to_string(),
                ));
            };
            let ratio = style.marginal_ratio;
            let gap = style.marginal_gap;
            if !(ratio.is_finite() && ratio > 0.0) || !(gap.is_finite() && gap >= 0.0) {
                return Err(Error::LayoutUnsupported(format!(
                    "marginal ratio {ratio} and gap {gap} must be positive and finite"
                )));
            }

            let cols = grid_cells(area.width, &[ratio, 1.0], gap);
            let rows = grid_cells(area.height, &[1.0, ratio], gap);
            let cell = |row: usize, col: usize| {
                Rect::new(area.x + cols[col].0, area.y + rows[row].0, cols[col].1, rows[row].1)
            };

            let x_frame = AxisFrame::new(x, style.max_ticks, style.frame_padding);
            let y_frame = AxisFrame::new(y, style.max_ticks, style.frame_padding);

            vec![
                SurfaceLayout {
                    role: SurfaceRole::Main,
                    rect: cell(1, 0),
                    x: Some(x_frame.clone()),
                    y: Some(y_frame.clone()),
                    spines: Spines::RANGE_FRAME,
                    x_decor: AxisDecor::FULL,
                    y_decor: AxisDecor::FULL,
                },
                SurfaceLayout {
                    role: SurfaceRole::TopMarginal,
                    rect: cell(0, 0),
                    x: Some(x_frame),
                    y: None,
                    spines: Spines::BOTTOM,
                    x_decor: AxisDecor::MARKS,
                    y_decor: AxisDecor::HIDDEN,
                },
                SurfaceLayout {
                    role: SurfaceRole::RightMarginal,
                    rect: cell(1, 1),
                    x: None,
                    y: Some(y_frame),
                    spines: Spines::LEFT,
                    x_decor: AxisDecor::HIDDEN,
                    y_decor: AxisDecor::MARKS,
                },
            ]
        }
    };

    Ok(PanelLayout { kind, surfaces })
}

/// The subplot area of the canvas, in pixels from the top-left corner.
fn subplot_area(style: &Style, (width, height): (u32, u32)) -> Rect {
    let (w, h) = (width as f32, height as f32);
    let m = style.margins;
    Rect::new(m.left * w, (1.0 - m.top) * h, (m.right - m.left) * w, (m.top - m.bottom) * h)
}

/// Split `total` pixels into cells proportional to `ratios`, separated by `space` times the
/// average cell size. Returns `(offset, size)` per cell.
fn grid_cells(total: f32, ratios: &[f32], space: f32) -> Vec<(f32, f32)> {
    let n = ratios.len() as f32;
    let cell = total / (n + space * (n - 1.0));
    let sep = space * cell;
    let sum: f32 = ratios.iter().sum();

    let mut offset = 0.0;
    ratios
        .iter()
        .map(|r| {
            let size = cell * n * r / sum;
            let placed = (offset, size);
            offset += size + sep;
            placed
        })
        .collect()
}
