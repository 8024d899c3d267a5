//! Figures, surfaces and marks.
//!
//! A [`Figure`] owns a pixel canvas and the [`Surface`]s laid out on it. Chart builders record
//! [`Mark`]s on surfaces in data coordinates; nothing is rasterized until the figure is exported.
//! Export first lowers every surface to a display list of pixel-space [`SvgElement`]s (marks,
//! spines, ticks, text), which is then written out as SVG or rasterized into a [`Framebuffer`].
//! Raster output has no text renderer, so titles, labels and tick labels only appear in SVG.

use crate::bins::Bin;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::frame::AxisFrame;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::layout::{AxisDecor, PanelLayout, Spines, SurfaceLayout, SurfaceRole};
use crate::output::{PngEncoder, SvgElement, SvgEncoder, TextAnchor};
use crate::render;
use crate::scale::{LinearScale, Scale};
use crate::style::{FigureSize, Style};

/// Handle to a surface within its figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(usize);

impl SurfaceId {
    /// Position of the surface in [`Figure::surfaces`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// Marks
// ============================================================================

/// One bar: an interval on the category axis and a length from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Interval start.
    pub start: f64,
    /// Interval end.
    pub end: f64,
    /// Bar length measured from zero.
    pub value: f64,
}

impl From<&Bin> for Bar {
    fn from(bin: &Bin) -> Self {
        Self {
            start: bin.edge_lo,
            end: bin.edge_hi,
            value: bin.percentage,
        }
    }
}

/// Something drawn on a surface, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Vertical bars rising from y = 0, without borders.
    Bars {
        /// Bars, in any order.
        bars: Vec<Bar>,
        /// Fill color.
        color: Rgba,
    },
    /// Horizontal bars extending from x = 0, without borders.
    HBars {
        /// Bars, in any order.
        bars: Vec<Bar>,
        /// Fill color.
        color: Rgba,
    },
    /// A connected series.
    Line {
        /// Vertices in drawing order.
        points: Vec<(f64, f64)>,
        /// Stroke color.
        color: Rgba,
        /// Stroke width in points.
        width: f32,
        /// Draw hollow circle markers at each vertex.
        markers: bool,
        /// Legend label.
        label: Option<String>,
    },
    /// Filled scatter markers without edges.
    Points {
        /// Marker centers.
        points: Vec<(f64, f64)>,
        /// Fill color, alpha included.
        color: Rgba,
        /// Marker area in points squared.
        size: f32,
    },
}

// ============================================================================
// Surfaces
// ============================================================================

/// A drawing surface: a pixel rectangle with axes, decorations and recorded marks.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    role: SurfaceRole,
    rect: Rect,
    x: Option<AxisFrame>,
    y: Option<AxisFrame>,
    spines: Spines,
    x_decor: AxisDecor,
    y_decor: AxisDecor,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    legend: bool,
    marks: Vec<Mark>,
}

impl From<SurfaceLayout> for Surface {
    fn from(layout: SurfaceLayout) -> Self {
        Self {
            role: layout.role,
            rect: layout.rect,
            x: layout.x,
            y: layout.y,
            spines: layout.spines,
            x_decor: layout.x_decor,
            y_decor: layout.y_decor,
            title: None,
            xlabel: None,
            ylabel: None,
            legend: false,
            marks: Vec::new(),
        }
    }
}

impl Surface {
    /// What the surface is for.
    #[must_use]
    pub fn role(&self) -> SurfaceRole {
        self.role
    }

    /// Pixel rectangle within the figure.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Horizontal axis frame.
    #[must_use]
    pub fn x_frame(&self) -> Option<&AxisFrame> {
        self.x.as_ref()
    }

    /// Vertical axis frame.
    #[must_use]
    pub fn y_frame(&self) -> Option<&AxisFrame> {
        self.y.as_ref()
    }

    /// Replace the horizontal axis frame.
    pub fn set_x_frame(&mut self, frame: AxisFrame) {
        self.x = Some(frame);
    }

    /// Replace the vertical axis frame.
    pub fn set_y_frame(&mut self, frame: AxisFrame) {
        self.y = Some(frame);
    }

    /// Visible spines.
    #[must_use]
    pub fn spines(&self) -> Spines {
        self.spines
    }

    /// Change spine visibility.
    pub fn set_spines(&mut self, spines: Spines) {
        self.spines = spines;
    }

    /// Horizontal and vertical tick decoration.
    #[must_use]
    pub fn decor(&self) -> (AxisDecor, AxisDecor) {
        (self.x_decor, self.y_decor)
    }

    /// Title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Horizontal axis label, if set.
    #[must_use]
    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    /// Set the horizontal axis label.
    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    /// Vertical axis label, if set.
    #[must_use]
    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    /// Set the vertical axis label.
    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    /// Whether a legend is drawn.
    #[must_use]
    pub fn has_legend(&self) -> bool {
        self.legend
    }

    /// Enable or disable the legend.
    pub fn set_legend(&mut self, show: bool) {
        self.legend = show;
    }

    /// Recorded marks in drawing order.
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Record a mark.
    pub fn add_mark(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Labeled series, in drawing order.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<(&str, Rgba)> {
        self.marks
            .iter()
            .filter_map(|mark| match mark {
                Mark::Line {
                    label: Some(label),
                    color,
                    ..
                } => Some((label.as_str(), *color)),
                _ => None,
            })
            .collect()
    }

    fn x_scale(&self) -> LinearScale {
        axis_scale(self.x.as_ref(), (self.rect.x, self.rect.right()))
    }

    fn y_scale(&self) -> LinearScale {
        axis_scale(self.y.as_ref(), (self.rect.bottom(), self.rect.y))
    }
}

/// Scale for one axis; a missing or unusable frame falls back to the unit interval.
fn axis_scale(frame: Option<&AxisFrame>, range: (f32, f32)) -> LinearScale {
    let Some(frame) = frame else {
        return LinearScale::unit(range);
    };
    let (lo, hi) = frame.limits();
    LinearScale::new((lo, hi), range)
        .or_else(|_| LinearScale::new((lo - 0.5, hi + 0.5), range))
        .unwrap_or_else(|_| LinearScale::unit(range))
}

// ============================================================================
// Figure
// ============================================================================

/// An owned canvas holding one or more surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width: u32,
    height: u32,
    style: Style,
    surfaces: Vec<Surface>,
}

impl Figure {
    /// Create an empty figure of `size` inches at the style's dpi.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the size rounds to zero pixels.
    pub fn new(size: FigureSize, style: Style) -> Result<Self> {
        let (width, height) = size.pixels(style.dpi)?;
        Ok(Self {
            width,
            height,
            style,
            surfaces: Vec::new(),
        })
    }

    /// Create a figure with a single blank surface, ready for `draw_on`.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe::figure::Figure;
    /// use inkframe::style::{FigureSize, Style};
    ///
    /// let (figure, id) = Figure::with_surface(FigureSize::DEFAULT, Style::default()).unwrap();
    /// assert!(figure.surface(id).unwrap().marks().is_empty());
    /// ```
    pub fn with_surface(size: FigureSize, style: Style) -> Result<(Self, SurfaceId)> {
        let mut figure = Self::new(size, style)?;
        let layout = crate::layout::compose(
            crate::layout::PanelKind::Single,
            crate::layout::Extents::default(),
            &figure.style,
            figure.size(),
        )?;
        let ids = figure.add_layout(layout);
        Ok((figure, ids[0]))
    }

    /// Canvas size in pixels.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The style used for export.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Add one surface.
    pub fn add_surface(&mut self, layout: SurfaceLayout) -> SurfaceId {
        self.surfaces.push(layout.into());
        SurfaceId(self.surfaces.len() - 1)
    }

    /// Add every surface of a composed layout, main first.
    pub fn add_layout(&mut self, layout: PanelLayout) -> Vec<SurfaceId> {
        layout.into_surfaces().into_iter().map(|s| self.add_surface(s)).collect()
    }

    /// All surfaces.
    #[must_use]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Surface by handle.
    #[must_use]
    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id.0)
    }

    /// Mutable surface by handle, for further customization.
    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.get_mut(id.0)
    }

    /// Mutable surface by handle, or a layout error naming the handle.
    pub(crate) fn require_surface(&mut self, id: SurfaceId) -> Result<&mut Surface> {
        let count = self.surfaces.len();
        self.surfaces.get_mut(id.0).ok_or_else(|| {
            Error::LayoutUnsupported(format!(
                "surface {} does not exist (figure has {count})",
                id.0
            ))
        })
    }

    /// Lower every surface to pixel-space elements in paint order.
    #[must_use]
    pub fn display_list(&self) -> Vec<SvgElement> {
        let mut out = Vec::new();
        for surface in &self.surfaces {
            SurfacePainter {
                style: &self.style,
                surface,
                out: &mut out,
            }
            .paint();
        }
        out
    }

    /// Render as an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut encoder =
            SvgEncoder::new(self.width, self.height).background(Some(self.style.background));
        for element in self.display_list() {
            encoder.add_element(element);
        }
        encoder.render()
    }

    /// Rasterize into a framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for an empty canvas.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.style.background);
        for element in self.display_list() {
            rasterize(&mut fb, &element);
        }
        Ok(fb)
    }

    /// Rasterize and encode as PNG.
    ///
    /// # Errors
    ///
    /// Propagates [`Figure::to_framebuffer`] and PNG encoding errors.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(&self.to_framebuffer()?)
    }
}

fn rasterize(fb: &mut Framebuffer, element: &SvgElement) {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            render::fill_rect(fb, Rect::new(*x, *y, *width, *height), *fill);
        }
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => {
            let center = Point::new(*cx, *cy);
            if let Some(fill) = fill {
                render::draw_disc(fb, center, *r, *fill);
            }
            if let Some(stroke) = stroke {
                render::draw_ring(fb, center, *r, *stroke_width, *stroke);
            }
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            if x1 == x2 {
                render::draw_vline(fb, *x1, *y1, *y2, *stroke_width, *stroke);
            } else if y1 == y2 {
                render::draw_hline(fb, *x1, *x2, *y1, *stroke_width, *stroke);
            } else {
                let (from, to) = (Point::new(*x1, *y1), Point::new(*x2, *y2));
                render::draw_segment(fb, from, to, *stroke_width, *stroke);
            }
        }
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
            render::draw_polyline(fb, &points, *stroke_width, *stroke);
        }
        SvgElement::Text { .. } => {}
    }
}

// ============================================================================
// Painting
// ============================================================================

struct SurfacePainter<'a> {
    style: &'a Style,
    surface: &'a Surface,
    out: &'a mut Vec<SvgElement>,
}

impl SurfacePainter<'_> {
    fn paint(mut self) {
        let sx = self.surface.x_scale();
        let sy = self.surface.y_scale();

        if self.style.show_grid {
            self.grid(&sy);
        }
        let surface = self.surface;
        for mark in &surface.marks {
            self.mark(mark, &sx, &sy);
        }
        self.spines(&sx, &sy);
        let tick_label_width = self.ticks(&sx, &sy);
        self.labels(tick_label_width);
        if self.surface.legend {
            self.legend();
        }
    }

    fn px(&self, points: f32) -> f32 {
        self.style.pt(points)
    }

    fn grid(&mut self, sy: &LinearScale) {
        let Some(frame) = &self.surface.y else { return };
        let rect = self.surface.rect;
        let stroke = self.style.grid_color.with_opacity(self.style.grid_alpha);
        let stroke_width = self.px(self.style.grid_width);
        for t in frame.ticks().iter() {
            let y = sy.scale(t);
            self.out.push(SvgElement::Line {
                x1: rect.x,
                y1: y,
                x2: rect.right(),
                y2: y,
                stroke,
                stroke_width,
            });
        }
    }

    fn mark(&mut self, mark: &Mark, sx: &LinearScale, sy: &LinearScale) {
        match mark {
            Mark::Bars { bars, color } => {
                for bar in bars {
                    let (x0, x1) = (sx.scale(bar.start), sx.scale(bar.end));
                    let (y0, y1) = (sy.scale(0.0), sy.scale(bar.value));
                    self.out.push(SvgElement::Rect {
                        x: x0.min(x1),
                        y: y0.min(y1),
                        width: (x1 - x0).abs(),
                        height: (y1 - y0).abs(),
                        fill: *color,
                    });
                }
            }
            Mark::HBars { bars, color } => {
                for bar in bars {
                    let (x0, x1) = (sx.scale(0.0), sx.scale(bar.value));
                    let (y0, y1) = (sy.scale(bar.start), sy.scale(bar.end));
                    self.out.push(SvgElement::Rect {
                        x: x0.min(x1),
                        y: y0.min(y1),
                        width: (x1 - x0).abs(),
                        height: (y1 - y0).abs(),
                        fill: *color,
                    });
                }
            }
            Mark::Line {
                points,
                color,
                width,
                markers,
                ..
            } => {
                let pixels: Vec<(f32, f32)> =
                    points.iter().map(|&(x, y)| (sx.scale(x), sy.scale(y))).collect();
                let line_width = self.px(*width);
                let vertices = if *markers { pixels.clone() } else { Vec::new() };
                self.out.push(SvgElement::Polyline {
                    points: pixels,
                    stroke: *color,
                    stroke_width: line_width,
                });
                let r = self.px(self.style.line_marker_size) / 2.0;
                let stroke_width = self.px(1.0);
                for (cx, cy) in vertices {
                    self.out.push(SvgElement::Circle {
                        cx,
                        cy,
                        r,
                        fill: None,
                        stroke: Some(*color),
                        stroke_width,
                    });
                }
            }
            Mark::Points {
                points,
                color,
                size,
            } => {
                let r = self.px(size.max(0.0).sqrt()) / 2.0;
                for &(x, y) in points {
                    self.out.push(SvgElement::Circle {
                        cx: sx.scale(x),
                        cy: sy.scale(y),
                        r,
                        fill: Some(*color),
                        stroke: None,
                        stroke_width: 0.0,
                    });
                }
            }
        }
    }

    /// Range-frame spines: each runs only across its axis extent.
    fn spines(&mut self, sx: &LinearScale, sy: &LinearScale) {
        let rect = self.surface.rect;
        let spines = self.surface.spines;
        let stroke = self.style.spine_color;
        let stroke_width = self.px(self.style.spine_width);

        let x_span = self.surface.x.as_ref().map_or((rect.x, rect.right()), |f| {
            (sx.scale(f.extent().lo()), sx.scale(f.extent().hi()))
        });
        let y_span = self.surface.y.as_ref().map_or((rect.bottom(), rect.y), |f| {
            (sy.scale(f.extent().lo()), sy.scale(f.extent().hi()))
        });

        let mut line = |x1: f32, y1: f32, x2: f32, y2: f32| {
            self.out.push(SvgElement::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
            });
        };
        if spines.bottom {
            line(x_span.0, rect.bottom(), x_span.1, rect.bottom());
        }
        if spines.top {
            line(x_span.0, rect.y, x_span.1, rect.y);
        }
        if spines.left {
            line(rect.x, y_span.0, rect.x, y_span.1);
        }
        if spines.right {
            line(rect.right(), y_span.0, rect.right(), y_span.1);
        }
    }

    /// Outward ticks on the bottom and left edges. Returns the estimated width of the widest
    /// vertical tick label.
    fn ticks(&mut self, sx: &LinearScale, sy: &LinearScale) -> f32 {
        let rect = self.surface.rect;
        let stroke = self.style.spine_color;
        let stroke_width = self.px(self.style.tick_width);
        let len = self.px(self.style.tick_length);
        let pad = self.px(self.style.tick_pad);
        let font = self.px(self.style.tick_label_size);
        let (x_decor, y_decor) = (self.surface.x_decor, self.surface.y_decor);

        if let Some(frame) = self.surface.x.as_ref().filter(|_| x_decor.ticks) {
            let labels = frame.ticks().labels();
            for (t, label) in frame.ticks().iter().zip(labels) {
                let x = sx.scale(t);
                let y = rect.bottom();
                self.out.push(SvgElement::Line {
                    x1: x,
                    y1: y,
                    x2: x,
                    y2: y + len,
                    stroke,
                    stroke_width,
                });
                if x_decor.labels {
                    self.out.push(SvgElement::Text {
                        x,
                        y: y + len + pad + font,
                        text: label,
                        font_size: font,
                        fill: self.style.text_color,
                        anchor: TextAnchor::Middle,
                        rotate: 0.0,
                    });
                }
            }
        }

        let mut widest = 0.0_f32;
        if let Some(frame) = self.surface.y.as_ref().filter(|_| y_decor.ticks) {
            let labels = frame.ticks().labels();
            for (t, label) in frame.ticks().iter().zip(labels) {
                let y = sy.scale(t);
                let x = rect.x;
                self.out.push(SvgElement::Line {
                    x1: x - len,
                    y1: y,
                    x2: x,
                    y2: y,
                    stroke,
                    stroke_width,
                });
                if y_decor.labels {
                    widest = widest.max(text_width(&label, font));
                    self.out.push(SvgElement::Text {
                        x: x - len - pad,
                        y: y + font * 0.35,
                        text: label,
                        font_size: font,
                        fill: self.style.text_color,
                        anchor: TextAnchor::End,
                        rotate: 0.0,
                    });
                }
            }
        }
        widest
    }

    fn labels(&mut self, tick_label_width: f32) {
        let rect = self.surface.rect;
        let fill = self.style.text_color;
        let len = self.px(self.style.tick_length);
        let pad = self.px(self.style.tick_pad);
        let label_pad = self.px(self.style.label_pad);
        let tick_font = self.px(self.style.tick_label_size);
        let label_font = self.px(self.style.label_size);
        let title_pad = self.px(self.style.title_pad);
        let title_font = self.px(self.style.title_size);

        if let Some(title) = &self.surface.title {
            self.out.push(SvgElement::Text {
                x: rect.center().x,
                y: rect.y - title_pad,
                text: title.clone(),
                font_size: title_font,
                fill,
                anchor: TextAnchor::Middle,
                rotate: 0.0,
            });
        }
        if let Some(xlabel) = &self.surface.xlabel {
            self.out.push(SvgElement::Text {
                x: rect.center().x,
                y: rect.bottom() + len + pad + tick_font + label_pad + label_font,
                text: xlabel.clone(),
                font_size: label_font,
                fill,
                anchor: TextAnchor::Middle,
                rotate: 0.0,
            });
        }
        if let Some(ylabel) = &self.surface.ylabel {
            self.out.push(SvgElement::Text {
                x: rect.x - len - pad - tick_label_width - label_pad,
                y: rect.center().y,
                text: ylabel.clone(),
                font_size: label_font,
                fill,
                anchor: TextAnchor::Middle,
                rotate: -90.0,
            });
        }
    }

    /// Frameless legend in the upper-right corner: a short line sample and the label per series.
    fn legend(&mut self) {
        let entries = self.surface.legend_entries();
        if entries.is_empty() {
            return;
        }
        let rect = self.surface.rect;
        let font = self.px(self.style.legend_size);
        let sample = 2.0 * font;
        let gap = 0.5 * font;
        let row = 1.4 * font;
        let widest = entries.iter().map(|(label, _)| text_width(label, font)).fold(0.0, f32::max);
        let x0 = rect.right() - widest - sample - gap - font;
        let stroke_width = self.px(self.style.line_width);

        for (i, (label, color)) in entries.into_iter().enumerate() {
            let y = rect.y + font + row * i as f32;
            self.out.push(SvgElement::Line {
                x1: x0,
                y1: y,
                x2: x0 + sample,
                y2: y,
                stroke: color,
                stroke_width,
            });
            self.out.push(SvgElement::Text {
                x: x0 + sample + gap,
                y: y + font * 0.35,
                text: label.to_string(),
                font_size: font,
                fill: self.style.text_color,
                anchor: TextAnchor::Start,
                rotate: 0.0,
            });
        }
    }
}

/// Rough advance width of `text` at `font` pixels.
fn text_width(text: &str, font: f32) -> f32 {
    text.chars().count() as f32 * font * 0.55
}
