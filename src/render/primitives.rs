//! Primitive rasterization.
//!
//! Everything takes floating-point pixel coordinates. Rectangles snap to the pixel grid so
//! adjacent histogram bars neither overlap nor leave seams; lines and discs are anti-aliased by
//! coverage so each pixel is blended exactly once per primitive.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

// ============================================================================
// Rectangles
// ============================================================================

/// Fill a rectangle, snapping its edges to whole pixels.
///
/// A rectangle with positive size always covers at least one pixel in each direction.
pub fn fill_rect(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    let (x0, x1) = snap(rect.x, rect.right());
    let (y0, y1) = snap(rect.y, rect.bottom());
    if x1 > x0 && y1 > y0 {
        fb.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
    }
}

fn snap(a: f32, b: f32) -> (i64, i64) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if !lo.is_finite() || !hi.is_finite() {
        return (0, 0);
    }
    let start = lo.round() as i64;
    let mut end = hi.round() as i64;
    if end == start && hi > lo {
        end = start + 1;
    }
    (start, end)
}

/// Horizontal line from `x0` to `x1` centered on `y`.
pub fn draw_hline(fb: &mut Framebuffer, x0: f32, x1: f32, y: f32, width: f32, color: Rgba) {
    let rect = Rect::new(x0.min(x1), y - width / 2.0, (x1 - x0).abs(), width);
    fill_rect(fb, rect, color);
}

/// Vertical line from `y0` to `y1` centered on `x`.
pub fn draw_vline(fb: &mut Framebuffer, x: f32, y0: f32, y1: f32, width: f32, color: Rgba) {
    let rect = Rect::new(x - width / 2.0, y0.min(y1), width, (y1 - y0).abs());
    fill_rect(fb, rect, color);
}

// ============================================================================
// Lines
// ============================================================================

/// Draw a one-pixel anti-aliased line using Wu's algorithm.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba) {
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { (y1 - y0) / dx };
    let mut plot = |major: i64, minor: i64, coverage: f32| {
        if steep {
            fb.blend_coverage(minor, major, color, coverage);
        } else {
            fb.blend_coverage(major, minor, color, coverage);
        }
    };

    // First endpoint.
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i64;
    let ypxl1 = yend.floor() as i64;
    plot(xpxl1, ypxl1, rfpart(yend) * xgap);
    plot(xpxl1, ypxl1 + 1, fpart(yend) * xgap);
    let mut intery = yend + gradient;

    // Second endpoint.
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i64;
    let ypxl2 = yend.floor() as i64;
    if xpxl2 != xpxl1 {
        plot(xpxl2, ypxl2, rfpart(yend) * xgap);
        plot(xpxl2, ypxl2 + 1, fpart(yend) * xgap);
    }

    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i64;
        plot(x, ipart, rfpart(intery));
        plot(x, ipart + 1, fpart(intery));
        intery += gradient;
    }
}

#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

/// Draw a segment of arbitrary width with round caps.
///
/// Widths up to one pixel fall back to [`draw_line_aa`].
pub fn draw_segment(fb: &mut Framebuffer, from: Point, to: Point, width: f32, color: Rgba) {
    if width <= 1.0 {
        draw_line_aa(fb, from, to, color.with_opacity(width.max(0.0)));
        return;
    }

    let half = width / 2.0;
    let bounds = Rect::from_corners(
        Point::new(from.x.min(to.x) - half - 1.0, from.y.min(to.y) - half - 1.0),
        Point::new(from.x.max(to.x) + half + 1.0, from.y.max(to.y) + half + 1.0),
    );
    for_each_pixel(fb, bounds, |center| {
        let d = distance_to_segment(center, from, to);
        (half + 0.5 - d).clamp(0.0, 1.0)
    }, color);
}

/// Draw connected segments through `points`.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], width: f32, color: Rgba) {
    match points {
        [] => {}
        [only] => draw_disc(fb, *only, width / 2.0, color),
        _ => {
            for pair in points.windows(2) {
                draw_segment(fb, pair[0], pair[1], width, color);
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * abx, a.y + t * aby))
}

// ============================================================================
// Circles
// ============================================================================

/// Fill an anti-aliased disc.
pub fn draw_disc(fb: &mut Framebuffer, center: Point, radius: f32, color: Rgba) {
    let radius = radius.max(0.5);
    let bounds = Rect::new(
        center.x - radius - 1.0,
        center.y - radius - 1.0,
        2.0 * radius + 2.0,
        2.0 * radius + 2.0,
    );
    for_each_pixel(fb, bounds, |p| (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0), color);
}

/// Stroke an anti-aliased circle outline.
pub fn draw_ring(fb: &mut Framebuffer, center: Point, radius: f32, width: f32, color: Rgba) {
    let half = width.max(1.0) / 2.0;
    let outer = radius + half;
    let bounds = Rect::new(
        center.x - outer - 1.0,
        center.y - outer - 1.0,
        2.0 * outer + 2.0,
        2.0 * outer + 2.0,
    );
    for_each_pixel(
        fb,
        bounds,
        |p| (half + 0.5 - (p.distance(center) - radius).abs()).clamp(0.0, 1.0),
        color,
    );
}

/// Visit every pixel whose center lies in `bounds` and blend `color` by the returned coverage.
fn for_each_pixel(
    fb: &mut Framebuffer,
    bounds: Rect,
    coverage: impl Fn(Point) -> f32,
    color: Rgba,
) {
    let x0 = bounds.x.floor().max(0.0) as i64;
    let y0 = bounds.y.floor().max(0.0) as i64;
    let x1 = (bounds.right().ceil() as i64).min(i64::from(fb.width()));
    let y1 = (bounds.bottom().ceil() as i64).min(i64::from(fb.height()));

    for y in y0..y1 {
        for x in x0..x1 {
            let c = coverage(Point::new(x as f32 + 0.5, y as f32 + 0.5));
            if c > 0.0 {
                fb.blend_coverage(x, y, color, c);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
