//! SVG output encoder.
//!
//! Figures are emitted as flat vector documents: one element per bar, point, spine, tick and
//! text run. Unlike the raster path, SVG output carries titles, labels and tick labels.

use crate::color::Rgba;
use std::fmt::Write as FmtWrite;

/// Font stack for all text.
const FONT_FAMILY: &str = "Palatino, Georgia, 'Times New Roman', serif";

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Filled rectangle without stroke.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
    },
    /// Circle; `fill: None` draws an outline only.
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Straight line.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Open polyline.
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text run, optionally rotated about its anchor.
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    },
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

impl SvgEncoder {
    /// Create an empty document with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (`None` for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Append an element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, css(bg));
        }
        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }
        svg.push_str("</svg>\n");
        svg
    }
}

/// CSS color string.
fn css(color: Rgba) -> String {
    if color.is_opaque() {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!("rgba({},{},{},{:.3})", color.r, color.g, color.b, f32::from(color.a) / 255.0)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{}"/>"#,
            css(*fill)
        ),
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), css);
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width:.2}""#, css(s)))
                .unwrap_or_default();
            format!(r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{fill_attr}"{stroke_attr}/>"#)
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => format!(
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{stroke_width:.2}"/>"#,
            css(*stroke)
        ),
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let points_str =
                points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect::<Vec<_>>().join(" ");
            format!(
                r#"<polyline points="{points_str}" fill="none" stroke="{}" stroke-width="{stroke_width:.2}" stroke-linejoin="round"/>"#,
                css(*stroke)
            )
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            rotate,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = if *rotate == 0.0 {
                String::new()
            } else {
                format!(r#" transform="rotate({rotate} {x:.2} {y:.2})""#)
            };
            format!(
                r#"<text x="{x:.2}" y="{y:.2}" font-size="{font_size:.2}" fill="{}" text-anchor="{anchor_str}" font-family="{FONT_FAMILY}"{transform}>{}</text>"#,
                css(*fill),
                escape(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("fill=\"rgb(255,255,255)\""));
    }

    #[test]
    fn test_transparent_background() {
        let svg = SvgEncoder::new(10, 10).background(None).render();
        assert!(!svg.contains("100%"));
    }

    #[test]
    fn test_translucent_fill() {
        let mut enc = SvgEncoder::new(10, 10);
        enc.add_element(SvgElement::Rect {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
            fill: Rgba::BLACK.with_opacity(0.6),
        });
        assert!(enc.render().contains("rgba(0,0,0,0.600)"));
    }

    #[test]
    fn test_hollow_circle() {
        let mut enc = SvgEncoder::new(10, 10);
        enc.add_element(SvgElement::Circle {
            cx: 5.0,
            cy: 5.0,
            r: 2.0,
            fill: None,
            stroke: Some(Rgba::DARK_GRAY),
            stroke_width: 1.0,
        });
        let svg = enc.render();
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r#"stroke="rgb(102,102,102)""#));
    }

    #[test]
    fn test_text_escaped_and_rotated() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.add_element(SvgElement::Text {
            x: 10.0,
            y: 50.0,
            text: "a < b & c".to_string(),
            font_size: 11.0,
            fill: Rgba::BLACK,
            anchor: TextAnchor::Middle,
            rotate: -90.0,
        });
        let svg = enc.render();
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(svg.contains("rotate(-90 10.00 50.00)"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert_eq!(enc.elements().len(), 1);
    }

    #[test]
    fn test_polyline_points() {
        let mut enc = SvgEncoder::new(10, 10);
        enc.add_element(SvgElement::Polyline {
            points: vec![(0.0, 0.0), (1.5, 2.0)],
            stroke: Rgba::BLACK,
            stroke_width: 2.0,
        });
        assert!(enc.render().contains(r#"points="0.00,0.00 1.50,2.00""#));
    }
}
