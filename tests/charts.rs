//! End-to-end chart tests: public entry points, error reporting and exported output.
//!
//! Run: RUST_LOG=inkframe=debug cargo test --test charts -- --nocapture
#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use inkframe::figure::Mark;
use inkframe::input::{Column, RawData, RawValue};
use inkframe::output::SvgElement;
use inkframe::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Error reporting
// ============================================================================

#[test]
fn empty_input_is_reported_by_name() {
    let err = histogram(&Vec::<f64>::new()).unwrap_err();
    assert!(matches!(&err, Error::EmptyData { name } if name == "data"));
    assert_eq!(err.to_string(), "data is empty");
}

#[test]
fn all_nan_input_is_rejected() {
    let err = histogram(&[f64::NAN, f64::NAN]).unwrap_err();
    assert!(matches!(err, Error::AllNonFinite { .. }));
}

#[test]
fn mismatched_lengths_name_both_sides() {
    let err = scatter(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
    match &err {
        Error::LengthMismatch {
            x_name,
            x_len,
            y_name,
            y_len,
        } => {
            assert_eq!((x_name.as_str(), *x_len), ("x", 3));
            assert_eq!((y_name.as_str(), *y_len), ("y", 2));
        }
        other => panic!("expected a length mismatch, got {other:?}"),
    }
    assert!(err.to_string().starts_with("x and y must have the same length"));
}

#[test]
fn partial_nan_surfaces_as_non_finite_range() {
    init_tracing();
    let err = line(&[0.0, 1.0, 2.0], &[1.0, 2.0, f64::NAN]).unwrap_err();
    assert!(matches!(err, Error::NonFiniteRange { .. }));
    assert!(err.to_string().contains("Non-finite data range"));

    let err = histogram(&[1.0, f64::INFINITY]).unwrap_err();
    assert!(err.to_string().contains("inf"));
}

#[test]
fn errors_are_deterministic() {
    let first = histogram(&[1.0, 2.0, f64::NAN]).unwrap_err().to_string();
    let second = histogram(&[1.0, 2.0, f64::NAN]).unwrap_err().to_string();
    assert_eq!(first, second);
}

#[test]
fn text_cells_are_rejected_at_the_boundary() {
    let raw = RawData::values([RawValue::from(1.0), RawValue::from("two")]);
    let err = histogram(&raw).unwrap_err();
    assert!(matches!(err, Error::InvalidInputType { .. }));
    assert!(err.to_string().contains("\"two\""));
}

#[test]
fn unknown_bin_rule_lists_alternatives() {
    let err = BinSpec::named("golden").unwrap_err();
    assert!(err.to_string().contains("sturges"));
}

// ============================================================================
// Chart semantics
// ============================================================================

#[test]
fn histogram_of_one_value() {
    init_tracing();
    let (figure, id) = histogram(&[5.0]).unwrap();
    let surface = figure.surface(id).unwrap();

    let Mark::Bars { bars, .. } = &surface.marks()[0] else { panic!("expected bars") };
    assert_eq!(bars.len(), 1);
    assert_abs_diff_eq!(bars[0].value, 100.0);

    let x = surface.x_frame().unwrap();
    assert_eq!((x.extent().lo(), x.extent().hi()), (5.0, 5.0));
    assert!(!x.ticks().is_empty());
}

#[test]
fn histogram_percentages_sum_to_one_hundred() {
    let data: Vec<f64> = (0..1000).map(|i| (f64::from(i) * 0.618).sin() * 3.0).collect();
    let binned = bin_and_normalize(&normalize(&data).unwrap(), &BinSpec::default()).unwrap();
    let sum: f64 = binned.bins().iter().map(|b| b.percentage).sum();
    assert_abs_diff_eq!(sum, 100.0, epsilon = 1e-9);
    assert_eq!(binned.total(), 1000);
}

#[test]
fn line_frames_follow_the_data() {
    let (figure, id) = line(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
    let surface = figure.surface(id).unwrap();
    let y = surface.y_frame().unwrap();
    assert_eq!((y.extent().lo(), y.extent().hi()), (0.0, 4.0));
    assert!(y.ticks().len() <= 7);
    assert!(y.ticks().iter().all(|t| (0.0..=4.0).contains(&t)));
}

#[test]
fn labeled_columns_feed_line_legends() {
    let x = Column::new("epoch", 0..5);
    let loss = Column::new("loss", [0.9, 0.5, 0.3, 0.2, 0.15]);
    let (figure, id) = LineChart::new()
        .labels_from(["training loss"])
        .xlabel("epoch")
        .draw(&x, std::slice::from_ref(&loss))
        .unwrap();
    let surface = figure.surface(id).unwrap();
    assert!(surface.has_legend());
    assert_eq!(surface.legend_entries()[0].0, "training loss");
}

#[test]
fn nested_rows_are_flattened() {
    let raw = RawData::Nested(vec![RawData::values([1.0, 2.0]), RawData::values([3.0, 4.0])]);
    let (figure, id) = Histogram::new().bins(2).draw(&raw).unwrap();
    let Mark::Bars { bars, .. } = &figure.surface(id).unwrap().marks()[0] else {
        panic!("expected bars")
    };
    assert_eq!(bars.iter().map(|b| b.value).collect::<Vec<_>>(), vec![50.0, 50.0]);
}

#[test]
fn scatter_with_marginals_lays_out_an_l_shape() {
    let x: Vec<f64> = (0..40).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| v * v / 10.0).collect();
    let (figure, axes) = ScatterPlot::new().marginals(true).draw(&x, &y).unwrap();
    let ScatterAxes::Marginal { main, top, right } = axes else { panic!("expected marginals") };

    let main = figure.surface(main).unwrap().rect();
    let top = figure.surface(top).unwrap().rect();
    let right = figure.surface(right).unwrap().rect();
    assert_eq!((top.x, top.width), (main.x, main.width));
    assert_eq!((right.y, right.height), (main.y, main.height));
    assert!(top.bottom() < main.y);
    assert!(right.x > main.right());
}

#[test]
fn large_magnitude_with_small_span_still_builds() {
    let (figure, id) = line(&[0.0, 1.0], &[1e17, 1e17 + 16.0]).unwrap();
    let y = figure.surface(id).unwrap().y_frame().unwrap();
    assert!(!y.ticks().is_empty());
    assert!(y.ticks().iter().all(|t| (1e17..=1e17 + 16.0).contains(&t)));

    let (figure, id) = histogram(&[1e17, 1e17 + 16.0, 1e17]).unwrap();
    let Mark::Bars { bars, .. } = &figure.surface(id).unwrap().marks()[0] else {
        panic!("expected bars")
    };
    assert!(bars.iter().all(|b| b.start < b.end));
}

#[test]
fn ranges_wider_than_f64_max_stay_on_canvas() {
    let (figure, _) = histogram(&[-1e308, 1e308]).unwrap();
    let (width, height) = figure.size();
    let on_canvas = |x: f32, y: f32| {
        (-1.0..=width as f32 + 1.0).contains(&x) && (-1.0..=height as f32 + 1.0).contains(&y)
    };

    for element in figure.display_list() {
        if let SvgElement::Rect {
            x,
            y,
            width,
            height,
            ..
        } = element
        {
            assert!(on_canvas(x, y), "rect at {x}, {y}");
            assert!(on_canvas(x + width, y + height), "rect to {}, {}", x + width, y + height);
        }
    }

    let (figure, _) = scatter(&[-f64::MAX, 0.0, f64::MAX], &[1.0, 2.0, 3.0]).unwrap();
    let centers: Vec<(f32, f32)> = figure
        .display_list()
        .into_iter()
        .filter_map(|e| match e {
            SvgElement::Circle { cx, cy, .. } => Some((cx, cy)),
            _ => None,
        })
        .collect();
    assert_eq!(centers.len(), 3);
    assert!(centers.iter().all(|&(x, y)| on_canvas(x, y)));
    assert!(centers[0].0 < centers[1].0 && centers[1].0 < centers[2].0);
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn spines_stop_at_the_data() {
    let (figure, id) = scatter(&[1.0, 2.0, 3.0], &[10.0, 30.0, 20.0]).unwrap();
    let rect = figure.surface(id.main()).unwrap().rect();
    let spine_width = figure.style().pt(figure.style().spine_width);

    let bottom = figure
        .display_list()
        .into_iter()
        .find_map(|e| match e {
            SvgElement::Line {
                x1,
                y1,
                x2,
                y2,
                stroke_width,
                ..
            } if y1 == y2 && y1 == rect.bottom() && stroke_width == spine_width => {
                Some((x1, x2))
            }
            _ => None,
        })
        .unwrap();
    assert!(bottom.0 > rect.x);
    assert!(bottom.1 < rect.right());
}

#[test]
fn svg_carries_text() {
    let (figure, _) = Histogram::new()
        .title("Latency & jitter")
        .xlabel("ms")
        .draw(&[1.0, 2.0, 2.0, 3.0])
        .unwrap();
    let svg = figure.to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Latency &amp; jitter"));
    assert!(svg.contains(">Percentage</text>"));
    assert!(svg.contains(">ms</text>"));
}

#[test]
fn png_round_trips_through_a_decoder() {
    let (figure, _) = line(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 2.0, 4.0]).unwrap();
    let bytes = figure.to_png().unwrap();

    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().unwrap();
    assert_eq!((reader.info().width, reader.info().height), figure.size());
}

#[test]
fn custom_style_reaches_the_figure() {
    let style = Style::print().grid(true);
    let (figure, _) = Histogram::new().style(style).draw(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(figure.size(), (2400, 1500));
    assert!(figure.style().show_grid);
}
