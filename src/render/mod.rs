//! Rasterization of chart primitives.
//!
//! # Algorithms
//!
//! - **Wu's anti-aliased line** for hairlines
//! - **Coverage sampling** for wide segments, discs and rings
//! - **Grid-snapped rectangles** for bars, spines and ticks
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

mod primitives;

pub use primitives::{
    draw_disc, draw_hline, draw_line_aa, draw_polyline, draw_ring, draw_segment, draw_vline,
    fill_rect,
};
