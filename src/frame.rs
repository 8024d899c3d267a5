//! Range frames: data-driven axis extents and reduced tick sets.
//!
//! A range frame draws each axis spine only across the data it covers. The spine runs over the
//! [`Extent`] (exact min/max, never padded), ticks land on "nice" multiples of 1, 2 or 5 × 10^k
//! inside that extent, and the view limits add a small margin so marks at the edges are not
//! clipped.

use crate::error::{Error, Result};
use crate::input::NumericVector;

/// Default upper bound on the number of ticks per axis.
pub const DEFAULT_MAX_TICKS: usize = 7;

/// Half-width used to pad a degenerate extent at zero.
const ZERO_PAD: f64 = 0.5;

/// Relative pad applied to a degenerate extent away from zero.
const RELATIVE_PAD: f64 = 0.1;

/// Beyond 2^53 consecutive integers are no longer distinct as `f64`.
const MAX_EXACT_MULTIPLE: f64 = 9_007_199_254_740_992.0;

// ============================================================================
// Extent
// ============================================================================

/// Closed data range `[lo, hi]` with finite bounds and `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    lo: f64,
    hi: f64,
}

impl Extent {
    /// Create an extent from two bounds, in either order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteRange`] if either bound is NaN or infinite.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(Error::NonFiniteRange { lo: a, hi: b });
        }
        Ok(if a <= b { Self { lo: a, hi: b } } else { Self { lo: b, hi: a } })
    }

    /// Exact `(min, max)` of `values`.
    ///
    /// NaN anywhere in the input makes both bounds NaN, so contamination is never silently
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteRange`] for empty input or when a bound is not finite.
    pub fn of(values: &[f64]) -> Result<Self> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in values {
            if v.is_nan() {
                return Err(Error::NonFiniteRange {
                    lo: f64::NAN,
                    hi: f64::NAN,
                });
            }
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return Err(Error::NonFiniteRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound.
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// `hi - lo`, saturating at `f64::MAX`.
    #[must_use]
    pub fn span(&self) -> f64 {
        (self.hi - self.lo).min(f64::MAX)
    }

    /// Returns true when all data sits on a single value.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    /// Returns true if `value` lies inside the closed range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    /// Smallest extent covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Bounds used for tick placement: the extent itself, or a symmetric pad when degenerate.
    #[must_use]
    pub fn tick_bounds(&self) -> (f64, f64) {
        if !self.is_degenerate() {
            return (self.lo, self.hi);
        }
        let v = self.lo;
        let pad = if v == 0.0 { ZERO_PAD } else { v.abs() * RELATIVE_PAD };
        ((v - pad).max(f64::MIN), (v + pad).min(f64::MAX))
    }

    /// View limits: the extent widened by `fraction` of its span on each side, or by 0.5 when
    /// degenerate. The result is clamped to finite values.
    #[must_use]
    pub fn padded(&self, fraction: f64) -> (f64, f64) {
        let span = self.span();
        let (lo, hi) = if span == 0.0 {
            // Far from zero 0.5 can vanish below the float spacing.
            let pad = ZERO_PAD.max(self.lo.abs() * f64::EPSILON);
            (self.lo - pad, self.hi + pad)
        } else {
            (self.lo - fraction * span, self.hi + fraction * span)
        };
        (lo.max(f64::MIN), hi.min(f64::MAX))
    }
}

/// Compute the exact extent of a validated vector.
///
/// # Errors
///
/// Returns [`Error::NonFiniteRange`] when the vector mixes finite and NaN/infinite values.
///
/// # Example
///
/// ```
/// use inkframe::frame::compute_extent;
/// use inkframe::input::normalize;
///
/// let extent = compute_extent(&normalize(&[3.0, -1.0, 2.0]).unwrap()).unwrap();
/// assert_eq!((extent.lo(), extent.hi()), (-1.0, 3.0));
///
/// assert!(compute_extent(&normalize(&[1.0, 2.0, f64::NAN]).unwrap()).is_err());
/// ```
pub fn compute_extent(vector: &NumericVector) -> Result<Extent> {
    Extent::of(vector.as_slice())
}

// ============================================================================
// Ticks
// ============================================================================

/// A nice step `mantissa × 10^exponent` with `mantissa ∈ {1, 2, 5}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NiceStep {
    mantissa: u8,
    exponent: i32,
}

impl NiceStep {
    /// Largest nice step not exceeding `raw` (`raw` must be positive and finite).
    fn floor(raw: f64) -> Self {
        let mut exponent = raw.log10().floor() as i32;
        let mut fraction = raw / pow10(exponent);
        // log10 can land one decade off near exact powers of ten.
        if fraction >= 10.0 {
            exponent += 1;
            fraction /= 10.0;
        } else if fraction < 1.0 {
            exponent -= 1;
            fraction *= 10.0;
        }

        let mantissa = if fraction >= 5.0 {
            5
        } else if fraction >= 2.0 {
            2
        } else {
            1
        };
        Self { mantissa, exponent }
    }

    /// Next larger nice step.
    fn next(self) -> Self {
        match self.mantissa {
            1 => Self {
                mantissa: 2,
                ..self
            },
            2 => Self {
                mantissa: 5,
                ..self
            },
            _ => Self {
                mantissa: 1,
                exponent: self.exponent + 1,
            },
        }
    }

    fn value(self) -> f64 {
        self.multiple(1.0)
    }

    /// `k × step`, dividing by a power of ten for fractional steps so that e.g. `3 × 0.1`
    /// comes out as `0.3`.
    fn multiple(self, k: f64) -> f64 {
        let m = k * f64::from(self.mantissa);
        if self.exponent >= 0 {
            m * pow10(self.exponent)
        } else {
            m / pow10(-self.exponent)
        }
    }

    /// Integer range of multiples lying in `[lo, hi]`.
    fn multiples_in(self, lo: f64, hi: f64) -> (f64, f64) {
        let step = self.value();
        let eps = 1e-9;
        ((lo / step - eps).ceil(), (hi / step + eps).floor())
    }
}

fn pow10(exponent: i32) -> f64 {
    10f64.powi(exponent)
}

/// Strictly increasing tick positions for one axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSet {
    positions: Vec<f64>,
    step: f64,
}

impl TickSet {
    /// Tick positions in increasing order.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Distance between neighbouring ticks (NaN when no regular grid could be placed).
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over positions.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.positions.iter().copied()
    }

    /// Format each tick with as many decimals as the step needs.
    ///
    /// ```
    /// use inkframe::frame::{compute_ticks, Extent};
    ///
    /// let ticks = compute_ticks(Extent::new(0.0, 1.0).unwrap(), 7);
    /// assert_eq!(ticks.labels(), vec!["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    /// ```
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let decimals = if self.step.is_normal() {
            (-(self.step.log10() + 1e-9).floor()).max(0.0) as usize
        } else {
            return self.positions.iter().map(ToString::to_string).collect();
        };
        self.positions.iter().map(|v| format!("{v:.decimals$}")).collect()
    }
}

/// Choose at most `max_ticks` nice tick positions inside `extent`.
///
/// A degenerate extent is padded (±0.5 at zero, ±10% of the magnitude otherwise) before placement
/// so at least one tick is always returned. `max_ticks` of zero is treated as one.
///
/// # Example
///
/// ```
/// use inkframe::frame::{compute_ticks, Extent};
///
/// let ticks = compute_ticks(Extent::new(0.0, 4.0).unwrap(), 7);
/// assert_eq!(ticks.positions(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
#[must_use]
pub fn compute_ticks(extent: Extent, max_ticks: usize) -> TickSet {
    let max_ticks = max_ticks.max(1);
    let (lo, hi) = extent.tick_bounds();
    let half_span = hi / 2.0 - lo / 2.0;
    let midpoint = lo / 2.0 + hi / 2.0;

    let raw = half_span / max_ticks as f64 * 2.0;
    if half_span <= 0.0 || !raw.is_normal() {
        return TickSet {
            positions: vec![midpoint],
            step: f64::NAN,
        };
    }

    let mut step = NiceStep::floor(raw);
    let mut previous: Option<TickSet> = None;
    // Each advance multiplies the step by at least 2, so this bounds the search generously.
    for _ in 0..64 {
        if !step.value().is_finite() {
            break;
        }
        let (k_lo, k_hi) = step.multiples_in(lo, hi);
        if k_lo.abs() > MAX_EXACT_MULTIPLE || k_hi.abs() > MAX_EXACT_MULTIPLE {
            break;
        }
        let count = k_hi - k_lo + 1.0;

        if count <= max_ticks as f64 {
            if count >= 1.0 {
                let positions = place(step, k_lo, count as usize, lo, hi);
                return TickSet {
                    positions,
                    step: step.value(),
                };
            }
            break;
        }
        if count <= 4.0 * max_ticks as f64 {
            previous = Some(TickSet {
                positions: place(step, k_lo, count as usize, lo, hi),
                step: step.value(),
            });
        }
        step = step.next();
    }

    // No multiple of the coarser step fits: keep the finer grid's tick nearest the middle.
    match previous {
        Some(grid) => {
            let nearest = grid
                .positions
                .iter()
                .copied()
                .min_by(|a, b| (a - midpoint).abs().total_cmp(&(b - midpoint).abs()))
                .unwrap_or(midpoint);
            TickSet {
                positions: vec![nearest],
                step: grid.step,
            }
        }
        None => TickSet {
            positions: vec![midpoint],
            step: f64::NAN,
        },
    }
}

/// `count` consecutive multiples of `step` starting at `k_lo`, clamped into `[lo, hi]`.
fn place(step: NiceStep, k_lo: f64, count: usize, lo: f64, hi: f64) -> Vec<f64> {
    let mut positions: Vec<f64> = Vec::with_capacity(count);
    for i in 0..count {
        let mut v = step.multiple(k_lo + i as f64).clamp(lo, hi);
        if v == 0.0 {
            v = 0.0;
        }
        if positions.last().map_or(true, |&last| v > last) {
            positions.push(v);
        }
    }
    positions
}

// ============================================================================
// Axis frame
// ============================================================================

/// Everything needed to draw one axis: spine bounds, view limits and ticks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisFrame {
    extent: Extent,
    limits: (f64, f64),
    ticks: TickSet,
}

impl AxisFrame {
    /// Build a frame from an extent, padding the view by `pad_fraction` of the span.
    #[must_use]
    pub fn new(extent: Extent, max_ticks: usize, pad_fraction: f64) -> Self {
        Self {
            extent,
            limits: extent.padded(pad_fraction),
            ticks: compute_ticks(extent, max_ticks),
        }
    }

    /// Replace the view limits.
    #[must_use]
    pub fn with_limits(mut self, lo: f64, hi: f64) -> Self {
        self.limits = (lo, hi);
        self
    }

    /// Spine bounds.
    #[must_use]
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// View limits `(lo, hi)`.
    #[must_use]
    pub const fn limits(&self) -> (f64, f64) {
        self.limits
    }

    /// Tick set.
    #[must_use]
    pub fn ticks(&self) -> &TickSet {
        &self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(lo: f64, hi: f64) -> Extent {
        Extent::new(lo, hi).unwrap()
    }

    #[test]
    fn test_extent_is_exact() {
        let e = Extent::of(&[0.5, -2.0, 7.25]).unwrap();
        assert_eq!(e.lo(), -2.0);
        assert_eq!(e.hi(), 7.25);
        assert_eq!(e.span(), 9.25);
    }

    #[test]
    fn test_extent_new_orders_bounds() {
        let e = Extent::new(3.0, 1.0).unwrap();
        assert_eq!((e.lo(), e.hi()), (1.0, 3.0));
    }

    #[test]
    fn test_extent_rejects_nan_and_infinity() {
        assert!(matches!(Extent::of(&[1.0, 2.0, f64::NAN]), Err(Error::NonFiniteRange { .. })));
        match Extent::of(&[1.0, f64::INFINITY]) {
            Err(Error::NonFiniteRange { lo, hi }) => {
                assert_eq!(lo, 1.0);
                assert_eq!(hi, f64::INFINITY);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(Extent::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_extent_empty_slice() {
        assert!(Extent::of(&[]).is_err());
    }

    #[test]
    fn test_extent_union() {
        let u = extent(0.0, 1.0).union(extent(-3.0, 0.5));
        assert_eq!((u.lo(), u.hi()), (-3.0, 1.0));
    }

    #[test]
    fn test_degenerate_tick_bounds() {
        assert_eq!(extent(0.0, 0.0).tick_bounds(), (-0.5, 0.5));
        let (lo, hi) = extent(5.0, 5.0).tick_bounds();
        assert!((lo - 4.5).abs() < 1e-12);
        assert!((hi - 5.5).abs() < 1e-12);
        let (lo, hi) = extent(-20.0, -20.0).tick_bounds();
        assert!((lo + 22.0).abs() < 1e-12);
        assert!((hi + 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_padded_limits() {
        assert_eq!(extent(0.0, 100.0).padded(0.02), (-2.0, 102.0));
        assert_eq!(extent(3.0, 3.0).padded(0.02), (2.5, 3.5));
    }

    fn nice(mantissa: u8, exponent: i32) -> NiceStep {
        NiceStep { mantissa, exponent }
    }

    #[test]
    fn test_nice_step_floor() {
        assert_eq!(NiceStep::floor(0.571), nice(5, -1));
        assert_eq!(NiceStep::floor(1.0), nice(1, 0));
        assert_eq!(NiceStep::floor(3.0), nice(2, 0));
        assert_eq!(NiceStep::floor(999.0), nice(5, 2));
        assert_eq!(NiceStep::floor(1000.0), nice(1, 3));
    }

    #[test]
    fn test_nice_step_next() {
        assert_eq!(nice(5, -1).next(), nice(1, 0));
        assert!((nice(2, -2).value() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_ticks_zero_to_four() {
        let ticks = compute_ticks(extent(0.0, 4.0), 7);
        assert_eq!(ticks.positions(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(ticks.step(), 1.0);
    }

    #[test]
    fn test_ticks_fractional_are_clean() {
        let ticks = compute_ticks(extent(0.0, 1.0), 7);
        assert_eq!(ticks.positions(), &[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_ticks_interior_when_endpoints_not_multiples() {
        let ticks = compute_ticks(extent(0.13, 9.87), 7);
        assert!(ticks.len() <= 7);
        assert!(ticks.positions().iter().all(|&t| (0.13..=9.87).contains(&t)));
        assert_eq!(ticks.positions(), &[2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_ticks_respect_max() {
        for max in 1..=10 {
            let ticks = compute_ticks(extent(-37.0, 1234.5), max);
            assert!(!ticks.is_empty());
            assert!(ticks.len() <= max, "max {max}: {:?}", ticks.positions());
        }
    }

    #[test]
    fn test_ticks_single_when_max_is_one() {
        let ticks = compute_ticks(extent(0.1, 0.9), 1);
        assert_eq!(ticks.len(), 1);
        assert!((ticks.positions()[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ticks_zero_max_treated_as_one() {
        assert_eq!(compute_ticks(extent(0.0, 10.0), 0).len(), 1);
    }

    #[test]
    fn test_ticks_degenerate() {
        let ticks = compute_ticks(extent(5.0, 5.0), 7);
        assert!(!ticks.is_empty());
        assert!(ticks.positions().contains(&5.0));
        assert!(ticks.positions().iter().all(|&t| (4.5..=5.5).contains(&t)));

        let ticks = compute_ticks(extent(0.0, 0.0), 7);
        assert!(ticks.positions().contains(&0.0));
    }

    #[test]
    fn test_ticks_negative_range_has_no_negative_zero() {
        let ticks = compute_ticks(extent(-1.0, 1.0), 7);
        let zero = ticks.positions().iter().find(|t| **t == 0.0).unwrap();
        assert!(zero.is_sign_positive());
    }

    fn assert_ticks_well_formed(ticks: &TickSet, bounds: (f64, f64), max: usize) {
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= max, "{:?}", ticks.positions());
        assert!(ticks.iter().all(|t| t.is_finite() && bounds.0 <= t && t <= bounds.1));
        assert!(ticks.positions().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ticks_span_wider_than_f64_max() {
        let e = extent(-f64::MAX, f64::MAX);
        let ticks = compute_ticks(e, 7);
        assert_ticks_well_formed(&ticks, e.tick_bounds(), 7);
        assert!(ticks.len() > 1);
        assert!(ticks.positions().contains(&0.0));

        let e = extent(-1e308, 1e308);
        assert_ticks_well_formed(&compute_ticks(e, 7), e.tick_bounds(), 7);
    }

    #[test]
    fn test_ticks_large_magnitude_small_span_terminate() {
        let e = extent(1e17, 1e17 + 16.0);
        let ticks = compute_ticks(e, 7);
        assert_ticks_well_formed(&ticks, e.tick_bounds(), 7);

        let e = extent(-4.5e15, -4.5e15 + 8.0);
        assert_ticks_well_formed(&compute_ticks(e, 7), e.tick_bounds(), 7);
    }

    #[test]
    fn test_degenerate_extent_at_f64_max() {
        let e = extent(f64::MAX, f64::MAX);
        let (lo, hi) = e.tick_bounds();
        assert!(lo < hi && hi == f64::MAX);
        assert_ticks_well_formed(&compute_ticks(e, 7), (lo, hi), 7);
        let (lo, hi) = e.padded(0.02);
        assert!(lo.is_finite() && lo < hi);
    }

    #[test]
    fn test_span_and_padding_saturate() {
        assert_eq!(extent(-1e308, 1e308).span(), f64::MAX);
        assert_eq!(extent(-f64::MAX, f64::MAX).padded(0.02), (f64::MIN, f64::MAX));
    }

    #[test]
    fn test_labels_use_step_precision() {
        assert_eq!(compute_ticks(extent(0.0, 4.0), 7).labels(), vec!["0", "1", "2", "3", "4"]);
        assert_eq!(
            compute_ticks(extent(0.0, 0.05), 7).labels(),
            vec!["0.00", "0.01", "0.02", "0.03", "0.04", "0.05"]
        );
    }

    #[test]
    fn test_axis_frame() {
        let frame = AxisFrame::new(extent(0.0, 50.0), 7, 0.02);
        assert_eq!(frame.extent(), extent(0.0, 50.0));
        assert_eq!(frame.limits(), (-1.0, 51.0));
        assert!(frame.ticks().len() <= 7);

        let frame = frame.with_limits(0.0, 51.0);
        assert_eq!(frame.limits(), (0.0, 51.0));
    }
}
