//! Histogram binning normalized to percentages.
//!
//! Edges partition the data extent into equal-width intervals. The number of intervals is either
//! given explicitly or derived by a [`BinRule`]; the built-in rules are the classic width
//! estimators (Freedman-Diaconis, Sturges, Scott, Rice, square root, Doane) plus `auto`, which
//! takes the narrower of Freedman-Diaconis and Sturges.
//!
//! Counting follows half-open intervals `[lo, hi)` except for the last bin, which also takes the
//! maximum.

use crate::error::{Error, Result};
use crate::frame::Extent;
use crate::input::NumericVector;
use std::fmt;
use std::sync::Arc;

/// Largest bin count accepted from an explicit [`BinSpec::Count`].
pub const MAX_BINS: i64 = 1_000_000;

/// Rule-derived bin counts above this are capped.
pub const MAX_RULE_BINS: usize = 10_000;

// ============================================================================
// Rules
// ============================================================================

/// A strategy that estimates a bin width from the sample.
///
/// Implementations return `0.0` when they cannot estimate a width (for example when the data has
/// no spread); the binner then falls back to a single bin.
pub trait BinRule: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Bin width for `data`, whose exact extent is `extent`.
    fn width(&self, data: &[f64], extent: Extent) -> f64;
}

/// `min(fd, sturges)`, or Sturges when the interquartile range is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Auto;

/// Freedman-Diaconis: `2 · IQR · n^(-1/3)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreedmanDiaconis;

/// Sturges: `ptp / (log2 n + 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sturges;

/// Scott: `(24 √π / n)^(1/3) · σ`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scott;

/// Rice: `ptp / (2 n^(1/3))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rice;

/// Square root: `ptp / √n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqrt;

/// Doane: Sturges corrected for skewness.
#[derive(Debug, Clone, Copy, Default)]
pub struct Doane;

impl BinRule for Auto {
    fn name(&self) -> &str {
        "auto"
    }

    fn width(&self, data: &[f64], extent: Extent) -> f64 {
        let fd = FreedmanDiaconis.width(data, extent);
        let sturges = Sturges.width(data, extent);
        if fd > 0.0 {
            fd.min(sturges)
        } else {
            sturges
        }
    }
}

impl BinRule for FreedmanDiaconis {
    fn name(&self) -> &str {
        "fd"
    }

    fn width(&self, data: &[f64], _extent: Extent) -> f64 {
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
        2.0 * iqr * (data.len() as f64).powf(-1.0 / 3.0)
    }
}

impl BinRule for Sturges {
    fn name(&self) -> &str {
        "sturges"
    }

    fn width(&self, data: &[f64], extent: Extent) -> f64 {
        extent.span() / ((data.len() as f64).log2() + 1.0)
    }
}

impl BinRule for Scott {
    fn name(&self) -> &str {
        "scott"
    }

    fn width(&self, data: &[f64], _extent: Extent) -> f64 {
        let n = data.len() as f64;
        let factor = (24.0 * std::f64::consts::PI.sqrt() / n).cbrt();
        factor * std_dev(data)
    }
}

impl BinRule for Rice {
    fn name(&self) -> &str {
        "rice"
    }

    fn width(&self, data: &[f64], extent: Extent) -> f64 {
        extent.span() / (2.0 * (data.len() as f64).cbrt())
    }
}

impl BinRule for Sqrt {
    fn name(&self) -> &str {
        "sqrt"
    }

    fn width(&self, data: &[f64], extent: Extent) -> f64 {
        extent.span() / (data.len() as f64).sqrt()
    }
}

impl BinRule for Doane {
    fn name(&self) -> &str {
        "doane"
    }

    fn width(&self, data: &[f64], extent: Extent) -> f64 {
        let n = data.len() as f64;
        if data.len() <= 2 {
            return 0.0;
        }
        let sg1 = (6.0 * (n - 2.0) / ((n + 1.0) * (n + 3.0))).sqrt();
        let sigma = std_dev(data);
        if sigma <= 0.0 {
            return 0.0;
        }
        let mean = mean(data);
        let g1 = data.iter().map(|v| ((v - mean) / sigma).powi(3)).sum::<f64>() / n;
        extent.span() / (1.0 + n.log2() + (1.0 + g1.abs() / sg1).log2())
    }
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation.
fn std_dev(data: &[f64]) -> f64 {
    let mean = mean(data);
    let var = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / data.len() as f64;
    var.sqrt()
}

/// Linear-interpolated percentile of sorted data.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let h = (sorted.len() - 1) as f64 * p / 100.0;
    let below = h.floor() as usize;
    let above = (below + 1).min(sorted.len() - 1);
    sorted[below] + (h - below as f64) * (sorted[above] - sorted[below])
}

// ============================================================================
// Bin specification
// ============================================================================

/// How to choose histogram bins.
#[derive(Debug, Clone)]
pub enum BinSpec {
    /// A fixed number of equal-width bins. Must be positive.
    Count(i64),
    /// Equal-width bins, count derived from a width estimator.
    Rule(Arc<dyn BinRule>),
    /// Explicit, strictly increasing edges. Values outside them are not counted.
    Edges(Vec<f64>),
}

impl Default for BinSpec {
    fn default() -> Self {
        Self::Rule(Arc::new(Auto))
    }
}

impl BinSpec {
    /// Names accepted by [`BinSpec::named`].
    pub const RULE_NAMES: [&'static str; 7] =
        ["auto", "fd", "sturges", "scott", "rice", "sqrt", "doane"];

    /// Fixed bin count.
    #[must_use]
    pub fn count(n: i64) -> Self {
        Self::Count(n)
    }

    /// A custom rule.
    pub fn rule(rule: impl BinRule + 'static) -> Self {
        Self::Rule(Arc::new(rule))
    }

    /// Select a built-in rule by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBinSpec`] for an unknown name.
    ///
    /// # Example
    ///
    /// ```
    /// use inkframe::bins::BinSpec;
    ///
    /// assert!(BinSpec::named("fd").is_ok());
    /// assert!(BinSpec::named("magic").is_err());
    /// ```
    pub fn named(name: &str) -> Result<Self> {
        let rule: Arc<dyn BinRule> = match name {
            "auto" => Arc::new(Auto),
            "fd" => Arc::new(FreedmanDiaconis),
            "sturges" => Arc::new(Sturges),
            "scott" => Arc::new(Scott),
            "rice" => Arc::new(Rice),
            "sqrt" => Arc::new(Sqrt),
            "doane" => Arc::new(Doane),
            _ => {
                return Err(Error::InvalidBinSpec(format!(
                    "unknown bin rule '{name}' (expected one of {})",
                    Self::RULE_NAMES.join(", ")
                )))
            }
        };
        Ok(Self::Rule(rule))
    }

    /// Check everything that does not depend on the data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBinSpec`] for a non-positive or oversized count, or for edges that
    /// are fewer than two, non-finite or not strictly increasing.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Count(n) if *n <= 0 => {
                Err(Error::InvalidBinSpec(format!("bin count must be positive, got {n}")))
            }
            Self::Count(n) if *n > MAX_BINS => Err(Error::InvalidBinSpec(format!(
                "bin count {n} exceeds the maximum of {MAX_BINS}"
            ))),
            Self::Edges(edges) if edges.len() < 2 => {
                Err(Error::InvalidBinSpec("at least two bin edges are required".to_string()))
            }
            Self::Edges(edges) if edges.iter().any(|e| !e.is_finite()) => {
                Err(Error::InvalidBinSpec("bin edges must be finite".to_string()))
            }
            Self::Edges(edges) if !strictly_increasing(edges) => {
                Err(Error::InvalidBinSpec("bin edges must increase strictly".to_string()))
            }
            Self::Count(_) | Self::Rule(_) | Self::Edges(_) => Ok(()),
        }
    }
}

impl From<i64> for BinSpec {
    fn from(n: i64) -> Self {
        Self::Count(n)
    }
}

impl From<i32> for BinSpec {
    fn from(n: i32) -> Self {
        Self::Count(i64::from(n))
    }
}

impl From<usize> for BinSpec {
    fn from(n: usize) -> Self {
        Self::Count(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<Vec<f64>> for BinSpec {
    fn from(edges: Vec<f64>) -> Self {
        Self::Edges(edges)
    }
}

// ============================================================================
// Binning
// ============================================================================

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bin {
    /// Inclusive lower edge.
    pub edge_lo: f64,
    /// Upper edge (exclusive, except for the last bin).
    pub edge_hi: f64,
    /// Number of samples in the bin.
    pub count: usize,
    /// Share of the sample, in percent.
    pub percentage: f64,
}

impl Bin {
    /// `edge_hi - edge_lo`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.edge_hi - self.edge_lo
    }
}

/// The result of [`bin_and_normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Binned {
    extent: Extent,
    bins: Vec<Bin>,
}

impl Binned {
    /// Exact data extent (unwidened).
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The bins, left to right.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// All edges, `bins().len() + 1` values.
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|b| b.edge_lo).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.edge_hi);
        }
        edges
    }

    /// Extent spanned by the edges.
    #[must_use]
    pub fn edge_extent(&self) -> Extent {
        let lo = self.bins.first().map_or(self.extent.lo(), |b| b.edge_lo);
        let hi = self.bins.last().map_or(self.extent.hi(), |b| b.edge_hi);
        Extent::new(lo, hi).unwrap_or(self.extent)
    }

    /// Tallest bar, in percent.
    #[must_use]
    pub fn max_percentage(&self) -> f64 {
        self.bins.iter().map(|b| b.percentage).fold(0.0, f64::max)
    }

    /// Total number of counted samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Bin `vector` according to `spec` and express each count as a percentage of the total.
///
/// # Errors
///
/// [`Error::NonFiniteRange`] if the data contains NaN or infinite values, and
/// [`Error::InvalidBinSpec`] as described in [`BinSpec::validate`].
///
/// # Example
///
/// ```
/// use inkframe::bins::{bin_and_normalize, BinSpec};
/// use inkframe::input::normalize;
///
/// let binned = bin_and_normalize(&normalize(&[5.0]).unwrap(), &BinSpec::default()).unwrap();
/// assert_eq!(binned.bins().len(), 1);
/// assert_eq!(binned.bins()[0].percentage, 100.0);
/// ```
pub fn bin_and_normalize(vector: &NumericVector, spec: &BinSpec) -> Result<Binned> {
    spec.validate()?;
    let data = vector.as_slice();
    let extent = Extent::of(data)?;

    let edges = match spec {
        BinSpec::Edges(edges) => edges.clone(),
        BinSpec::Count(n) => {
            let edges = linspace(outer_edges(extent), *n as usize);
            if !strictly_increasing(&edges) {
                return Err(Error::InvalidBinSpec(format!(
                    "too many bins for data range [{}, {}]; cannot create {n} finite-sized bins",
                    extent.lo(),
                    extent.hi()
                )));
            }
            edges
        }
        BinSpec::Rule(rule) => {
            let (first, last) = outer_edges(extent);
            let width = rule.width(data, extent);
            let mut n = rule_bin_count(rule.as_ref(), (last - first).min(f64::MAX), width);
            let mut edges = linspace((first, last), n);
            // Far from zero, neighbouring edges can round to the same value.
            while n > 1 && !strictly_increasing(&edges) {
                n /= 2;
                edges = linspace((first, last), n);
            }
            tracing::debug!(rule = rule.name(), width, bins = n, "selected bin count");
            edges
        }
    };

    let counts = match spec {
        BinSpec::Edges(_) => count_sorted_edges(data, &edges),
        BinSpec::Count(_) | BinSpec::Rule(_) => count_uniform(data, &edges),
    };

    let total: usize = counts.iter().sum();
    let bins = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bin {
            edge_lo: edges[i],
            edge_hi: edges[i + 1],
            count,
            percentage: if total > 0 { count as f64 / total as f64 * 100.0 } else { 0.0 },
        })
        .collect();

    Ok(Binned { extent, bins })
}

/// The extent, widened to `v ± 0.5` when degenerate.
///
/// Where 0.5 is below the spacing of floats around `v`, the pad grows to a few ulps so the two
/// edges stay distinct.
fn outer_edges(extent: Extent) -> (f64, f64) {
    if extent.is_degenerate() {
        let v = extent.lo();
        let pad = 0.5_f64.max(v.abs() * f64::EPSILON);
        ((v - pad).max(f64::MIN), (v + pad).min(f64::MAX))
    } else {
        (extent.lo(), extent.hi())
    }
}

fn rule_bin_count(rule: &dyn BinRule, range: f64, width: f64) -> usize {
    if !width.is_finite() || width <= 0.0 {
        return 1;
    }
    let n = (range / width).ceil();
    if n > MAX_RULE_BINS as f64 {
        tracing::warn!(
            rule = rule.name(),
            requested = n,
            cap = MAX_RULE_BINS,
            "bin rule produced too many bins; capping"
        );
        return MAX_RULE_BINS;
    }
    (n as usize).max(1)
}

/// `n + 1` evenly spaced edges; the last one is exactly `last`.
fn linspace((first, last): (f64, f64), n: usize) -> Vec<f64> {
    let span = last - first;
    let mut edges: Vec<f64> = if span.is_finite() {
        let step = span / n as f64;
        (0..=n).map(|i| first + i as f64 * step).collect()
    } else {
        // Ranges wider than f64::MAX advance in two half steps.
        let half_step = (last / 2.0 - first / 2.0) / n as f64;
        (0..=n)
            .map(|i| {
                let offset = i as f64 * half_step;
                first + offset + offset
            })
            .collect()
    };
    edges[n] = last;
    edges
}

fn strictly_increasing(edges: &[f64]) -> bool {
    edges.windows(2).all(|w| w[0] < w[1])
}

/// Count into equal-width bins by direct index computation, nudged by the stored edges so that a
/// value sitting on an edge always lands in the bin that edge opens.
fn count_uniform(data: &[f64], edges: &[f64]) -> Vec<usize> {
    let n = edges.len() - 1;
    let first = edges[0];
    let span = edges[n] - first;
    // Ranges wider than f64::MAX are indexed in half units.
    let (unit, norm) = if span.is_finite() {
        (1.0, n as f64 / span)
    } else {
        (0.5, n as f64 / (edges[n] * 0.5 - first * 0.5))
    };
    let mut counts = vec![0usize; n];

    for &v in data {
        let mut i = (((v * unit - first * unit) * norm) as usize).min(n - 1);
        if v < edges[i] && i > 0 {
            i -= 1;
        } else if i + 1 < n && v >= edges[i + 1] {
            i += 1;
        }
        counts[i] += 1;
    }
    counts
}

/// Count against arbitrary increasing edges; values outside `[first, last]` are dropped.
fn count_sorted_edges(data: &[f64], edges: &[f64]) -> Vec<usize> {
    let n = edges.len() - 1;
    let (first, last) = (edges[0], edges[n]);
    let mut counts = vec![0usize; n];

    for &v in data {
        if v < first || v > last {
            continue;
        }
        // Number of edges <= v, minus one, is the bin index; the maximum joins the last bin.
        let i = edges.partition_point(|&e| e <= v).saturating_sub(1).min(n - 1);
        counts[i] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::normalize;

    fn binned(data: &[f64], spec: &BinSpec) -> Binned {
        bin_and_normalize(&normalize(data).unwrap(), spec).unwrap()
    }

    fn assert_normalized(b: &Binned, n: usize) {
        let sum: f64 = b.bins().iter().map(|b| b.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum = {sum}");
        assert_eq!(b.total(), n);
    }

    #[test]
    fn test_single_value() {
        let b = binned(&[5.0], &BinSpec::default());
        assert_eq!(b.bins().len(), 1);
        assert_eq!(b.bins()[0].percentage, 100.0);
        assert_eq!(b.bins()[0].edge_lo, 4.5);
        assert_eq!(b.bins()[0].edge_hi, 5.5);
        assert_eq!(b.extent(), Extent::new(5.0, 5.0).unwrap());
    }

    #[test]
    fn test_explicit_count_edges_partition_extent() {
        let b = binned(&[0.0, 1.0, 2.0, 3.0, 4.0], &BinSpec::count(4));
        assert_eq!(b.edges(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        // 1.0, 2.0 and 3.0 sit on interior edges and open the next bin; 4.0 joins the last.
        let counts: Vec<usize> = b.bins().iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_normalized(&b, 5);
    }

    #[test]
    fn test_last_edge_is_exact() {
        let b = binned(&[0.1, 0.2, 0.7], &BinSpec::count(3));
        assert_eq!(*b.edges().last().unwrap(), 0.7);
        assert_normalized(&b, 3);
    }

    #[test]
    fn test_rejects_bad_counts() {
        let v = normalize(&[1.0, 2.0]).unwrap();
        for n in [0, -3, MAX_BINS + 1] {
            assert!(matches!(
                bin_and_normalize(&v, &BinSpec::count(n)),
                Err(Error::InvalidBinSpec(_))
            ));
        }
    }

    #[test]
    fn test_rejects_nan_contamination() {
        let v = normalize(&[1.0, 2.0, f64::NAN]).unwrap();
        assert!(matches!(
            bin_and_normalize(&v, &BinSpec::default()),
            Err(Error::NonFiniteRange { .. })
        ));
    }

    #[test]
    fn test_named_rules() {
        let data: Vec<f64> = (0..100).map(|i| f64::from(i) * 0.37).collect();
        for name in BinSpec::RULE_NAMES {
            let b = binned(&data, &BinSpec::named(name).unwrap());
            assert!(!b.bins().is_empty(), "{name}");
            assert_normalized(&b, data.len());
        }
        let err = BinSpec::named("bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_sturges_count() {
        // 16 points: log2(16) + 1 = 5 bins over the full range.
        let data: Vec<f64> = (0..16).map(f64::from).collect();
        let b = binned(&data, &BinSpec::named("sturges").unwrap());
        assert_eq!(b.bins().len(), 5);
    }

    #[test]
    fn test_sqrt_count() {
        // 64 points over a range of 63: width 63 / 8, so exactly 8 bins.
        let data: Vec<f64> = (0..64).map(f64::from).collect();
        let b = binned(&data, &BinSpec::named("sqrt").unwrap());
        assert_eq!(b.bins().len(), 8);
    }

    #[test]
    fn test_auto_falls_back_to_sturges_when_iqr_zero() {
        let mut data = vec![1.0; 50];
        data.push(10.0);
        let auto = binned(&data, &BinSpec::default());
        let sturges = binned(&data, &BinSpec::named("sturges").unwrap());
        assert_eq!(auto.bins().len(), sturges.bins().len());
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&sorted, 25.0) - 1.75).abs() < 1e-12);
        assert!((percentile(&sorted, 75.0) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_edges() {
        let b = binned(&[0.5, 1.5, 2.0, 9.0], &BinSpec::Edges(vec![0.0, 1.0, 2.0]));
        let counts: Vec<usize> = b.bins().iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2]);
        assert_normalized(&b, 3);
    }

    #[test]
    fn test_invalid_edges() {
        let v = normalize(&[1.0]).unwrap();
        for edges in [vec![1.0], vec![0.0, 0.0], vec![0.0, f64::NAN]] {
            assert!(bin_and_normalize(&v, &BinSpec::Edges(edges)).is_err());
        }
    }

    #[derive(Debug)]
    struct Fixed(f64);

    impl BinRule for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn width(&self, _data: &[f64], _extent: Extent) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_custom_rule() {
        let b = binned(&[0.0, 10.0], &BinSpec::rule(Fixed(2.5)));
        assert_eq!(b.bins().len(), 4);
    }

    #[test]
    fn test_rule_count_is_capped() {
        let b = binned(&[0.0, 1.0], &BinSpec::rule(Fixed(1e-9)));
        assert_eq!(b.bins().len(), MAX_RULE_BINS);
        assert_normalized(&b, 2);
    }

    #[test]
    fn test_zero_width_rule_gives_one_bin() {
        let b = binned(&[0.0, 1.0, 2.0], &BinSpec::rule(Fixed(0.0)));
        assert_eq!(b.bins().len(), 1);
        assert_eq!(b.bins()[0].count, 3);
    }

    #[test]
    fn test_max_percentage() {
        let b = binned(&[0.0, 0.1, 0.2, 1.0], &BinSpec::count(2));
        assert_eq!(b.max_percentage(), 75.0);
        assert_eq!(b.edge_extent(), Extent::new(0.0, 1.0).unwrap());
    }

    fn assert_edges_well_formed(b: &Binned) {
        let edges = b.edges();
        assert!(edges.iter().all(|e| e.is_finite()), "{edges:?}");
        assert!(strictly_increasing(&edges), "{edges:?}");
    }

    #[test]
    fn test_span_wider_than_f64_max() {
        let b = binned(&[-1e308, 1e308], &BinSpec::default());
        assert_edges_well_formed(&b);
        assert_normalized(&b, 2);
        assert_eq!(b.edge_extent(), Extent::new(-1e308, 1e308).unwrap());

        let b = binned(&[-1e308, 1e308], &BinSpec::count(4));
        assert_edges_well_formed(&b);
        assert_eq!((b.edges()[0], b.edges()[2], b.edges()[4]), (-1e308, 0.0, 1e308));
        assert_eq!(b.bins().iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 0, 0, 1]);

        let b = binned(&[-f64::MAX, 0.0, f64::MAX], &BinSpec::named("sqrt").unwrap());
        assert_edges_well_formed(&b);
        assert_normalized(&b, 3);
    }

    #[test]
    fn test_large_magnitude_small_span() {
        let data: Vec<f64> = (0..200).map(|i| 1e17 + f64::from(i % 2) * 16.0).collect();
        let b = binned(&data, &BinSpec::default());
        assert_edges_well_formed(&b);
        assert_normalized(&b, 200);

        let err = bin_and_normalize(&normalize(&data).unwrap(), &BinSpec::count(60)).unwrap_err();
        assert!(matches!(err, Error::InvalidBinSpec(_)));
        assert!(err.to_string().contains("cannot create 60 finite-sized bins"));
    }

    #[test]
    fn test_degenerate_far_from_zero() {
        for v in [1e17, -3e20, f64::MAX, f64::MIN] {
            let b = binned(&[v, v], &BinSpec::default());
            assert_eq!(b.bins().len(), 1);
            assert_edges_well_formed(&b);
            assert!(b.bins()[0].edge_lo <= v && v <= b.bins()[0].edge_hi);
            assert_normalized(&b, 2);
        }
    }
}
