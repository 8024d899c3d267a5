//! Data-to-pixel mappings.
//!
//! Surfaces map data coordinates (`f64`) onto pixel coordinates (`f32`) through a
//! [`LinearScale`] per axis. The vertical scale runs from the bottom of the surface upwards, so
//! its pixel range is given high-to-low.

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;
}

/// Linear map from a data interval to a pixel interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the domain is empty or not finite.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain(format!(
                "domain [{}, {}] is not finite",
                domain.0, domain.1
            )));
        }
        if domain.0 / 2.0 == domain.1 / 2.0 {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Map `[0, 1]` onto `range`.
    #[must_use]
    pub const fn unit(range: (f32, f32)) -> Self {
        Self {
            domain_min: 0.0,
            domain_max: 1.0,
            range_min: range.0,
            range_max: range.1,
        }
    }
}

impl Scale<f64, f32> for LinearScale {
    fn scale(&self, value: f64) -> f32 {
        // Halved differences stay finite for domains wider than f64::MAX.
        let half_span = self.domain_max / 2.0 - self.domain_min / 2.0;
        let t = (value / 2.0 - self.domain_min / 2.0) / half_span;
        (f64::from(self.range_min) + t * f64::from(self.range_max - self.range_min)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_inverted_pixel_range() {
        let scale =
            LinearScale::new((0.0, 10.0), (500.0, 100.0)).expect("operation should succeed");
        assert!((scale.scale(0.0) - 500.0).abs() < 0.001);
        assert!((scale.scale(10.0) - 100.0).abs() < 0.001);
        assert!((scale.scale(2.5) - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_unit_scale() {
        let scale = LinearScale::unit((100.0, 300.0));
        assert!((scale.scale(0.0) - 100.0).abs() < 0.001);
        assert!((scale.scale(0.25) - 150.0).abs() < 0.001);
    }

    #[test]
    fn test_domain_wider_than_f64_max() {
        let scale = LinearScale::new((-f64::MAX, f64::MAX), (0.0, 100.0))
            .expect("operation should succeed");
        assert!((scale.scale(-f64::MAX) - 0.0).abs() < 0.001);
        assert!((scale.scale(0.0) - 50.0).abs() < 0.001);
        assert!((scale.scale(f64::MAX) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_rejects_bad_domain() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, f64::from_bits(1)), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, f64::INFINITY), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)).is_err());
    }
}
