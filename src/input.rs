//! Input normalization.
//!
//! Every chart starts by coercing caller data into a [`NumericVector`]. This module is the single
//! place where that happens: a value is accepted if it is an indexable numeric sequence
//! (`[T]`, `Vec<T>`, `[T; N]`), if it exposes a values view ([`Column`]), or if it is a
//! dynamically-typed [`RawData`] tree whose leaves are all numeric. Anything else fails with
//! [`Error::InvalidInputType`].
//!
//! Individual NaN/infinite elements are kept as-is. Dropping them would change the sample, so a
//! partially contaminated vector is only rejected later, when its range is computed.

use crate::error::{Error, Result};
use std::fmt;

// ============================================================================
// Numeric vector
// ============================================================================

/// A validated, non-empty sequence of `f64` values with at least one finite element.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericVector {
    values: Vec<f64>,
}

impl NumericVector {
    /// Validate `values` under the name `"data"`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyData`] for an empty vector, [`Error::AllNonFinite`] when no element is finite.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        Self::named(values, "data")
    }

    /// Validate `values`, naming the argument `name` in any error.
    pub fn named(values: Vec<f64>, name: &str) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyData {
                name: name.to_string(),
            });
        }
        if !values.iter().any(|v| v.is_finite()) {
            return Err(Error::AllNonFinite {
                name: name.to_string(),
            });
        }
        Ok(Self { values })
    }

    /// The values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of elements (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

}

impl AsRef<[f64]> for NumericVector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

// ============================================================================
// Coercion boundary
// ============================================================================

/// Primitive numbers that convert to `f64`.
pub trait Numeric: Copy {
    /// Widen to `f64` (large integers may round).
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(impl Numeric for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_numeric!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Why a source could not be turned into numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError(pub String);

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CoercionError {}

/// Anything [`normalize`] accepts.
pub trait NumericSource {
    /// Flatten the source into `f64` values in row-major order.
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError>;

    /// A label to use in error messages instead of the positional name.
    fn label(&self) -> Option<&str> {
        None
    }
}

impl<T: Numeric> NumericSource for [T] {
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError> {
        Ok(self.iter().map(|v| v.to_f64()).collect())
    }
}

impl<T: Numeric> NumericSource for Vec<T> {
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError> {
        self.as_slice().numeric_values()
    }
}

impl<T: Numeric, const N: usize> NumericSource for [T; N] {
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError> {
        self.as_slice().numeric_values()
    }
}

impl<S: NumericSource + ?Sized> NumericSource for &S {
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError> {
        (**self).numeric_values()
    }

    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

impl NumericSource for NumericVector {
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError> {
        Ok(self.values.clone())
    }
}

// ============================================================================
// Labeled columns
// ============================================================================

/// A labeled column of numbers, the "values view" input shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    label: String,
    values: Vec<f64>,
}

impl Column {
    /// Create a column from any numeric iterator.
    pub fn new<T, I>(label: impl Into<String>, values: I) -> Self
    where
        T: Numeric,
        I: IntoIterator<Item = T>,
    {
        Self {
            label: label.into(),
            values: values.into_iter().map(Numeric::to_f64).collect(),
        }
    }

    /// The column label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.label
    }

    /// View of the column values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl NumericSource for Column {
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError> {
        Ok(self.values.clone())
    }

    fn label(&self) -> Option<&str> {
        Some(&self.label)
    }
}

// ============================================================================
// Dynamically-typed input
// ============================================================================

/// A single loosely-typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Floating-point number.
    Float(f64),
    /// Integer.
    Int(i64),
    /// Boolean, coerced to 0 or 1.
    Bool(bool),
    /// Missing value, coerced to NaN.
    Missing,
    /// Text; never numeric.
    Text(String),
}

impl RawValue {
    fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            Self::Missing => Some(f64::NAN),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// A loosely-typed, possibly nested array.
#[derive(Debug, Clone, PartialEq)]
pub enum RawData {
    /// A flat sequence of cells.
    Values(Vec<RawValue>),
    /// Rows of equal length, flattened row by row.
    Nested(Vec<RawData>),
    /// A labeled column.
    Column(Column),
}

impl RawData {
    /// Build a flat sequence from anything convertible to cells.
    pub fn values<V: Into<RawValue>>(cells: impl IntoIterator<Item = V>) -> Self {
        Self::Values(cells.into_iter().map(Into::into).collect())
    }

    fn flatten_into(&self, out: &mut Vec<f64>) -> std::result::Result<(), CoercionError> {
        match self {
            Self::Values(cells) => {
                out.reserve(cells.len());
                for (i, cell) in cells.iter().enumerate() {
                    match cell.to_f64() {
                        Some(v) => out.push(v),
                        None => {
                            return Err(CoercionError(format!(
                                "non-numeric value {cell:?} at index {i}"
                            )))
                        }
                    }
                }
                Ok(())
            }
            Self::Column(column) => {
                out.extend_from_slice(column.values());
                Ok(())
            }
            Self::Nested(rows) => {
                let mut row_len = None;
                for (i, row) in rows.iter().enumerate() {
                    let before = out.len();
                    row.flatten_into(out)?;
                    let len = out.len() - before;
                    match row_len {
                        None => row_len = Some(len),
                        Some(expected) if expected != len => {
                            return Err(CoercionError(format!(
                                "ragged nested input: row {i} has {len} values, expected {expected}"
                            )))
                        }
                        Some(_) => {}
                    }
                }
                Ok(())
            }
        }
    }
}

impl NumericSource for RawData {
    fn numeric_values(&self) -> std::result::Result<Vec<f64>, CoercionError> {
        let mut out = Vec::new();
        self.flatten_into(&mut out)?;
        Ok(out)
    }

    fn label(&self) -> Option<&str> {
        match self {
            Self::Column(column) => Some(column.name()),
            Self::Values(_) | Self::Nested(_) => None,
        }
    }
}

// ============================================================================
// Normalization entry points
// ============================================================================

/// Coerce and validate a single input, named `"data"` unless it carries a label.
///
/// # Errors
///
/// [`Error::InvalidInputType`], [`Error::EmptyData`] or [`Error::AllNonFinite`].
///
/// # Example
///
/// ```
/// use inkframe::input::normalize;
///
/// let v = normalize(&[1, 2, 3]).unwrap();
/// assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
/// assert!(normalize(&Vec::<f64>::new()).is_err());
/// ```
pub fn normalize<S: NumericSource + ?Sized>(raw: &S) -> Result<NumericVector> {
    normalize_as(raw, "data")
}

/// Coerce and validate a single input, naming it `name` unless it carries a label.
pub fn normalize_as<S: NumericSource + ?Sized>(raw: &S, name: &str) -> Result<NumericVector> {
    let name = raw.label().unwrap_or(name);
    let values = raw.numeric_values().map_err(|e| Error::InvalidInputType {
        name: name.to_string(),
        reason: e.0,
    })?;
    NumericVector::named(values, name)
}

/// Coerce and validate an `(x, y)` pair of equal length.
///
/// # Errors
///
/// Any [`normalize`] error for either side, then [`Error::LengthMismatch`].
pub fn normalize_pair<X, Y>(x: &X, y: &Y) -> Result<(NumericVector, NumericVector)>
where
    X: NumericSource + ?Sized,
    Y: NumericSource + ?Sized,
{
    let xs = normalize_as(x, "x")?;
    let ys = normalize_as(y, "y")?;
    check_lengths(&xs, x.label().unwrap_or("x"), &ys, y.label().unwrap_or("y"))?;
    Ok((xs, ys))
}

/// Coerce a shared x and one or more y series, each the same length as x.
///
/// Series are named `y[0]`, `y[1]`, ... in errors unless they carry labels.
///
/// # Errors
///
/// [`Error::EmptyData`] when `ys` is empty, otherwise as [`normalize_pair`].
pub fn normalize_series<X, Y>(x: &X, ys: &[Y]) -> Result<(NumericVector, Vec<NumericVector>)>
where
    X: NumericSource + ?Sized,
    Y: NumericSource,
{
    let xs = normalize_as(x, "x")?;
    if ys.is_empty() {
        return Err(Error::EmptyData {
            name: "y".to_string(),
        });
    }

    let x_name = x.label().unwrap_or("x");
    let mut series = Vec::with_capacity(ys.len());
    for (i, y) in ys.iter().enumerate() {
        let positional = format!("y[{i}]");
        let name = y.label().map_or(positional, str::to_string);
        let values = normalize_as(y, &name)?;
        check_lengths(&xs, x_name, &values, &name)?;
        series.push(values);
    }

    Ok((xs, series))
}

fn check_lengths(x: &NumericVector, x_name: &str, y: &NumericVector, y_name: &str) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            x_name: x_name.to_string(),
            x_len: x.len(),
            y_name: y_name.to_string(),
            y_len: y.len(),
        });
    }
    Ok(())
}
