//! Refined numeric types.
//!
//! Each type can only be constructed through a validating constructor, so code that receives one
//! never re-checks it. Conversions back to the plain primitive are free.

use core::fmt;
use core::num::NonZeroUsize;
use core::ops::Mul;

use crate::ValidationError;

fn finite(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { value })
    }
}

/// A whole number. Item indexes are unbounded in both directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Integer(i64);

impl Integer {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Refines a float, rejecting NaN, infinities and fractional values.
    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        let value = finite(value)?;
        // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(ValidationError::NotInteger { value });
        }
        let truncated = value as i64;
        if truncated as f64 != value {
            return Err(ValidationError::NotInteger { value });
        }
        Ok(Self(truncated))
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// `self + step`, failing instead of wrapping at the ends of the index space.
    pub fn checked_step(self, step: i64) -> Result<Self, ValidationError> {
        self.0
            .checked_add(step)
            .map(Self)
            .ok_or(ValidationError::IndexOverflow {
                index: self.0,
                step,
            })
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self(i64::from(value))
    }
}

impl From<Integer> for i64 {
    fn from(value: Integer) -> Self {
        value.0
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An offset or count that cannot be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NonNegativeInteger(usize);

impl NonNegativeInteger {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn from_i64(value: i64) -> Result<Self, ValidationError> {
        usize::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::Negative {
                value: value as f64,
            })
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for NonNegativeInteger {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<NonNegativeInteger> for usize {
    fn from(value: NonNegativeInteger) -> Self {
        value.0
    }
}

impl fmt::Display for NonNegativeInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A count of at least one (cache capacities, observation thresholds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PositiveInteger(NonZeroUsize);

impl PositiveInteger {
    pub const ONE: Self = Self(NonZeroUsize::MIN);

    pub fn new(value: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(ValidationError::NotPositive { value: 0 })
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for PositiveInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A finite real number `>= 0` (sizes, scale factors).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct NonNegativeReal(f64);

impl NonNegativeReal {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        let value = finite(value)?;
        if value < 0.0 {
            return Err(ValidationError::Negative { value });
        }
        // Normalize -0.0 so equality and formatting stay predictable.
        Ok(Self(value + 0.0))
    }

    pub const fn get(self) -> f64 {
        self.0
    }

    /// Sum of two sizes. Fails only if the result overflows to infinity.
    pub fn checked_add(self, other: Self) -> Result<Self, ValidationError> {
        Self::new(self.0 + other.0)
    }

    pub fn half(self) -> Self {
        Self(self.0 * 0.5)
    }
}

impl Mul for NonNegativeReal {
    type Output = Result<Self, ValidationError>;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.0 * rhs.0)
    }
}

impl TryFrom<f64> for NonNegativeReal {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonNegativeReal> for f64 {
    fn from(value: NonNegativeReal) -> Self {
        value.0
    }
}

impl fmt::Display for NonNegativeReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Any finite real number (scroll offsets may be negative mid-computation).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Real(f64);

impl Real {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        finite(value).map(Self)
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Real {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Real> for f64 {
    fn from(value: Real) -> Self {
        value.0
    }
}

impl From<NonNegativeReal> for Real {
    fn from(value: NonNegativeReal) -> Self {
        Self(value.0)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
