use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseFloatError, ops::Deref, str::FromStr};

/// Integers up to 2^53 are exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DecimalError {
    #[error("not a number: {0}")]
    Parse(#[from] ParseFloatError),
    #[error("not a finite number: {0}")]
    NotFinite(f64),
}

/// Convenience wrapper for converting between Shopify's `Decimal` scalar, which
/// is serialized as a `String`, and Rust's `f64`.
///
/// Integral values are written without a fractional part, so `20.0` goes out
/// as `"20"`. Output is always plain decimal notation, never exponent form.
#[derive(Deserialize, Serialize, Debug, PartialEq, PartialOrd, Clone, Copy)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Decimal(pub f64);

impl Decimal {
    /// Parses a finite decimal, ignoring surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, DecimalError> {
        let parsed = f64::from_str(value.trim())?;
        Self::finite(parsed)
    }

    /// Wraps `value`, rejecting NaN and infinities.
    pub fn finite(value: f64) -> Result<Self, DecimalError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(DecimalError::NotFinite(value))
        }
    }

    /// Access the value as an `f64`
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Deref for Decimal {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
            return write!(f, "{}", value as i64);
        }
        let mut buffer = ryu::Buffer::new();
        let shortest = buffer.format(value);
        if shortest.contains('e') {
            // std's float Display is also shortest round-trip, without an exponent.
            write!(f, "{value}")
        } else {
            f.write_str(shortest)
        }
    }
}

impl TryFrom<String> for Decimal {
    type Error = DecimalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.to_string()
    }
}

impl From<Decimal> for f64 {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<f64> for Decimal {
    fn from(value: f64) -> Self {
        Self(value)
    }
}
