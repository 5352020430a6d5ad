use crate::error::SplitPayError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Number of minor units (kobo, cents) in one major unit on the payment rail.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// A non-negative monetary value expressed in major units (e.g. naira).
///
/// Wraps `rust_decimal::Decimal` so that inbound amounts such as `1500.50`
/// keep their exact value; conversion to the rail's minor unit happens only
/// at the rail boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, SplitPayError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(SplitPayError::ValidationError(
                "Amount must not be negative".to_string(),
            ))
        }
    }

    /// Builds an amount from an integer count of minor units.
    pub fn from_minor_units(minor: i64) -> Result<Self, SplitPayError> {
        Self::new(Decimal::new(minor, 0) / Decimal::from(MINOR_UNITS_PER_MAJOR))
    }

    /// Converts to the rail's minor unit, truncating any sub-minor remainder.
    pub fn to_minor_units(self) -> Option<i64> {
        self.0
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))?
            .trunc()
            .to_i64()
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Truncates towards zero to a whole number of major units.
    pub fn floor(self) -> Self {
        Self(self.0.floor())
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = SplitPayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

// Saturates at zero; amounts never go negative.
impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self((self.0 - rhs.0).max(Decimal::ZERO))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Share of a gross amount, as a number between 0 and 100.
///
/// Deserializes from any JSON number. Values outside the range are kept as
/// configured so they can be reported; the allocator clamps them to
/// `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
