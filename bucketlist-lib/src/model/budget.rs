//! Budget amounts

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

/// A monetary target for an item.
///
/// Backed by a `Decimal`, so there is no NaN or infinity to leak into the
/// form or the store.
///
/// # Example
///
/// ```
/// use bucketlist_lib::model::Budget;
///
/// assert_eq!(Budget::parse_input("200"), Budget::from_int(200));
/// assert_eq!(Budget::parse_input("abc"), Budget::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(pub Decimal);

impl Budget {
    /// The default budget.
    pub const ZERO: Budget = Budget(Decimal::ZERO);

    /// Creates a budget from a decimal value.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates a budget from whole units.
    pub fn from_int(value: i64) -> Self {
        Self(Decimal::new(value, 0))
    }

    /// Returns the inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Parses free text typed into the budget field.
    ///
    /// Whitespace and a leading `$` are ignored. Anything that does not parse
    /// as a number yields [`Budget::ZERO`].
    pub fn parse_input(input: &str) -> Self {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        trimmed
            .parse::<Decimal>()
            .map(|d| Self(d.normalize()))
            .unwrap_or(Self::ZERO)
    }

    /// Converts a stored floating point number, rejecting NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::try_from(value).ok().map(|d| Self(d.normalize()))
    }

    /// Returns the amount as whole units if it has no fractional part.
    pub fn as_whole(&self) -> Option<i64> {
        if self.0.fract().is_zero() {
            self.0.to_i64()
        } else {
            None
        }
    }

    /// Returns the amount as a float for wire formats without decimals.
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl From<Decimal> for Budget {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
