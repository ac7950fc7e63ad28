//! Amount type
//!
//! Domain primitive for amounts payable.
//! All amounts are validated and rounded at construction time, so every
//! stored or displayed amount carries exactly two decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal places kept for every amount
const SCALE: u32 = 2;

/// Largest amount payable for one assignment
const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Amount represents a validated monetary value.
///
/// # Invariants
/// - Value is zero or positive
/// - Value is at most 1 trillion
/// - Value is rounded to 2 decimal places (banker's rounding)
///
/// # Example
/// ```
/// use form_easy::domain::Amount;
///
/// let amount: Amount = "100".parse().unwrap();
/// assert_eq!(amount.to_string(), "100.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Amount must be a valid number (got '{0}')")]
    ParseError(String),

    #[error("Amount exceeds maximum allowed value ({MAX_AMOUNT})")]
    Overflow,

    #[error("Total of amounts does not fit in a decimal")]
    TotalOverflow,
}

impl Amount {
    /// Create a new Amount, rounding to 2 decimal places.
    ///
    /// # Errors
    /// - `AmountError::Negative` if value < 0
    /// - `AmountError::Overflow` if value > 1 trillion
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }
        if value > Decimal::from(MAX_AMOUNT) {
            return Err(AmountError::Overflow);
        }

        let mut rounded = value.round_dp(SCALE);
        rounded.rescale(SCALE);
        Ok(Self(rounded))
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self(Decimal::new(0, SCALE))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Add two amounts. The result may exceed the per-amount maximum
    /// (it is a total), but not the range of `Decimal`.
    pub fn try_add(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(AmountError::TotalOverflow)
    }

    /// Exact sum of amounts
    pub fn total<'a, I>(amounts: I) -> Result<Amount, AmountError>
    where
        I: IntoIterator<Item = &'a Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::zero(), |total, amount| total.try_add(amount))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Accepts plain (`100`, `12.5`) and scientific (`1e2`) notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| AmountError::ParseError(s.to_string()))?;
        Amount::new(decimal)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::from_str(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}
