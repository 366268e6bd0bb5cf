//! Tax Rates

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when building a tax rate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxRateError {
    /// Rates below zero are not accepted.
    #[error("tax rate {0} is negative")]
    Negative(Decimal),

    /// The input could not be parsed as a rate.
    #[error("invalid tax rate: {0}")]
    Invalid(String),
}

/// Sales tax rate applied to a cart subtotal, stored as a fraction (0.1925 = 19.25%).
///
/// Rates come from whichever tax or region service the caller uses; the
/// aggregator never assumes a jurisdiction.
#[derive(Debug, Clone, Copy)]
pub struct TaxRate(Percentage);

impl TaxRate {
    /// Create a rate from a fraction, e.g. `0.1925`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRateError::Negative`] if `fraction` is below zero.
    pub fn new(fraction: Decimal) -> Result<Self, TaxRateError> {
        if fraction < Decimal::ZERO {
            return Err(TaxRateError::Negative(fraction));
        }

        Ok(Self(Percentage::from(fraction)))
    }

    /// Create a rate from percent points, e.g. `19.25`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRateError::Negative`] if `points` is below zero.
    pub fn from_percent_points(points: Decimal) -> Result<Self, TaxRateError> {
        Self::new(points / Decimal::ONE_HUNDRED)
    }

    /// A zero rate.
    pub fn zero() -> Self {
        Self(Percentage::from(Decimal::ZERO))
    }

    /// The rate as a fraction.
    pub fn fraction(&self) -> Decimal {
        // `Percentage` only exposes its value through multiplication.
        self.0 * Decimal::ONE
    }

    /// Tax owed on `amount`, unrounded. `None` on overflow.
    pub fn apply(&self, amount: Decimal) -> Option<Decimal> {
        self.fraction().checked_mul(amount)
    }
}

impl Default for TaxRate {
    /// 19.25%
    fn default() -> Self {
        Self(Percentage::from(Decimal::new(1925, 4)))
    }
}

impl PartialEq for TaxRate {
    fn eq(&self, other: &Self) -> bool {
        self.fraction() == other.fraction()
    }
}

impl FromStr for TaxRate {
    type Err = TaxRateError;

    /// Accepts `"19.25%"` (percent points) or `"0.1925"` (fraction).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(points) = trimmed.strip_suffix('%') {
            let points = points
                .trim()
                .parse::<Decimal>()
                .map_err(|_err| TaxRateError::Invalid(s.to_string()))?;

            return Self::from_percent_points(points);
        }

        let fraction = trimmed
            .parse::<Decimal>()
            .map_err(|_err| TaxRateError::Invalid(s.to_string()))?;

        Self::new(fraction)
    }
}
