//! Money
//!
//! Cart arithmetic is done on exact decimals. Converting to a currency amount
//! in minor units happens only when a figure leaves the crate.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while settling an amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettleError {
    /// The amount does not fit in the currency's minor units.
    #[error("amount {0} cannot be represented in minor units")]
    OutOfRange(Decimal),
}

/// Round `amount` to the currency's minor unit and wrap it as [`Money`].
///
/// Midpoints round away from zero.
///
/// # Errors
///
/// Returns [`SettleError::OutOfRange`] if the amount overflows an `i64` of minor units.
pub fn settle(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, SettleError> {
    let minor = to_minor_units(amount, currency).ok_or(SettleError::OutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency))
}

fn to_minor_units(amount: Decimal, currency: &Currency) -> Option<i64> {
    let scale = (0..currency.exponent)
        .try_fold(Decimal::ONE, |acc, _| acc.checked_mul(Decimal::TEN))?;

    amount
        .checked_mul(scale)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
