//! Pricing Tiers

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when constructing a pricing tier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TierError {
    /// Tiers start at a quantity of at least one.
    #[error("tier minimum quantity must be at least 1")]
    ZeroMinimum,

    /// The upper bound is below the lower bound (min, max).
    #[error("tier maximum quantity {1} is below minimum quantity {0}")]
    InvertedBand(u64, u64),

    /// Unit prices cannot be negative.
    #[error("tier price {0} is negative")]
    NegativePrice(Decimal),
}

/// A quantity band with a per-unit price ("buy more, pay less per unit").
///
/// The band is inclusive at both ends. A missing upper bound means the tier
/// applies to every quantity from `min_quantity` upwards. Tiers carry no
/// currency; the currency belongs to whoever aggregates the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PricingTier {
    min_quantity: u64,
    max_quantity: Option<u64>,
    price_per_unit: Decimal,
}

impl PricingTier {
    /// Create a new tier.
    ///
    /// # Errors
    ///
    /// - [`TierError::ZeroMinimum`]: `min_quantity` is zero.
    /// - [`TierError::InvertedBand`]: `max_quantity` is below `min_quantity`.
    /// - [`TierError::NegativePrice`]: `price_per_unit` is below zero.
    pub fn new(
        min_quantity: u64,
        max_quantity: Option<u64>,
        price_per_unit: Decimal,
    ) -> Result<Self, TierError> {
        if min_quantity == 0 {
            return Err(TierError::ZeroMinimum);
        }

        if let Some(max) = max_quantity
            && max < min_quantity
        {
            return Err(TierError::InvertedBand(min_quantity, max));
        }

        if price_per_unit < Decimal::ZERO {
            return Err(TierError::NegativePrice(price_per_unit));
        }

        Ok(Self {
            min_quantity,
            max_quantity,
            price_per_unit,
        })
    }

    /// Create an open-ended tier ("`min_quantity` and above").
    ///
    /// # Errors
    ///
    /// See [`PricingTier::new`].
    pub fn from_quantity(min_quantity: u64, price_per_unit: Decimal) -> Result<Self, TierError> {
        Self::new(min_quantity, None, price_per_unit)
    }

    /// Inclusive lower bound of the band.
    pub fn min_quantity(&self) -> u64 {
        self.min_quantity
    }

    /// Inclusive upper bound of the band, `None` when unbounded.
    pub fn max_quantity(&self) -> Option<u64> {
        self.max_quantity
    }

    /// Unit price for quantities inside the band.
    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    /// Whether `quantity` falls inside this tier's band.
    pub fn contains(&self, quantity: u64) -> bool {
        quantity >= self.min_quantity && self.max_quantity.is_none_or(|max| quantity <= max)
    }
}
