//! Tiered Pricing
//!
//! Resolves the unit price that applies to a requested quantity given a set
//! of quantity-break tiers. Tiers are sorted defensively before lookup, and a
//! quantity that no band contains falls back to the tier with the lowest
//! minimum rather than being rejected. Enforcing minimum order quantities is a
//! separate step, see [`check_minimum_order`].

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::tiers::PricingTier;

/// Errors that can occur while pricing a single line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// There are no tiers to price against.
    #[error("no pricing tiers configured; item cannot be priced")]
    InvalidPricingConfiguration,

    /// Quantity is zero or negative.
    #[error("invalid quantity {0}; quantity must be at least 1")]
    InvalidQuantity(i64),

    /// Quantity is below the smallest tier minimum.
    #[error("quantity {quantity} is below the minimum order quantity of {minimum}")]
    BelowMinimumOrder {
        /// Requested quantity
        quantity: u64,

        /// Smallest tier minimum
        minimum: u64,
    },

    /// Line total does not fit in a decimal.
    #[error("line total overflowed")]
    Overflow,
}

/// Tiers sorted by ascending minimum quantity.
///
/// The sort is stable, so tiers with equal minimums keep their input order.
/// A table is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: SmallVec<[PricingTier; 4]>,
}

impl TierTable {
    /// Sort the given tiers into a table.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidPricingConfiguration`] if `tiers` is empty.
    pub fn new(tiers: impl IntoIterator<Item = PricingTier>) -> Result<Self, PricingError> {
        let mut tiers: SmallVec<[PricingTier; 4]> = tiers.into_iter().collect();

        if tiers.is_empty() {
            return Err(PricingError::InvalidPricingConfiguration);
        }

        tiers.sort_by_key(PricingTier::min_quantity);

        Ok(Self { tiers })
    }

    /// The tier with the lowest minimum quantity.
    pub fn base_tier(&self) -> Option<&PricingTier> {
        self.tiers.first()
    }

    /// Smallest quantity covered by any tier.
    pub fn minimum_quantity(&self) -> Option<u64> {
        self.base_tier().map(PricingTier::min_quantity)
    }

    /// Tiers in sorted order.
    pub fn as_slice(&self) -> &[PricingTier] {
        &self.tiers
    }

    /// Iterate over the tiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &PricingTier> {
        self.tiers.iter()
    }

    /// Number of tiers in the table.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always `false`; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Resolve the price for `quantity` against this table.
    ///
    /// The applicable tier is the last one, in sorted order, whose band
    /// contains `quantity`. If no band contains it, the base tier is used.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidQuantity`]: `quantity` is zero or negative.
    /// - [`PricingError::Overflow`]: the line total cannot be represented.
    pub fn resolve(&self, quantity: i64) -> Result<TierResolution, PricingError> {
        let units = positive_quantity(quantity)?;

        let base = *self
            .base_tier()
            .ok_or(PricingError::InvalidPricingConfiguration)?;

        let (tier, is_fallback) = match self.tiers.iter().rev().find(|tier| tier.contains(units)) {
            Some(tier) => (*tier, false),
            None => (base, true),
        };

        let unit_price = tier.price_per_unit();

        let total_price = unit_price
            .checked_mul(Decimal::from(units))
            .ok_or(PricingError::Overflow)?;

        Ok(TierResolution {
            tier,
            quantity: units,
            unit_price,
            total_price,
            base_unit_price: base.price_per_unit(),
            is_fallback,
        })
    }
}

/// Outcome of pricing a quantity against a set of tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierResolution {
    tier: PricingTier,
    quantity: u64,
    unit_price: Decimal,
    total_price: Decimal,
    base_unit_price: Decimal,
    is_fallback: bool,
}

impl TierResolution {
    /// The tier that priced the quantity.
    pub fn tier(&self) -> &PricingTier {
        &self.tier
    }

    /// The quantity that was priced.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Effective unit price.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `unit_price × quantity`, unrounded.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Whether no band contained the quantity and the base tier was used instead.
    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    /// Amount saved against paying the base tier price for every unit.
    ///
    /// Returns `None` on overflow. Negative when the applicable tier is
    /// dearer than the base tier.
    pub fn savings(&self) -> Option<Decimal> {
        self.base_unit_price
            .checked_sub(self.unit_price)?
            .checked_mul(Decimal::from(self.quantity))
    }
}

/// Price `quantity` units against `tiers`.
///
/// The tiers do not need to be sorted, gap-free or non-overlapping.
///
/// # Errors
///
/// - [`PricingError::InvalidQuantity`]: `quantity` is zero or negative. Checked first.
/// - [`PricingError::InvalidPricingConfiguration`]: `tiers` is empty.
/// - [`PricingError::Overflow`]: the line total cannot be represented.
pub fn resolve(quantity: i64, tiers: &[PricingTier]) -> Result<TierResolution, PricingError> {
    positive_quantity(quantity)?;

    TierTable::new(tiers.iter().copied())?.resolve(quantity)
}

/// Reject quantities below the smallest tier minimum.
///
/// The resolver prices such quantities at the base tier; callers that need to
/// enforce a minimum order quantity run this check separately.
///
/// # Errors
///
/// - [`PricingError::InvalidQuantity`]: `quantity` is zero or negative.
/// - [`PricingError::InvalidPricingConfiguration`]: `tiers` is empty.
/// - [`PricingError::BelowMinimumOrder`]: `quantity` is below every tier minimum.
pub fn check_minimum_order(quantity: i64, tiers: &[PricingTier]) -> Result<(), PricingError> {
    let units = positive_quantity(quantity)?;

    let minimum = tiers
        .iter()
        .map(PricingTier::min_quantity)
        .min()
        .ok_or(PricingError::InvalidPricingConfiguration)?;

    if units < minimum {
        return Err(PricingError::BelowMinimumOrder {
            quantity: units,
            minimum,
        });
    }

    Ok(())
}

fn positive_quantity(quantity: i64) -> Result<u64, PricingError> {
    u64::try_from(quantity)
        .ok()
        .filter(|units| *units > 0)
        .ok_or(PricingError::InvalidQuantity(quantity))
}
