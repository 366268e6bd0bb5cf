//! Cart Aggregation
//!
//! Groups cart lines by supplier, prices each line against its tiers and folds
//! the results into per-supplier subtotals and cart totals. Lines that cannot
//! be priced are reported alongside the totals instead of failing the cart.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    items::{CartLineItem, Supplier},
    pricing::{PricingError, TierResolution, resolve},
    tax::TaxRate,
};

/// Errors that abort a whole aggregation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A subtotal, tax or grand total does not fit in a decimal.
    #[error("cart totals overflowed")]
    Overflow,

    /// Delivery costs cannot be negative.
    #[error("delivery total {0} is negative")]
    NegativeDelivery(Decimal),
}

/// A successfully priced cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    line_item: CartLineItem,
    resolution: TierResolution,
}

impl PricedLine {
    /// The cart line as supplied.
    pub fn line_item(&self) -> &CartLineItem {
        &self.line_item
    }

    /// Full pricing detail for the line.
    pub fn resolution(&self) -> &TierResolution {
        &self.resolution
    }

    /// Effective unit price.
    pub fn unit_price(&self) -> Decimal {
        self.resolution.unit_price()
    }

    /// Line total.
    pub fn total_price(&self) -> Decimal {
        self.resolution.total_price()
    }
}

/// Priced lines from a single supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartGroup {
    supplier: Supplier,
    lines: Vec<PricedLine>,
    subtotal: Decimal,
}

impl CartGroup {
    fn new(supplier: Supplier) -> Self {
        Self {
            supplier,
            lines: Vec::new(),
            subtotal: Decimal::ZERO,
        }
    }

    fn push(&mut self, line: PricedLine) -> Result<(), AggregateError> {
        self.subtotal = self
            .subtotal
            .checked_add(line.total_price())
            .ok_or(AggregateError::Overflow)?;

        self.lines.push(line);

        Ok(())
    }

    /// The supplier, as described by the first line seen for it.
    pub fn supplier(&self) -> &Supplier {
        &self.supplier
    }

    /// Priced lines in cart order.
    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
    }

    /// Sum of the line totals.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }
}

/// Cart-level totals.
///
/// `grand_total` is always exactly `subtotal + taxes + delivery_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    subtotal: Decimal,
    taxes: Decimal,
    delivery_total: Decimal,
    grand_total: Decimal,
    item_count: usize,
}

impl CartTotals {
    fn new(
        subtotal: Decimal,
        taxes: Decimal,
        delivery_total: Decimal,
        item_count: usize,
    ) -> Result<Self, AggregateError> {
        let grand_total = subtotal
            .checked_add(taxes)
            .and_then(|total| total.checked_add(delivery_total))
            .ok_or(AggregateError::Overflow)?;

        Ok(Self {
            subtotal,
            taxes,
            delivery_total,
            grand_total,
            item_count,
        })
    }

    /// Sum of the group subtotals.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Tax on the subtotal, unrounded.
    pub fn taxes(&self) -> Decimal {
        self.taxes
    }

    /// Delivery costs folded in after aggregation, zero until then.
    pub fn delivery_total(&self) -> Decimal {
        self.delivery_total
    }

    /// `subtotal + taxes + delivery_total`.
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Number of priced line items (not units).
    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

/// A cart line that could not be priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// Id of the excluded line
    pub line_item_id: String,

    /// Why it was excluded
    pub error: PricingError,
}

/// Result of aggregating a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    groups: Vec<CartGroup>,
    totals: CartTotals,
    errors: Vec<LineError>,
    currency: &'static Currency,
}

impl CartSummary {
    /// Supplier groups in the order suppliers first appear in the cart.
    pub fn groups(&self) -> &[CartGroup] {
        &self.groups
    }

    /// Cart totals over the priced lines.
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Lines excluded from the totals, in cart order.
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }

    /// Whether every line was priced.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Currency all amounts are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Fold in a delivery total computed after the initial pass.
    ///
    /// Replaces any delivery total set previously.
    ///
    /// # Errors
    ///
    /// - [`AggregateError::NegativeDelivery`]: `delivery_total` is below zero.
    /// - [`AggregateError::Overflow`]: the grand total cannot be represented.
    pub fn with_delivery_total(mut self, delivery_total: Decimal) -> Result<Self, AggregateError> {
        if delivery_total < Decimal::ZERO {
            return Err(AggregateError::NegativeDelivery(delivery_total));
        }

        self.totals = CartTotals::new(
            self.totals.subtotal,
            self.totals.taxes,
            delivery_total,
            self.totals.item_count,
        )?;

        Ok(self)
    }
}

/// Prices and groups cart lines.
///
/// Holds only configuration; every call starts from scratch.
#[derive(Debug, Clone, Copy)]
pub struct CartAggregator {
    tax_rate: TaxRate,
    currency: &'static Currency,
}

impl CartAggregator {
    /// Create an aggregator for a tax rate and currency.
    pub fn new(tax_rate: TaxRate, currency: &'static Currency) -> Self {
        Self { tax_rate, currency }
    }

    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The configured currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Aggregate `items` into supplier groups and totals.
    ///
    /// Lines that fail to price are left out of every total and listed in
    /// [`CartSummary::errors`]. An empty slice gives an empty summary.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::Overflow`] if a subtotal, the tax or the grand
    /// total cannot be represented.
    pub fn aggregate(&self, items: &[CartLineItem]) -> Result<CartSummary, AggregateError> {
        let mut groups: Vec<CartGroup> = Vec::new();
        let mut group_index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut errors = Vec::new();

        for item in items {
            let resolution = match resolve(item.quantity(), item.pricing_tiers()) {
                Ok(resolution) => resolution,
                Err(error) => {
                    warn!(line_item_id = item.id(), %error, "excluding unpriceable cart line");

                    errors.push(LineError {
                        line_item_id: item.id().to_string(),
                        error,
                    });

                    continue;
                }
            };

            let line = PricedLine {
                line_item: item.clone(),
                resolution,
            };

            let supplier_id = item.supplier().id.as_str();

            match group_index
                .get(supplier_id)
                .and_then(|&idx| groups.get_mut(idx))
            {
                Some(group) => group.push(line)?,
                None => {
                    let mut group = CartGroup::new(item.supplier().clone());
                    group.push(line)?;

                    group_index.insert(supplier_id, groups.len());
                    groups.push(group);
                }
            }
        }

        let subtotal = groups
            .iter()
            .try_fold(Decimal::ZERO, |acc, group| acc.checked_add(group.subtotal))
            .ok_or(AggregateError::Overflow)?;

        let taxes = self
            .tax_rate
            .apply(subtotal)
            .ok_or(AggregateError::Overflow)?;

        let item_count = groups.iter().map(|group| group.lines.len()).sum();

        let totals = CartTotals::new(subtotal, taxes, Decimal::ZERO, item_count)?;

        debug!(
            groups = groups.len(),
            priced = item_count,
            excluded = errors.len(),
            subtotal = %subtotal,
            "aggregated cart"
        );

        Ok(CartSummary {
            groups,
            totals,
            errors,
            currency: self.currency,
        })
    }
}
