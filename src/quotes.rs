//! RFQ Quotes
//!
//! Ranking of supplier quotes received for a request for quotation.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::items::Supplier;

/// A supplier's answer to a request for quotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Quote identifier
    pub id: String,

    /// Quoting supplier
    pub supplier: Supplier,

    /// Offered unit price
    pub unit_price: Decimal,

    /// Quantity the price applies to
    pub quantity: u64,

    /// Promised delivery lead time in days
    pub delivery_days: u32,

    /// Supplier rating out of five, if rated
    pub rating: Option<Decimal>,
}

impl Quote {
    /// `unit_price × quantity`, or `None` on overflow.
    pub fn total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// How to order quotes, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteOrder {
    /// Cheapest total first
    #[default]
    LowestTotal,

    /// Cheapest unit price first
    LowestUnitPrice,

    /// Shortest lead time first
    FastestDelivery,

    /// Best rated first; unrated quotes last
    HighestRated,
}

/// Rank quotes best first. Ties keep their input order.
pub fn rank_quotes(quotes: &[Quote], order: QuoteOrder) -> Vec<&Quote> {
    let mut ranked: Vec<&Quote> = quotes.iter().collect();

    ranked.sort_by(|a, b| compare(a, b, order));

    ranked
}

/// The best quote under `order`, if any.
pub fn best_quote(quotes: &[Quote], order: QuoteOrder) -> Option<&Quote> {
    quotes
        .iter()
        .reduce(|best, quote| match compare(quote, best, order) {
            Ordering::Less => quote,
            Ordering::Equal | Ordering::Greater => best,
        })
}

fn compare(a: &Quote, b: &Quote, order: QuoteOrder) -> Ordering {
    match order {
        // Overflowed totals sort last.
        QuoteOrder::LowestTotal => {
            let key = |quote: &Quote| quote.total().map_or((true, Decimal::ZERO), |t| (false, t));
            key(a).cmp(&key(b))
        }
        QuoteOrder::LowestUnitPrice => a.unit_price.cmp(&b.unit_price),
        QuoteOrder::FastestDelivery => a.delivery_days.cmp(&b.delivery_days),
        QuoteOrder::HighestRated => b.rating.cmp(&a.rating),
    }
}
