//! Farmgate prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    aggregate::{
        AggregateError, CartAggregator, CartGroup, CartSummary, CartTotals, LineError, PricedLine,
    },
    cart::{Cart, CartError},
    catalog::{CatalogHandle, TierCatalog, TierCatalogBuilder},
    checkout::{Checkout, CheckoutError},
    config::{ConfigError, PricingConfig},
    items::{CartLineItem, Supplier},
    money::{SettleError, settle},
    notifications::{Inbox, InboxError, Notification, NotificationKey},
    pricing::{PricingError, TierResolution, TierTable, check_minimum_order, resolve},
    quotes::{Quote, QuoteOrder, best_quote, rank_quotes},
    store::{CartId, CartStore, InMemoryCartStore, StoreError},
    summary::{SummaryError, write_summary},
    tax::{TaxRate, TaxRateError},
    tiers::{PricingTier, TierError},
};
