//! Checkout
//!
//! Ties a [`CartStore`], the current [`TierCatalog`](crate::catalog::TierCatalog)
//! and a [`CartAggregator`] together: carts are loaded from the store, priced
//! against the catalog snapshot taken at call time, then aggregated.

use thiserror::Error;
use tracing::info;

use crate::{
    aggregate::{AggregateError, CartAggregator, CartSummary},
    cart::{Cart, CartError},
    catalog::CatalogHandle,
    items::CartLineItem,
    store::{CartId, CartStore, StoreError},
};

/// Errors returned by [`Checkout`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cart mutation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Aggregation failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Cart operations over an injected store.
#[derive(Debug)]
pub struct Checkout<S> {
    store: S,
    catalog: CatalogHandle,
    aggregator: CartAggregator,
}

impl<S: CartStore> Checkout<S> {
    /// Create a checkout over a store, catalog and aggregator.
    pub fn new(store: S, catalog: CatalogHandle, aggregator: CartAggregator) -> Self {
        Self {
            store,
            catalog,
            aggregator,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The catalog handle, for swapping in updated tiers.
    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    /// Price and group a stored cart against the current catalog.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Store`]: the cart could not be loaded.
    /// - [`CheckoutError::Aggregate`]: the cart totals overflowed.
    #[tracing::instrument(
        name = "checkout.summarize",
        skip(self),
        fields(cart_id = %id),
        err
    )]
    pub fn summarize(&self, id: &CartId) -> Result<CartSummary, CheckoutError> {
        let cart = self.store.load(id)?;
        let catalog = self.catalog.snapshot();

        let items = catalog.attach_tiers(cart.items());
        let summary = self.aggregator.aggregate(&items)?;

        info!(
            groups = summary.groups().len(),
            excluded = summary.errors().len(),
            grand_total = %summary.totals().grand_total(),
            "summarized cart"
        );

        Ok(summary)
    }

    /// Create an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Store`] if the cart could not be saved.
    pub fn open_cart(&mut self, id: &CartId) -> Result<(), CheckoutError> {
        self.store.save(id, Cart::new())?;

        Ok(())
    }

    /// Add a line to a stored cart, merging with an existing line for the same variant.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Store`] if the cart could not be loaded or saved.
    pub fn add_item(&mut self, id: &CartId, item: CartLineItem) -> Result<(), CheckoutError> {
        self.modify(id, |cart| {
            cart.add_item(item);
            Ok(())
        })
    }

    /// Set a line's quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Store`]: the cart could not be loaded or saved.
    /// - [`CheckoutError::Cart`]: no line has the given id.
    pub fn update_quantity(
        &mut self,
        id: &CartId,
        line_item_id: &str,
        quantity: i64,
    ) -> Result<(), CheckoutError> {
        self.modify(id, |cart| cart.update_quantity(line_item_id, quantity))
    }

    /// Remove a line from a stored cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Store`]: the cart could not be loaded or saved.
    /// - [`CheckoutError::Cart`]: no line has the given id.
    pub fn remove_item(&mut self, id: &CartId, line_item_id: &str) -> Result<(), CheckoutError> {
        self.modify(id, |cart| cart.remove_item(line_item_id).map(|_removed| ()))
    }

    /// Remove every line from a stored cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Store`] if the cart could not be loaded or saved.
    pub fn clear(&mut self, id: &CartId) -> Result<(), CheckoutError> {
        self.modify(id, |cart| {
            cart.clear();
            Ok(())
        })
    }

    fn modify(
        &mut self,
        id: &CartId,
        change: impl FnOnce(&mut Cart) -> Result<(), CartError>,
    ) -> Result<(), CheckoutError> {
        let mut cart = self.store.load(id)?;

        change(&mut cart)?;

        self.store.save(id, cart)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use rusty_money::iso::XAF;
    use testresult::TestResult;

    use crate::{
        catalog::TierCatalog,
        items::Supplier,
        store::{InMemoryCartStore, MockCartStore},
        tax::TaxRate,
        tiers::PricingTier,
    };

    use super::*;

    fn catalog() -> Result<CatalogHandle, Box<dyn std::error::Error>> {
        let catalog = TierCatalog::builder()
            .variant(
                "maize-50kg",
                [
                    PricingTier::new(1, Some(49), Decimal::new(1000, 0))?,
                    PricingTier::from_quantity(50, Decimal::new(900, 0))?,
                ],
            )?
            .build();

        Ok(CatalogHandle::new(catalog))
    }

    fn maize(id: &str, quantity: i64) -> CartLineItem {
        CartLineItem::new(id, "maize-50kg", quantity, Supplier::new("kofi", "Kofi Farms"))
    }

    fn checkout<S: CartStore>(store: S) -> Result<Checkout<S>, Box<dyn std::error::Error>> {
        Ok(Checkout::new(
            store,
            catalog()?,
            CartAggregator::new(TaxRate::zero(), XAF),
        ))
    }

    #[test]
    fn summarize_prices_against_catalog() -> TestResult {
        let mut checkout = checkout(InMemoryCartStore::new())?;
        let id = CartId::from("cart-1");

        checkout.open_cart(&id)?;
        checkout.add_item(&id, maize("1", 30))?;
        checkout.add_item(&id, maize("2", 30))?;

        let summary = checkout.summarize(&id)?;

        assert_eq!(summary.totals().item_count(), 1);
        assert_eq!(summary.totals().subtotal(), Decimal::new(54_000, 0));

        Ok(())
    }

    #[test]
    fn summarize_sees_catalog_updates() -> TestResult {
        let mut checkout = checkout(InMemoryCartStore::new())?;
        let id = CartId::from("cart-1");

        checkout.open_cart(&id)?;
        checkout.add_item(&id, maize("1", 10))?;

        let updated = TierCatalog::builder()
            .variant("maize-50kg", [PricingTier::from_quantity(1, Decimal::new(950, 0))?])?
            .build();

        checkout.catalog().replace(updated);

        let summary = checkout.summarize(&id)?;

        assert_eq!(summary.totals().subtotal(), Decimal::new(9500, 0));

        Ok(())
    }

    #[test]
    fn quantity_updates_and_removal() -> TestResult {
        let mut checkout = checkout(InMemoryCartStore::new())?;
        let id = CartId::from("cart-1");

        checkout.open_cart(&id)?;
        checkout.add_item(&id, maize("1", 10))?;
        checkout.update_quantity(&id, "1", 60)?;

        assert_eq!(
            checkout.summarize(&id)?.totals().subtotal(),
            Decimal::new(54_000, 0)
        );

        checkout.remove_item(&id, "1")?;
        assert!(checkout.store().load(&id)?.is_empty());

        checkout.add_item(&id, maize("2", 1))?;
        checkout.clear(&id)?;
        assert!(checkout.store().load(&id)?.is_empty());

        Ok(())
    }

    #[test]
    fn unknown_line_is_a_cart_error() -> TestResult {
        let mut checkout = checkout(InMemoryCartStore::new())?;
        let id = CartId::from("cart-1");

        checkout.open_cart(&id)?;

        let result = checkout.remove_item(&id, "nope");

        assert!(matches!(
            result,
            Err(CheckoutError::Cart(CartError::ItemNotFound(_)))
        ));

        Ok(())
    }

    #[test]
    fn store_failures_are_propagated() -> TestResult {
        let id = CartId::from("cart-1");

        let mut store = MockCartStore::new();
        store
            .expect_load()
            .with(eq(id.clone()))
            .times(1)
            .returning(|id| Err(StoreError::NotFound(id.clone())));

        let checkout = checkout(store)?;

        let result = checkout.summarize(&id);

        assert!(matches!(
            result,
            Err(CheckoutError::Store(StoreError::NotFound(_)))
        ));

        Ok(())
    }

    #[test]
    fn mutations_are_written_back() -> TestResult {
        let id = CartId::from("cart-1");

        let mut store = MockCartStore::new();
        store.expect_load().returning(|_| Ok(Cart::new()));
        store
            .expect_save()
            .withf(|_, cart| cart.len() == 1)
            .times(1)
            .returning(|_, _| Ok(()));

        let mut checkout = checkout(store)?;

        checkout.add_item(&id, maize("1", 5))?;

        Ok(())
    }
}
