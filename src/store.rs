//! Cart Store
//!
//! Persistence seam for carts. The crate ships an in-memory store; anything
//! durable lives behind the same trait outside this crate.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::cart::Cart;

/// Identifier of a stored cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CartId(String);

impl CartId {
    /// Wrap an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Errors returned by a [`CartStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No cart is stored under the id.
    #[error("cart {0} not found")]
    NotFound(CartId),

    /// The backing store failed.
    #[error("cart store failure: {0}")]
    Backend(String),
}

/// Loads and saves carts.
#[cfg_attr(test, mockall::automock)]
pub trait CartStore {
    /// Load a cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no cart is stored under `id`.
    fn load(&self, id: &CartId) -> Result<Cart, StoreError>;

    /// Save a cart, replacing whatever was stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the cart could not be written.
    fn save(&mut self, id: &CartId, cart: Cart) -> Result<(), StoreError>;

    /// Delete a cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no cart is stored under `id`.
    fn delete(&mut self, id: &CartId) -> Result<(), StoreError>;
}

/// A [`CartStore`] backed by a hash map. Contents do not survive the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStore {
    carts: FxHashMap<CartId, Cart>,
}

impl InMemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored carts.
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

impl CartStore for InMemoryCartStore {
    fn load(&self, id: &CartId) -> Result<Cart, StoreError> {
        self.carts
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn save(&mut self, id: &CartId, cart: Cart) -> Result<(), StoreError> {
        self.carts.insert(id.clone(), cart);

        Ok(())
    }

    fn delete(&mut self, id: &CartId) -> Result<(), StoreError> {
        self.carts
            .remove(id)
            .map(|_removed| ())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}
