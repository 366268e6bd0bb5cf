//! Cart

use thiserror::Error;

use crate::items::CartLineItem;

/// Errors related to cart mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// No line with the given id is in the cart.
    #[error("Line item {0} not found")]
    ItemNotFound(String),
}

/// A buyer's cart: an ordered list of line items.
///
/// Adding a variant that is already in the cart increases that line's
/// quantity instead of creating a second line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart holding the given lines as-is.
    pub fn with_items(items: impl Into<Vec<CartLineItem>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Add a line, merging it into an existing line for the same variant.
    pub fn add_item(&mut self, item: CartLineItem) {
        let existing = self
            .items
            .iter_mut()
            .find(|line| line.product_variant_id() == item.product_variant_id());

        match existing {
            Some(line) => line.set_quantity(line.quantity().saturating_add(item.quantity())),
            None => self.items.push(item),
        }
    }

    /// Set a line's quantity. A quantity of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given id.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_item(id).map(|_removed| ());
        }

        let line = self
            .items
            .iter_mut()
            .find(|line| line.id() == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;

        line.set_quantity(quantity);

        Ok(())
    }

    /// Remove a line from the cart, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given id.
    pub fn remove_item(&mut self, id: &str) -> Result<CartLineItem, CartError> {
        let idx = self
            .items
            .iter()
            .position(|line| line.id() == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;

        Ok(self.items.remove(idx))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up a line by id.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given id.
    pub fn get_item(&self, id: &str) -> Result<&CartLineItem, CartError> {
        self.items
            .iter()
            .find(|line| line.id() == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.iter()
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
