//! Tier Catalog
//!
//! Sorted tier tables per product variant. A catalog is immutable once built;
//! price updates produce a new catalog which is swapped into a
//! [`CatalogHandle`] in one step, so readers always see a consistent snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::{
    items::CartLineItem,
    pricing::{PricingError, TierTable},
    tiers::PricingTier,
};

/// Read-only map from product variant id to its sorted tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierCatalog {
    tables: FxHashMap<String, TierTable>,
}

impl TierCatalog {
    /// Start building a catalog.
    pub fn builder() -> TierCatalogBuilder {
        TierCatalogBuilder::default()
    }

    /// Tiers for a variant, if the catalog has any.
    pub fn tiers(&self, product_variant_id: &str) -> Option<&TierTable> {
        self.tables.get(product_variant_id)
    }

    /// Copy `items`, replacing each line's tiers with the catalog's tiers for
    /// its variant.
    ///
    /// Lines whose variant is unknown get no tiers and will be reported as
    /// unpriceable by the aggregator.
    pub fn attach_tiers(&self, items: &[CartLineItem]) -> Vec<CartLineItem> {
        items
            .iter()
            .map(|item| {
                let tiers = self
                    .tiers(item.product_variant_id())
                    .map(TierTable::as_slice)
                    .unwrap_or_default();

                item.clone().with_tiers(tiers.iter().copied())
            })
            .collect()
    }

    /// Number of variants in the catalog.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Builder for [`TierCatalog`].
#[derive(Debug, Default)]
pub struct TierCatalogBuilder {
    tables: FxHashMap<String, TierTable>,
}

impl TierCatalogBuilder {
    /// Set the tiers for a variant, replacing any set earlier.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidPricingConfiguration`] if `tiers` is empty.
    pub fn variant(
        mut self,
        product_variant_id: impl Into<String>,
        tiers: impl IntoIterator<Item = PricingTier>,
    ) -> Result<Self, PricingError> {
        self.tables
            .insert(product_variant_id.into(), TierTable::new(tiers)?);

        Ok(self)
    }

    /// Finish the catalog.
    pub fn build(self) -> TierCatalog {
        TierCatalog {
            tables: self.tables,
        }
    }
}

/// Shared, swappable reference to the current catalog.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<TierCatalog>>,
}

impl CatalogHandle {
    /// Wrap a catalog.
    pub fn new(catalog: TierCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog as of now. Later replacements do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<TierCatalog> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap in a new catalog, returning the previous one.
    pub fn replace(&self, catalog: TierCatalog) -> Arc<TierCatalog> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);

        std::mem::replace(&mut *current, Arc::new(catalog))
    }
}
