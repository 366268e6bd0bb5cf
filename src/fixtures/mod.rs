//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    aggregate::{AggregateError, CartSummary},
    cart::Cart,
    catalog::TierCatalog,
    config::{ConfigError, PricingConfig},
    fixtures::carts::CartFixture,
    items::{CartLineItem, Supplier},
    pricing::PricingError,
    tiers::TierError,
};

pub mod carts;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Supplier not found
    #[error("Supplier not found: {0}")]
    UnknownSupplier(String),

    /// Invalid tier
    #[error(transparent)]
    Tier(#[from] TierError),

    /// Invalid tier table
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Invalid pricing config
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Aggregation failed
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Pricing settings for the set
    config: PricingConfig,

    /// Supplier key -> supplier
    suppliers: FxHashMap<String, Supplier>,

    /// Line items in cart order
    items: Vec<CartLineItem>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            config: PricingConfig::default(),
            suppliers: FxHashMap::default(),
            items: Vec::new(),
        }
    }

    /// Load pricing settings from `config/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_config(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("config").join(format!("{name}.yml"));

        self.config = PricingConfig::from_path(file_path)?;

        Ok(self)
    }

    /// Load suppliers and line items from `carts/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an item
    /// references an unknown supplier or carries a malformed tier.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("carts").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CartFixture = serde_norway::from_str(&contents)?;

        for (key, supplier_fixture) in &fixture.suppliers {
            self.suppliers
                .insert(key.clone(), supplier_fixture.to_supplier(key));
        }

        for item_fixture in &fixture.items {
            let item = item_fixture.to_line_item(&self.suppliers)?;

            self.items.push(item);
        }

        Ok(self)
    }

    /// Load a complete fixture set (config and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_config(name)?.load_cart(name)?;

        Ok(fixture)
    }

    /// Get a supplier by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier is not found.
    pub fn supplier(&self, key: &str) -> Result<&Supplier, FixtureError> {
        self.suppliers
            .get(key)
            .ok_or_else(|| FixtureError::UnknownSupplier(key.to_string()))
    }

    /// Pricing settings
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Get all items
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Create a cart from the loaded items
    pub fn cart(&self) -> Cart {
        Cart::with_items(self.items.clone())
    }

    /// Build a catalog from the tiers written on the items. Items without
    /// tiers are left out, so their variants stay unknown to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a tier table cannot be built.
    pub fn catalog(&self) -> Result<TierCatalog, FixtureError> {
        let mut builder = TierCatalog::builder();

        for item in self.items.iter().filter(|item| !item.pricing_tiers().is_empty()) {
            builder = builder.variant(
                item.product_variant_id(),
                item.pricing_tiers().iter().copied(),
            )?;
        }

        Ok(builder.build())
    }

    /// Aggregate the loaded items with the fixture's config
    ///
    /// # Errors
    ///
    /// Returns an error if the cart totals overflow.
    pub fn aggregate(&self) -> Result<CartSummary, FixtureError> {
        Ok(self.config.aggregator().aggregate(&self.items)?)
    }
}
