//! Cart Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    items::{CartLineItem, Supplier},
    tiers::PricingTier,
};

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Map of supplier key -> supplier fixture
    pub suppliers: FxHashMap<String, SupplierFixture>,

    /// Line items in cart order
    pub items: Vec<LineItemFixture>,
}

/// Supplier fixture from YAML
#[derive(Debug, Deserialize)]
pub struct SupplierFixture {
    /// Display name
    pub name: String,

    /// Logo URL
    #[serde(default)]
    pub logo: Option<String>,

    /// Whether the supplier passed verification
    #[serde(default)]
    pub verified: bool,
}

impl SupplierFixture {
    /// Build the supplier under the given key.
    pub fn to_supplier(&self, key: &str) -> Supplier {
        let mut supplier = Supplier::new(key, self.name.as_str());

        if let Some(logo) = &self.logo {
            supplier = supplier.with_logo(logo.as_str());
        }

        if self.verified {
            supplier = supplier.verified();
        }

        supplier
    }
}

/// Line item fixture from YAML
#[derive(Debug, Deserialize)]
pub struct LineItemFixture {
    /// Line item id
    pub id: String,

    /// Product variant id
    pub product_variant_id: String,

    /// Key into the fixture's suppliers
    pub supplier: String,

    /// Requested quantity, may be zero or negative to exercise validation
    pub quantity: i64,

    /// Tiers as `[min, max, price]`, `max` may be `~` for unbounded
    #[serde(default)]
    pub tiers: Vec<(u64, Option<u64>, String)>,
}

impl LineItemFixture {
    /// Build the line item, resolving its supplier from `suppliers`.
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier is unknown, a price cannot be parsed
    /// or a tier is malformed.
    pub fn to_line_item(
        &self,
        suppliers: &FxHashMap<String, Supplier>,
    ) -> Result<CartLineItem, FixtureError> {
        let supplier = suppliers
            .get(&self.supplier)
            .ok_or_else(|| FixtureError::UnknownSupplier(self.supplier.clone()))?;

        let tiers = self
            .tiers
            .iter()
            .map(|(min, max, price)| -> Result<PricingTier, FixtureError> {
                Ok(PricingTier::new(*min, *max, parse_price(price)?)?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CartLineItem::new(
            self.id.as_str(),
            self.product_variant_id.as_str(),
            self.quantity,
            supplier.clone(),
        )
        .with_tiers(tiers))
    }
}

/// Parse a unit price written as a decimal string, e.g. `"900"` or `"0.10"`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if `s` is not a decimal number.
pub fn parse_price(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}
