//! Items

use smallvec::SmallVec;

use crate::tiers::PricingTier;

/// Vendor identity denormalised onto each cart line for grouping and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Supplier {
    /// Supplier identifier, the cart grouping key
    pub id: String,

    /// Display name
    pub name: String,

    /// Logo URL, if the supplier has one
    pub logo: Option<String>,

    /// Whether the marketplace has verified the supplier
    pub verified: bool,
}

impl Supplier {
    /// Create an unverified supplier without a logo.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: None,
            verified: false,
        }
    }

    /// Attach a logo URL.
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Mark the supplier as verified.
    #[must_use]
    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }
}

/// A product variant in a buyer's cart.
///
/// Quantities are kept as read from storage, so zero or negative values are
/// representable and rejected at pricing time. Pricing tiers are read from the
/// referenced variant and may be empty if the catalog has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    id: String,
    product_variant_id: String,
    quantity: i64,
    pricing_tiers: SmallVec<[PricingTier; 4]>,
    supplier: Supplier,
}

impl CartLineItem {
    /// Create a line item with no pricing tiers.
    pub fn new(
        id: impl Into<String>,
        product_variant_id: impl Into<String>,
        quantity: i64,
        supplier: Supplier,
    ) -> Self {
        Self {
            id: id.into(),
            product_variant_id: product_variant_id.into(),
            quantity,
            pricing_tiers: SmallVec::new(),
            supplier,
        }
    }

    /// Replace the line's pricing tiers.
    #[must_use]
    pub fn with_tiers(mut self, tiers: impl IntoIterator<Item = PricingTier>) -> Self {
        self.pricing_tiers = tiers.into_iter().collect();
        self
    }

    /// Line identifier, unique within a cart.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Referenced product variant.
    pub fn product_variant_id(&self) -> &str {
        &self.product_variant_id
    }

    /// Requested quantity.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Pricing tiers of the referenced variant, in the order they were supplied.
    pub fn pricing_tiers(&self) -> &[PricingTier] {
        &self.pricing_tiers
    }

    /// Supplier owning the variant.
    pub fn supplier(&self) -> &Supplier {
        &self.supplier
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }
}
