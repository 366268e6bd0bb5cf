//! Integration tests over the bundled fixture sets.
//!
//! The `kofi` set is a two-supplier cart:
//!
//! - Kofi Farms: 120 × maize at the 50+ tier (900) = 108,000, plus
//!   5 × cassava flour at 500 = 2,500
//! - GreenCo: 10 × fertilizer at the 10+ tier (180) = 1,800
//!
//! Subtotal 112,300; tax at 19.25% is 21,617.75; grand total 133,917.75.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::XAF};
use testresult::TestResult;

use farmgate::{
    cart::Cart,
    catalog::{CatalogHandle, TierCatalog},
    checkout::Checkout,
    fixtures::Fixture,
    money::settle,
    pricing::PricingError,
    store::{CartId, CartStore, InMemoryCartStore},
    summary::write_summary,
    tiers::PricingTier,
};

#[test]
fn kofi_cart_end_to_end() -> TestResult {
    let fixture = Fixture::from_set("kofi")?;

    let summary = fixture.aggregate()?;

    let groups: Vec<(&str, Decimal)> = summary
        .groups()
        .iter()
        .map(|group| (group.supplier().name.as_str(), group.subtotal()))
        .collect();

    assert_eq!(
        groups,
        vec![
            ("Kofi Farms", Decimal::new(110_500, 0)),
            ("GreenCo", Decimal::new(1_800, 0)),
        ]
    );

    let totals = summary.totals();

    assert_eq!(totals.subtotal(), Decimal::new(112_300, 0));
    assert_eq!(totals.taxes(), Decimal::new(2_161_775, 2));
    assert_eq!(totals.delivery_total(), Decimal::ZERO);
    assert_eq!(totals.grand_total(), Decimal::new(13_391_775, 2));
    assert_eq!(totals.item_count(), 3);
    assert!(summary.is_complete());

    // XAF has no minor unit, so settling rounds to the nearest franc.
    assert_eq!(settle(totals.grand_total(), XAF)?, Money::from_minor(133_918, XAF));

    Ok(())
}

#[test]
fn kofi_cart_with_delivery() -> TestResult {
    let fixture = Fixture::from_set("kofi")?;

    let summary = fixture
        .aggregate()?
        .with_delivery_total(Decimal::new(5_000, 0))?;

    assert_eq!(
        summary.totals().grand_total(),
        Decimal::new(13_891_775, 2)
    );

    Ok(())
}

#[test]
fn mixed_cart_reports_bad_lines_and_prices_the_rest() -> TestResult {
    let fixture = Fixture::from_set("mixed")?;

    let summary = fixture.aggregate()?;

    let suppliers: Vec<&str> = summary
        .groups()
        .iter()
        .map(|group| group.supplier().id.as_str())
        .collect();

    assert_eq!(suppliers, vec!["kofi", "greenco"]);

    let rice = summary
        .groups()
        .get(1)
        .and_then(|group| group.lines().first())
        .ok_or("missing rice line")?;

    assert!(rice.resolution().is_fallback());
    assert_eq!(rice.total_price(), Decimal::new(4_250, 0));

    let errors: Vec<(&str, &PricingError)> = summary
        .errors()
        .iter()
        .map(|error| (error.line_item_id.as_str(), &error.error))
        .collect();

    assert_eq!(
        errors,
        vec![
            ("3", &PricingError::InvalidQuantity(0)),
            ("4", &PricingError::InvalidPricingConfiguration),
        ]
    );

    assert_eq!(summary.totals().subtotal(), Decimal::new(34_250, 0));
    assert_eq!(summary.totals().grand_total(), Decimal::new(40_843_125, 3));
    assert_eq!(summary.totals().item_count(), 2);

    Ok(())
}

#[test]
fn large_cart_totals() -> TestResult {
    let fixture = Fixture::from_set("large")?;

    let summary = fixture.aggregate()?;

    assert_eq!(summary.groups().len(), 4);
    assert_eq!(summary.totals().subtotal(), Decimal::new(48_591_250, 2));
    assert_eq!(summary.totals().taxes(), Decimal::new(9_353_815_625, 5));
    assert_eq!(
        summary.totals().grand_total(),
        Decimal::new(57_945_065_625, 5)
    );

    Ok(())
}

#[test]
fn checkout_prices_fixture_cart_from_catalog() -> TestResult {
    let fixture = Fixture::from_set("kofi")?;
    let id = CartId::from("kofi");

    // Lines go into the store without tiers; checkout attaches them from the catalog.
    let bare_cart = Cart::with_items(
        fixture
            .items()
            .iter()
            .map(|item| item.clone().with_tiers(Vec::<PricingTier>::new()))
            .collect::<Vec<_>>(),
    );

    let mut store = InMemoryCartStore::new();
    store.save(&id, bare_cart)?;

    let mut checkout = Checkout::new(
        store,
        CatalogHandle::new(fixture.catalog()?),
        fixture.config().aggregator(),
    );

    assert_eq!(checkout.summarize(&id)?, fixture.aggregate()?);

    // A price drop on maize is picked up by the next summary.
    let cheaper = TierCatalog::builder()
        .variant(
            "maize-50kg",
            [PricingTier::from_quantity(1, Decimal::new(850, 0))?],
        )?
        .variant(
            "fertilizer-npk-25kg",
            [PricingTier::from_quantity(1, Decimal::new(180, 0))?],
        )?
        .variant(
            "cassava-flour-10kg",
            [PricingTier::from_quantity(1, Decimal::new(500, 0))?],
        )?
        .build();

    checkout.catalog().replace(cheaper);

    assert_eq!(
        checkout.summarize(&id)?.totals().subtotal(),
        Decimal::new(106_300, 0)
    );

    checkout.update_quantity(&id, "3", 0)?;

    assert_eq!(
        checkout.summarize(&id)?.totals().subtotal(),
        Decimal::new(103_800, 0)
    );

    Ok(())
}

#[test]
fn summary_renders_fixture_cart() -> TestResult {
    let fixture = Fixture::from_set("mixed")?;

    let mut out = Vec::new();
    write_summary(&mut out, &fixture.aggregate()?)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("Kofi Farms ✓"));
    assert!(output.contains("GreenCo"));
    assert!(!output.contains("Savanna Seeds"));
    assert!(output.contains("Excluded:"));

    Ok(())
}
