//! Cart Example
//!
//! Prices a fixture cart and prints the supplier groups and totals.
//!
//! Use `-f` to load a fixture set by name
//! Use `-d` to add a delivery total, e.g. `-d 2500`
//! Use `-t` to override the fixture's tax rate, e.g. `-t 5%`
//! Use `-c` to price the cart through the checkout service
//!
//! Set `RUST_LOG=farmgate=debug` to see the aggregator's logs.

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use farmgate::{
    aggregate::{CartAggregator, CartSummary},
    catalog::CatalogHandle,
    checkout::Checkout,
    fixtures::Fixture,
    store::{CartId, CartStore, InMemoryCartStore},
    summary::write_summary,
    tax::TaxRate,
    utils::ExampleCartArgs,
};

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init()?;

    let args = ExampleCartArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;

    let mut config = *fixture.config();

    if let Some(rate) = args.tax_rate.as_deref() {
        config = config.with_tax_rate(rate.parse::<TaxRate>()?);
    }

    let start = Instant::now();

    let summary = if args.checkout {
        summarize_via_checkout(&fixture, config.aggregator())?
    } else {
        config.aggregator().aggregate(fixture.items())?
    };

    let summary = match args.delivery.as_deref() {
        Some(delivery) => summary.with_delivery_total(delivery.parse::<Decimal>()?)?,
        None => summary,
    };

    let elapsed = start.elapsed().as_secs_f32();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_summary(&mut handle, &summary)?;

    println!("Priced in {elapsed}s");

    Ok(())
}

fn summarize_via_checkout(
    fixture: &Fixture,
    aggregator: CartAggregator,
) -> Result<CartSummary> {
    let id = CartId::from("demo");

    let mut store = InMemoryCartStore::new();
    store.save(&id, fixture.cart())?;

    let checkout = Checkout::new(store, CatalogHandle::new(fixture.catalog()?), aggregator);

    Ok(checkout.summarize(&id)?)
}
