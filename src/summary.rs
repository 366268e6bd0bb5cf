//! Cart Summary Rendering
//!
//! Writes a [`CartSummary`] as a terminal table: one block of rows per
//! supplier, then the cart totals and any lines left out of them.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    aggregate::{CartGroup, CartSummary, PricedLine},
    money::{SettleError, settle},
    tiers::PricingTier,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// An amount could not be settled into the summary currency.
    #[error(transparent)]
    Settle(#[from] SettleError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write `summary` to `out`.
///
/// # Errors
///
/// Returns an error if an amount cannot be settled or the output cannot be written.
pub fn write_summary(mut out: impl io::Write, summary: &CartSummary) -> Result<(), SummaryError> {
    let currency = summary.currency();
    let mut builder = Builder::default();
    let mut group_boundaries = Vec::with_capacity(summary.groups().len());

    builder.push_record([
        "Supplier",
        "Item",
        "Variant",
        "Qty",
        "Unit Price",
        "Total",
        "Tier",
    ]);

    let mut row = 1;

    for group in summary.groups() {
        group_boundaries.push(row);
        row += push_group_rows(&mut builder, group, currency)?;
    }

    write_table(&mut out, builder, &group_boundaries)?;
    write_totals(&mut out, summary)?;

    Ok(())
}

fn push_group_rows(
    builder: &mut Builder,
    group: &CartGroup,
    currency: &'static Currency,
) -> Result<usize, SummaryError> {
    let supplier = if group.supplier().verified {
        format!("{} ✓", group.supplier().name)
    } else {
        group.supplier().name.clone()
    };

    for (idx, line) in group.lines().iter().enumerate() {
        let name = if idx == 0 { supplier.as_str() } else { "" };

        builder.push_record(line_cells(name, line, currency)?);
    }

    builder.push_record([
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        "Subtotal".to_string(),
        money(group.subtotal(), currency)?,
        String::new(),
    ]);

    Ok(group.lines().len() + 1)
}

fn line_cells(
    supplier: &str,
    line: &PricedLine,
    currency: &'static Currency,
) -> Result<[String; 7], SummaryError> {
    let resolution = line.resolution();

    let mut tier = tier_label(resolution.tier());

    if resolution.is_fallback() {
        tier.push_str(" (base)");
    }

    Ok([
        supplier.to_string(),
        line.line_item().id().to_string(),
        line.line_item().product_variant_id().to_string(),
        resolution.quantity().to_string(),
        money(line.unit_price(), currency)?,
        money(line.total_price(), currency)?,
        tier,
    ])
}

fn tier_label(tier: &PricingTier) -> String {
    match tier.max_quantity() {
        Some(max) => format!("{}-{max}", tier.min_quantity()),
        None => format!("{}+", tier.min_quantity()),
    }
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    group_boundaries: &[usize],
) -> Result<(), SummaryError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();

    for &row in group_boundaries {
        theme.insert_horizontal_line(row, separator);
    }

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| SummaryError::IO)
}

fn write_totals(out: &mut impl io::Write, summary: &CartSummary) -> Result<(), SummaryError> {
    let currency = summary.currency();
    let totals = summary.totals();

    let rows = [
        ("Subtotal:", money(totals.subtotal(), currency)?),
        ("Taxes:", money(totals.taxes(), currency)?),
        ("Delivery:", money(totals.delivery_total(), currency)?),
        ("Total:", money(totals.grand_total(), currency)?),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")
            .map_err(|_err| SummaryError::IO)?;
    }

    writeln!(out, " {:>label_width$}  {}", "Items:", totals.item_count())
        .map_err(|_err| SummaryError::IO)?;

    if !summary.is_complete() {
        writeln!(out, "\n Excluded:").map_err(|_err| SummaryError::IO)?;

        for error in summary.errors() {
            writeln!(out, "   line {}: {}", error.line_item_id, error.error)
                .map_err(|_err| SummaryError::IO)?;
        }
    }

    writeln!(out).map_err(|_err| SummaryError::IO)
}

fn money(amount: Decimal, currency: &'static Currency) -> Result<String, SummaryError> {
    let settled: Money<'static, Currency> = settle(amount, currency)?;

    Ok(settled.to_string())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{
        aggregate::CartAggregator,
        items::{CartLineItem, Supplier},
        tax::TaxRate,
        tiers::TierError,
    };

    use super::*;

    fn line(
        id: &str,
        supplier: &Supplier,
        quantity: i64,
        tiers: &[(u64, Option<u64>, i64)],
    ) -> Result<CartLineItem, TierError> {
        let tiers = tiers
            .iter()
            .map(|&(min, max, price)| PricingTier::new(min, max, Decimal::new(price, 2)))
            .collect::<Result<Vec<_>, _>>()?;

        let item = CartLineItem::new(id, format!("variant-{id}"), quantity, supplier.clone());

        Ok(item.with_tiers(tiers))
    }

    fn render(summary: &CartSummary) -> Result<String, Box<dyn std::error::Error>> {
        let mut out = Vec::new();
        write_summary(&mut out, summary)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn renders_groups_lines_and_totals() -> TestResult {
        let mill = Supplier::new("mill", "Northern Mill").verified();
        let dairy = Supplier::new("dairy", "Dale Dairy");

        let items = [
            line("1", &mill, 60, &[(1, Some(49), 250), (50, None, 200)])?,
            line("2", &dairy, 3, &[(1, None, 120)])?,
        ];

        let aggregator = CartAggregator::new(TaxRate::new(Decimal::new(2, 1))?, GBP);
        let summary = aggregator.aggregate(&items)?;
        let output = render(&summary)?;

        assert!(output.contains("Northern Mill ✓"));
        assert!(output.contains("Dale Dairy"));
        assert!(output.contains("variant-1"));
        assert!(output.contains("50+"));
        assert!(output.contains("Subtotal:"));
        assert!(output.contains("Total:"));
        assert!(!output.contains("Excluded:"));

        Ok(())
    }

    #[test]
    fn marks_base_tier_fallback() -> TestResult {
        let mill = Supplier::new("mill", "Northern Mill");
        let items = [line("1", &mill, 5, &[(10, Some(99), 250)])?];

        let summary = CartAggregator::new(TaxRate::zero(), GBP).aggregate(&items)?;
        let output = render(&summary)?;

        assert!(output.contains("10-99 (base)"));

        Ok(())
    }

    #[test]
    fn lists_excluded_lines() -> TestResult {
        let mill = Supplier::new("mill", "Northern Mill");
        let items = [
            line("1", &mill, 2, &[(1, None, 250)])?,
            line("2", &mill, 0, &[(1, None, 250)])?,
        ];

        let summary = CartAggregator::new(TaxRate::zero(), GBP).aggregate(&items)?;
        let output = render(&summary)?;

        assert!(output.contains("Excluded:"));
        assert!(output.contains("line 2:"));

        Ok(())
    }

    #[test]
    fn empty_cart_renders_header_and_zero_totals() -> TestResult {
        let summary = CartAggregator::new(TaxRate::zero(), GBP).aggregate(&[])?;
        let output = render(&summary)?;

        assert!(output.contains("Supplier"));
        assert!(output.contains("Items:"));

        Ok(())
    }
}
