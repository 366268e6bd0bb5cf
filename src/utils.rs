//! Utils

use clap::Parser;

/// Arguments for the cart example
#[derive(Debug, Parser)]
pub struct ExampleCartArgs {
    /// Fixture set to load the cart & pricing config from
    #[clap(short, long, default_value = "kofi")]
    pub fixture: String,

    /// Delivery total to fold into the grand total
    #[clap(short, long)]
    pub delivery: Option<String>,

    /// Override the fixture's tax rate, e.g. "19.25%" or "0.1925"
    #[clap(short, long)]
    pub tax_rate: Option<String>,

    /// Price the cart through the checkout service instead of directly
    #[clap(short, long)]
    pub checkout: bool,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_kofi_fixture() -> TestResult {
        let args = ExampleCartArgs::try_parse_from(["cart"])?;

        assert_eq!(args.fixture, "kofi");
        assert_eq!(args.delivery, None);
        assert!(!args.checkout);

        Ok(())
    }

    #[test]
    fn parses_overrides() -> TestResult {
        let args = ExampleCartArgs::try_parse_from([
            "cart", "-f", "mixed", "-d", "2500", "-t", "5%", "--checkout",
        ])?;

        assert_eq!(args.fixture, "mixed");
        assert_eq!(args.delivery.as_deref(), Some("2500"));
        assert_eq!(args.tax_rate.as_deref(), Some("5%"));
        assert!(args.checkout);

        Ok(())
    }
}
