//! Config
//!
//! Marketplace pricing settings: the settlement currency and the tax rate
//! applied to cart subtotals. Loaded from YAML, e.g.
//!
//! ```yaml
//! currency: XAF
//! tax_rate: "19.25%"
//! ```

use std::{fs, path::Path};

use rusty_money::{Findable, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    aggregate::CartAggregator,
    tax::{TaxRate, TaxRateError},
};

/// Errors raised while loading a [`PricingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unparseable tax rate
    #[error(transparent)]
    TaxRate(#[from] TaxRateError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPricingConfig {
    #[serde(default)]
    currency: Option<String>,

    #[serde(default)]
    tax_rate: Option<String>,
}

/// Currency and tax settings for pricing carts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingConfig {
    currency: &'static Currency,
    tax_rate: TaxRate,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: rusty_money::iso::XAF,
            tax_rate: TaxRate::default(),
        }
    }
}

impl PricingConfig {
    /// Create a config from its parts.
    pub fn new(currency: &'static Currency, tax_rate: TaxRate) -> Self {
        Self { currency, tax_rate }
    }

    /// Parse a config from YAML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, the currency code is
    /// unknown or the tax rate cannot be parsed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawPricingConfig = serde_norway::from_str(yaml)?;

        Self::try_from(raw)
    }

    /// Read and parse a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Self::from_yaml_str`] fails.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Settlement currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Tax rate on cart subtotals
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Replace the tax rate.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// An aggregator using these settings.
    pub fn aggregator(&self) -> CartAggregator {
        CartAggregator::new(self.tax_rate, self.currency)
    }
}

impl TryFrom<RawPricingConfig> for PricingConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPricingConfig) -> Result<Self, Self::Error> {
        let mut config = Self::default();

        if let Some(code) = raw.currency {
            config.currency = Currency::find(code.trim())
                .ok_or_else(|| ConfigError::UnknownCurrency(code.clone()))?;
        }

        if let Some(rate) = raw.tax_rate {
            config.tax_rate = rate.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal::Decimal;
    use rusty_money::iso::{GBP, XAF};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_to_central_african_franc() {
        let config = PricingConfig::default();

        assert_eq!(config.currency(), XAF);
        assert_eq!(config.tax_rate().fraction(), Decimal::new(1925, 4));
    }

    #[test]
    fn parses_currency_and_percent_rate() -> TestResult {
        let config = PricingConfig::from_yaml_str("currency: GBP\ntax_rate: \"20%\"\n")?;

        assert_eq!(config.currency(), GBP);
        assert_eq!(config.tax_rate().fraction(), Decimal::new(2, 1));

        Ok(())
    }

    #[test]
    fn missing_keys_use_defaults() -> TestResult {
        let config = PricingConfig::from_yaml_str("tax_rate: \"0\"\n")?;

        assert_eq!(config.currency(), XAF);
        assert_eq!(config.tax_rate(), TaxRate::zero());

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = PricingConfig::from_yaml_str("currency: ZZZ\n");

        assert!(matches!(result, Err(ConfigError::UnknownCurrency(code)) if code == "ZZZ"));
    }

    #[test]
    fn negative_tax_rate_is_rejected() {
        let result = PricingConfig::from_yaml_str("tax_rate: \"-5%\"\n");

        assert!(matches!(
            result,
            Err(ConfigError::TaxRate(TaxRateError::Negative(_)))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = PricingConfig::from_yaml_str("currency: XAF\nvat: 5\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn loads_from_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "currency: XAF\ntax_rate: \"19.25%\"")?;

        let config = PricingConfig::from_path(file.path())?;

        assert_eq!(config, PricingConfig::default());

        Ok(())
    }

    #[test]
    fn aggregator_carries_settings() -> TestResult {
        let config = PricingConfig::from_yaml_str("currency: GBP\ntax_rate: \"5%\"\n")?;

        let aggregator = config.aggregator();

        assert_eq!(aggregator.currency(), GBP);
        assert_eq!(aggregator.tax_rate(), config.tax_rate());

        Ok(())
    }
}
