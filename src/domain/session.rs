//! Session state for one quoting user: the current rate table plus display
//! preferences, owned explicitly instead of living in ambient globals.

use thiserror::Error;

use super::costing::compute_cost;
use super::currency::{self, DEFAULT_USD_RATE};
use super::entities::{Currency, Quote, QuoteRequest, RateEntry};
use super::normalize::{normalize_rows, RawRow};
use super::rate_table::RateTable;

/// Display preferences, user-overridable at any time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub currency: Currency,
    /// CNY per USD. Static for the session, never fetched.
    pub usd_rate: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Cny,
            usd_rate: DEFAULT_USD_RATE,
        }
    }
}

#[derive(Debug, Error)]
pub enum QuoteError {
    /// No tier exists for the requested country (the method alone never
    /// fails, it only narrows). The caller shows a message and computes
    /// nothing.
    #[error("no rates for country {country:?} (method {method:?})")]
    RateNotFound { country: String, method: String },
}

/// One quoting session: rate table plus preferences, replace-on-load.
#[derive(Clone, Debug, Default)]
pub struct QuoteSession {
    config: SessionConfig,
    table: RateTable,
}

impl QuoteSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            table: RateTable::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.config.currency = currency;
    }

    /// Overrides the exchange rate. Non-finite or non-positive values are
    /// ignored so presentation can never divide by zero.
    pub fn set_usd_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.config.usd_rate = rate;
        }
    }

    /// Replaces the table with already-normalized entries.
    pub fn install(&mut self, entries: Vec<RateEntry>) {
        self.table.load(entries);
    }

    /// Normalizes raw spreadsheet rows and replaces the table. Loader
    /// failures never reach this point, so the previous table survives any
    /// failed load untouched.
    pub fn install_rows(&mut self, rows: &[RawRow]) {
        self.install(normalize_rows(rows));
    }

    /// Computes an itemized quote for one request.
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        let weight_grams = request.weight_grams();
        let entry = self
            .table
            .find_for_weight(&request.country, &request.method, weight_grams)
            .ok_or_else(|| QuoteError::RateNotFound {
                country: request.country.clone(),
                method: request.method.clone(),
            })?;

        let cost = compute_cost(entry, weight_grams);
        Ok(Quote {
            country: entry.country.clone(),
            method: entry.method.clone(),
            weight_grams,
            formula: format!(
                "{} + ({} - {}) / {} × {} + {}",
                entry.base_fee,
                weight_grams,
                entry.base_weight,
                entry.add_unit_weight,
                entry.add_unit_price,
                entry.register_fee
            ),
            base_fee: entry.base_fee,
            extra: cost.extra,
            register_fee: entry.register_fee,
            total_cny: cost.total,
            total_usd: cost.total / self.config.usd_rate,
            usd_rate: self.config.usd_rate,
            currency: self.config.currency,
        })
    }
}

impl Quote {
    /// The ordered labeled lines of the quote breakdown, as the display
    /// collaborator renders them.
    pub fn lines(&self) -> Vec<String> {
        let method = if self.method.is_empty() {
            "-"
        } else {
            self.method.as_str()
        };
        let tag = currency::present(self.total_cny, self.currency, self.usd_rate);
        vec![
            format!("Country: {}", self.country),
            format!("Method: {method}"),
            format!("Weight: {} g", self.weight_grams),
            format!("Formula: {}", self.formula),
            format!(
                "Details: {} + {:.2} + {} = {:.2} CNY",
                self.base_fee, self.extra, self.register_fee, self.total_cny
            ),
            format!("Result: {}", tag.display()),
            "---".to_string(),
            format!(
                "CNY: {} | USD: {}",
                currency::format_cny(self.total_cny),
                currency::format_usd(self.total_usd)
            ),
        ]
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WeightUnit;

    fn entry(country: &str, method: &str) -> RateEntry {
        RateEntry {
            country: country.to_string(),
            method: method.to_string(),
            base_weight: 1.0,
            base_fee: 20.0,
            add_unit_weight: 1.0,
            add_unit_price: 5.0,
            register_fee: 2.0,
            ..RateEntry::default()
        }
    }

    fn session() -> QuoteSession {
        let mut session = QuoteSession::new();
        session.install(vec![entry("Test", "Air"), entry("Test", "Sea")]);
        session
    }

    fn request(country: &str, method: &str, weight: f64, unit: WeightUnit) -> QuoteRequest {
        QuoteRequest {
            country: country.to_string(),
            method: method.to_string(),
            weight,
            unit,
        }
    }

    #[test]
    fn quote_computes_the_itemized_breakdown() {
        let quote = session()
            .quote(&request("Test", "Air", 5.0, WeightUnit::Grams))
            .unwrap();

        assert_eq!(quote.extra, 20.0);
        assert_eq!(quote.total_cny, 42.0);
        assert_eq!(quote.formula, "20 + (5 - 1) / 1 × 5 + 2");
    }

    #[test]
    fn kilogram_weights_convert_to_grams() {
        let quote = session()
            .quote(&request("Test", "Air", 2.0, WeightUnit::Kilograms))
            .unwrap();

        assert_eq!(quote.weight_grams, 2000.0);
    }

    #[test]
    fn unknown_method_falls_back_to_the_country() {
        let quote = session()
            .quote(&request("Test", "Train", 1.0, WeightUnit::Grams))
            .unwrap();

        assert_eq!(quote.method, "Air");
    }

    #[test]
    fn unknown_country_is_a_distinguishable_not_found() {
        let err = session()
            .quote(&request("Nowhere", "Air", 1.0, WeightUnit::Grams))
            .unwrap_err();

        assert!(matches!(err, QuoteError::RateNotFound { .. }));
    }

    #[test]
    fn install_replaces_the_previous_table() {
        let mut session = session();
        session.install(vec![entry("Peru", "Sea")]);

        assert_eq!(session.table().countries(), vec!["Peru"]);
    }

    #[test]
    fn rate_overrides_are_guarded() {
        let mut session = session();
        session.set_usd_rate(0.0);
        session.set_usd_rate(f64::NAN);
        assert_eq!(session.config().usd_rate, DEFAULT_USD_RATE);

        session.set_usd_rate(6.5);
        assert_eq!(session.config().usd_rate, 6.5);
    }

    #[test]
    fn usd_quotes_carry_the_cny_reference() {
        let mut session = session();
        session.set_currency(Currency::Usd);
        session.set_usd_rate(7.2);

        let quote = session
            .quote(&request("Test", "Air", 1.0, WeightUnit::Grams))
            .unwrap();
        let lines = quote.lines();

        assert!((quote.total_usd - 22.0 / 7.2).abs() < 1e-9);
        assert!(lines.iter().any(|l| l.starts_with("Result: $") && l.contains("(≈ ¥22.00)")));
        assert_eq!(lines.last().unwrap().as_str(), "CNY: ¥22.00 | USD: $3.06");
    }
}
