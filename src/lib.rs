//! # shipping_quoter — tiered shipping-cost quotes
//!
//! Computes itemized shipping quotes for a (country, method, weight) query
//! against a tiered rate table that can be replaced wholesale at runtime from
//! a fetched or uploaded spreadsheet.
//!
//! ```rust,ignore
//! use shipping_quoter::{read_rates_file, QuoteRequest, QuoteSession, WeightUnit};
//!
//! let mut session = QuoteSession::new();
//! let rows = read_rates_file("shipping-rates.xlsx".as_ref()).await?;
//! session.install_rows(&rows);
//!
//! let quote = session.quote(&QuoteRequest {
//!     country: "Germany".into(),
//!     method: "Air".into(),
//!     weight: 1.5,
//!     unit: WeightUnit::Kilograms,
//! })?;
//! println!("{quote}");
//! ```
//!
//! ## Modules
//!
//! - [`domain`] — normalization, rate table, cost calculator, currency
//!   presenter, and the per-user quote session
//! - [`infra`] — rate-table sources: HTTP fetch and local file read, XLSX and
//!   CSV parsing into raw rows

pub mod domain;
pub mod infra;

pub use domain::{
    compute_cost, format_cny, format_usd, normalize_row, normalize_rows, present, CostBreakdown,
    Currency, PriceTag, Quote, QuoteError, QuoteRequest, QuoteSession, RateEntry, RateTable,
    RawRow, SessionConfig, SharedRateTable, WeightUnit, DEFAULT_METHOD, DEFAULT_USD_RATE,
};
pub use infra::{read_rates_file, LoadError, RatesClient, TableFormat};
