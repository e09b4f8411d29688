//! Domain logic for shipping-rate quoting lives here.

pub mod costing;
pub mod currency;
pub mod entities;
pub mod normalize;
pub mod rate_table;
pub mod session;

pub use costing::compute_cost;
pub use currency::{format_cny, format_usd, present, PriceTag, DEFAULT_USD_RATE};
pub use entities::{
    CostBreakdown, Currency, Quote, QuoteRequest, RateEntry, WeightUnit, DEFAULT_METHOD,
};
pub use normalize::{normalize_row, normalize_rows, RawRow};
pub use rate_table::{RateTable, SharedRateTable};
pub use session::{QuoteError, QuoteSession, SessionConfig};
