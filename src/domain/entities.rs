use serde::{Deserialize, Serialize};

/// One pricing tier for a (country, shipping method) pair.
///
/// All weights are grams, all fees are CNY. Normalization guarantees every
/// numeric field is finite and non-negative; missing or unparseable source
/// cells land on the per-field defaults instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Destination country; identity key component.
    pub country: String,
    /// Shipping method; `"Default"` when the source left it blank.
    pub method: String,
    /// Lower bound of the weight band this tier applies to.
    pub start_weight: f64,
    /// Upper bound of the weight band this tier applies to.
    pub end_weight: f64,
    /// Weight already covered by the base fee.
    pub base_weight: f64,
    /// Flat charge for weight up to `base_weight`.
    pub base_fee: f64,
    /// Increment unit for weight beyond `base_weight`.
    pub add_unit_weight: f64,
    /// Charge per `add_unit_weight` beyond `base_weight`.
    pub add_unit_price: f64,
    /// Flat surcharge applied regardless of weight.
    pub register_fee: f64,
}

/// Sentinel method name for rows without one.
pub const DEFAULT_METHOD: &str = "Default";

impl Default for RateEntry {
    fn default() -> Self {
        Self {
            country: String::new(),
            method: DEFAULT_METHOD.to_string(),
            start_weight: 0.0,
            end_weight: 30_000.0,
            base_weight: 1.0,
            base_fee: 0.0,
            add_unit_weight: 1.0,
            add_unit_price: 0.0,
            register_fee: 0.0,
        }
    }
}

impl RateEntry {
    /// Whether `weight_g` falls inside this tier's declared weight band.
    pub fn band_contains(&self, weight_g: f64) -> bool {
        weight_g >= self.start_weight && weight_g <= self.end_weight
    }
}

/// Unit of the weight the user typed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[default]
    Grams,
    Kilograms,
}

impl WeightUnit {
    /// Converts a value in this unit to grams.
    pub fn to_grams(self, value: f64) -> f64 {
        match self {
            WeightUnit::Grams => value,
            WeightUnit::Kilograms => value * 1000.0,
        }
    }
}

/// Supported display currencies. CNY is the base currency every fee is
/// denominated in; USD amounts are derived through the session exchange rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    Cny,
    Usd,
}

/// One user query as it arrives from the form collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub country: String,
    /// Empty string means "no method selected"; lookup then falls back to the
    /// first entry for the country.
    pub method: String,
    pub weight: f64,
    pub unit: WeightUnit,
}

impl QuoteRequest {
    pub fn weight_grams(&self) -> f64 {
        self.unit.to_grams(self.weight)
    }
}

/// Result of one cost computation: the additional-weight charge and the
/// grand total, both in CNY.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostBreakdown {
    pub total: f64,
    pub extra: f64,
}

/// One computed quote, consumed by the display layer and discarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub country: String,
    pub method: String,
    pub weight_grams: f64,
    /// The fee arithmetic instantiated with the matched tier's numbers.
    pub formula: String,
    pub base_fee: f64,
    pub extra: f64,
    pub register_fee: f64,
    pub total_cny: f64,
    pub total_usd: f64,
    /// Exchange rate the USD amount was derived with.
    pub usd_rate: f64,
    pub currency: Currency,
}
