//! Money formatting for the two supported currencies. Fees are computed in
//! CNY; USD is derived through a single static, user-overridable rate.

use super::entities::Currency;

/// CNY per USD used until the session overrides it.
pub const DEFAULT_USD_RATE: f64 = 7.2;

pub fn format_cny(value: f64) -> String {
    format!("¥{value:.2}")
}

pub fn format_usd(value: f64) -> String {
    format!("${value:.2}")
}

/// A formatted price: the amount in the chosen currency, plus the original
/// CNY amount for reference when the choice was USD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceTag {
    pub primary: String,
    pub reference: Option<String>,
}

impl PriceTag {
    /// The display string the original quote block shows on its result line.
    pub fn display(&self) -> String {
        match &self.reference {
            Some(reference) => format!("{} (≈ {})", self.primary, reference),
            None => self.primary.clone(),
        }
    }
}

/// Formats `total_cny` in the requested currency with two-decimal precision.
pub fn present(total_cny: f64, currency: Currency, usd_rate: f64) -> PriceTag {
    match currency {
        Currency::Cny => PriceTag {
            primary: format_cny(total_cny),
            reference: None,
        },
        Currency::Usd => PriceTag {
            primary: format_usd(total_cny / usd_rate),
            reference: Some(format_cny(total_cny)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cny_presents_the_total_directly() {
        let tag = present(42.0, Currency::Cny, DEFAULT_USD_RATE);
        assert_eq!(tag.primary, "¥42.00");
        assert_eq!(tag.reference, None);
        assert_eq!(tag.display(), "¥42.00");
    }

    #[test]
    fn usd_divides_by_the_rate_and_keeps_the_cny_reference() {
        let tag = present(720.0, Currency::Usd, 7.2);
        assert_eq!(tag.primary, "$100.00");
        assert_eq!(tag.reference.as_deref(), Some("¥720.00"));
        assert_eq!(tag.display(), "$100.00 (≈ ¥720.00)");
    }

    #[test]
    fn amounts_round_to_two_decimals() {
        assert_eq!(format_cny(10.006), "¥10.01");
        assert_eq!(format_usd(0.3333), "$0.33");
    }
}
