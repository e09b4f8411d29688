//! Pure tiered-fee arithmetic. No I/O, no rounding before the final total.

use super::entities::{CostBreakdown, RateEntry};

/// Computes the charge for shipping `weight_grams` under `entry`.
///
/// Negative weights clamp to zero. Weight at or under the base weight carries
/// no extra charge; beyond it the extra charge prorates linearly per
/// `add_unit_weight` (continuous, intentionally not stepped to whole units).
/// A zero `add_unit_weight` is treated as "no additional charge" rather than
/// dividing by zero; normalization never produces one, so this only concerns
/// hand-built entries.
pub fn compute_cost(entry: &RateEntry, weight_grams: f64) -> CostBreakdown {
    let w = weight_grams.max(0.0);
    let extra = if w > entry.base_weight && entry.add_unit_weight > 0.0 {
        ((w - entry.base_weight) / entry.add_unit_weight) * entry.add_unit_price
    } else {
        0.0
    };
    CostBreakdown {
        total: entry.base_fee + extra + entry.register_fee,
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> RateEntry {
        RateEntry {
            country: "Test".to_string(),
            base_weight: 1.0,
            base_fee: 20.0,
            add_unit_weight: 1.0,
            add_unit_price: 5.0,
            register_fee: 2.0,
            ..RateEntry::default()
        }
    }

    #[test]
    fn weight_within_base_pays_base_plus_register_only() {
        let cost = compute_cost(&entry(), 1.0);
        assert_eq!(cost.extra, 0.0);
        assert_eq!(cost.total, 22.0);

        let cost = compute_cost(&entry(), 0.0);
        assert_eq!(cost.extra, 0.0);
        assert_eq!(cost.total, 22.0);
    }

    #[test]
    fn weight_beyond_base_prorates_linearly() {
        let cost = compute_cost(&entry(), 5.0);
        assert_eq!(cost.extra, 20.0);
        assert_eq!(cost.total, 42.0);
    }

    #[test]
    fn fractional_units_are_not_rounded() {
        let mut e = entry();
        e.base_weight = 100.0;
        e.add_unit_weight = 10.0;
        e.add_unit_price = 0.8;

        let cost = compute_cost(&e, 103.0);
        let expected = ((103.0 - 100.0) / 10.0) * 0.8;
        assert!((cost.extra - expected).abs() < f64::EPSILON);
        assert!((cost.total - (20.0 + expected + 2.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_weight_clamps_to_zero() {
        assert_eq!(compute_cost(&entry(), -40.0), compute_cost(&entry(), 0.0));
    }

    #[test]
    fn zero_add_unit_weight_means_no_extra_charge() {
        let mut e = entry();
        e.add_unit_weight = 0.0;

        let cost = compute_cost(&e, 500.0);
        assert_eq!(cost.extra, 0.0);
        assert_eq!(cost.total, 22.0);
    }
}
