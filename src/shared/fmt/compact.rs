//! Compact currency notation (`$105.6B`) backed by `rust_decimal`.
//!
//! Values are rounded to at most two fraction digits after scaling; trailing
//! zeros are dropped. A value that rounds up to the next tier is promoted
//! (`999_999` → `$1M`, not `$1000K`).

use rust_decimal::prelude::*;

const TIERS: [(i64, &str); 4] = [
    (1_000_000_000_000, "T"),
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

const MAX_FRACTION_DIGITS: u32 = 2;

/// Format a USD amount in compact notation.
pub fn compact_usd(amount: f64) -> String {
    match Decimal::from_f64(amount) {
        Some(value) => compact_usd_decimal(&value),
        None => format!("${}", amount),
    }
}

/// Format a `Decimal` USD amount in compact notation.
pub fn compact_usd_decimal(amount: &Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();
    let thousand = Decimal::from(1_000);

    // Walk tiers from smallest to largest so a rounded overflow can bump up.
    let mut scaled = round(abs_amount);
    let mut suffix = "";
    for (divisor, tier_suffix) in TIERS.iter().rev() {
        let divisor = Decimal::from(*divisor);
        if abs_amount >= divisor || scaled >= thousand {
            scaled = round(abs_amount / divisor);
            suffix = *tier_suffix;
        }
    }

    format!("{}${}{}", sign, scaled.normalize(), suffix)
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billions() {
        assert_eq!(compact_usd(105_600_000_000.0), "$105.6B");
        assert_eq!(compact_usd(1_234_567_890.0), "$1.23B");
    }

    #[test]
    fn test_small_tiers() {
        assert_eq!(compact_usd(0.0), "$0");
        assert_eq!(compact_usd(12.346), "$12.35");
        assert_eq!(compact_usd(1_500.0), "$1.5K");
        assert_eq!(compact_usd(2_000_000.0), "$2M");
        assert_eq!(compact_usd(3_210_000_000_000.0), "$3.21T");
    }

    #[test]
    fn test_rounding_promotes_tier() {
        assert_eq!(compact_usd(999.999), "$1K");
        assert_eq!(compact_usd(999_999.0), "$1M");
    }

    #[test]
    fn test_negative() {
        assert_eq!(compact_usd(-1_500_000.0), "-$1.5M");
    }

    #[test]
    fn test_non_finite_falls_back() {
        assert_eq!(compact_usd(f64::NAN), "$NaN");
    }
}
