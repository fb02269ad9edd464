//! Display helpers for currency amounts and percentage rates.
//!
//! Pure presentation: nothing here changes a tax figure, only how it is
//! rendered. Missing values render as zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Render a currency amount with thousands separators and no decimal places.
/// Half-up to whole currency units; `None` renders as "0".
pub fn format_currency(amount: Option<Money>) -> String {
    let amount = amount.unwrap_or_default();
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    group_thousands(whole)
}

/// Render a percentage value to 2 decimal places with a trailing "%".
/// `None` renders as "0.00%".
pub fn format_percent(value: Option<Decimal>) -> String {
    let value = value.unwrap_or_default();
    format!(
        "{}%",
        format_fixed(value, 2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Render a value to exactly `scale` decimal places after rounding with the
/// given strategy.
pub fn format_fixed(value: Decimal, scale: u32, strategy: RoundingStrategy) -> String {
    let rounded = value.round_dp_with_strategy(scale, strategy);
    format!("{:.*}", scale as usize, rounded)
}

fn group_thousands(value: Decimal) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value.is_sign_negative() && !value.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(Some(dec!(1_234_567))), "1,234,567");
        assert_eq!(format_currency(Some(dec!(1_000))), "1,000");
        assert_eq!(format_currency(Some(dec!(999))), "999");
        assert_eq!(format_currency(Some(dec!(0))), "0");
    }

    #[test]
    fn test_currency_missing_is_zero() {
        assert_eq!(format_currency(None), "0");
    }

    #[test]
    fn test_currency_rounds_half_up_to_whole_units() {
        assert_eq!(format_currency(Some(dec!(1500.5))), "1,501");
        assert_eq!(format_currency(Some(dec!(1500.4))), "1,500");
    }

    #[test]
    fn test_negative_currency() {
        assert_eq!(format_currency(Some(dec!(-1_234_567))), "-1,234,567");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(Some(dec!(12.345))), "12.35%");
        assert_eq!(format_percent(Some(dec!(5))), "5.00%");
        assert_eq!(format_percent(None), "0.00%");
    }

    #[test]
    fn test_fixed_scale_rendering() {
        let s = format_fixed(dec!(0.005), 2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(s, "0.01");
        let s = format_fixed(dec!(24), 2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(s, "24.00");
    }

    #[test]
    fn test_currency_round_trip_modulo_grouping() {
        // A formatted whole-number amount parses back to the same value once
        // the grouping separators are stripped.
        let original = dec!(98_765_432);
        let formatted = format_currency(Some(original));
        let parsed: Decimal = formatted.replace(',', "").parse().unwrap();
        assert_eq!(parsed, original);
    }
}
