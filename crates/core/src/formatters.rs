//! Display formatting for prices, market caps and volumes.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const BILLION: Decimal = dec!(1000000000);
const MILLION: Decimal = dec!(1000000);
const THOUSAND: Decimal = dec!(1000);

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Two fixed decimals, no grouping.
fn fixed2(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// Inserts `,` every three digits of the integer part.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// US-dollar amount with grouping and two decimals, e.g. `$1,234.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round2(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Market-cap style amount: `$1.23 B`, `$4.56 M`, otherwise plain currency.
pub fn format_large_number(value: Decimal) -> String {
    if value >= BILLION {
        format!("${} B", fixed2(value / BILLION))
    } else if value >= MILLION {
        format!("${} M", fixed2(value / MILLION))
    } else {
        format_currency(value)
    }
}

/// Volume style amount without a currency sign: `1.23 B`, `4.56 M`, `7.89 K`.
pub fn format_volume_number(value: Decimal) -> String {
    if value >= BILLION {
        format!("{} B", fixed2(value / BILLION))
    } else if value >= MILLION {
        format!("{} M", fixed2(value / MILLION))
    } else if value >= THOUSAND {
        format!("{} K", fixed2(value / THOUSAND))
    } else {
        value.normalize().to_string()
    }
}

/// Signed percentage with two decimals, e.g. `+2.50%`.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = round2(value);
    let sign = if rounded > Decimal::ZERO { "+" } else { "" };
    format!("{}{:.2}%", sign, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_currency(dec!(67432.129)), "$67,432.13");
        assert_eq!(format_currency(dec!(1000000)), "$1,000,000.00");
        assert_eq!(format_currency(dec!(0.005)), "$0.01");
        assert_eq!(format_currency(dec!(-42.1)), "-$42.10");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(dec!(1320000000000)), "$1320.00 B");
        assert_eq!(format_large_number(dec!(1000000000)), "$1.00 B");
        assert_eq!(format_large_number(dec!(999999999)), "$1000.00 M");
        assert_eq!(format_large_number(dec!(4560000)), "$4.56 M");
        assert_eq!(format_large_number(dec!(999999)), "$999,999.00");
    }

    #[test]
    fn test_format_volume_number() {
        assert_eq!(format_volume_number(dec!(25400000000)), "25.40 B");
        assert_eq!(format_volume_number(dec!(1500000)), "1.50 M");
        assert_eq!(format_volume_number(dec!(7890)), "7.89 K");
        assert_eq!(format_volume_number(dec!(999)), "999");
        assert_eq!(format_volume_number(dec!(12.50)), "12.5");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(2.5)), "+2.50%");
        assert_eq!(format_percentage(dec!(-1.234)), "-1.23%");
        assert_eq!(format_percentage(dec!(0)), "0.00%");
    }
}
