//! digit handling for amounts typed into or shown in Persian interfaces

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};

const PERSIAN_ZERO: u32 = '۰' as u32;
const ARABIC_INDIC_ZERO: u32 = '٠' as u32;
const ARABIC_DECIMAL_SEPARATOR: char = '٫';
const ARABIC_THOUSANDS_SEPARATOR: char = '٬';

/// replace Persian and Arabic-Indic digits with ASCII ones
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            let code = c as u32;
            if (PERSIAN_ZERO..PERSIAN_ZERO + 10).contains(&code) {
                char::from(b'0' + (code - PERSIAN_ZERO) as u8)
            } else if (ARABIC_INDIC_ZERO..ARABIC_INDIC_ZERO + 10).contains(&code) {
                char::from(b'0' + (code - ARABIC_INDIC_ZERO) as u8)
            } else if c == ARABIC_DECIMAL_SEPARATOR {
                '.'
            } else {
                c
            }
        })
        .collect()
}

/// replace ASCII digits with Persian ones
pub fn to_persian_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => char::from_u32(PERSIAN_ZERO + d).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// parse a user-typed amount such as "۱٬۲۵۰٬۰۰۰" or "1,250,000.5"
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned: String = normalize_digits(input.trim())
        .chars()
        .filter(|c| !matches!(*c, ',' | ARABIC_THOUSANDS_SEPARATOR | ' ' | '\u{200c}'))
        .collect();

    if cleaned.is_empty() {
        return Err(ScheduleError::invalid_amount(input));
    }

    Decimal::from_str(&cleaned).map_err(|_| ScheduleError::invalid_amount(input))
}

/// round to `dp` places and group the integer part in threes
pub fn format_amount(amount: Money, dp: u32) -> String {
    let rounded = amount.as_decimal().round_dp(dp);
    let text = format!("{:.*}", dp as usize, rounded.abs());

    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_digits() {
        assert_eq!(normalize_digits("۱۲۳۴۵۶۷۸۹۰"), "1234567890");
        assert_eq!(normalize_digits("٤٥٦"), "456");
        assert_eq!(normalize_digits("۳٫۵"), "3.5");
        assert_eq!(normalize_digits("day 12"), "day 12");
    }

    #[test]
    fn test_to_persian_digits() {
        assert_eq!(to_persian_digits("30"), "۳۰");
        assert_eq!(to_persian_digits("1,030,000"), "۱,۰۳۰,۰۰۰");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("۱٬۲۵۰٬۰۰۰").unwrap(), dec!(1250000));
        assert_eq!(parse_amount(" 1,250,000.5 ").unwrap(), dec!(1250000.5));
        assert_eq!(parse_amount("۴٫۵").unwrap(), dec!(4.5));
        assert_eq!(parse_amount("2 500 000").unwrap(), dec!(2500000));
        assert_eq!(parse_amount("۲\u{200c}۵۰۰").unwrap(), dec!(2500));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("").unwrap_err().code(), "InvalidAmount");
        assert_eq!(parse_amount("   ").unwrap_err().code(), "InvalidAmount");
        assert_eq!(parse_amount("ده هزار").unwrap_err().code(), "InvalidAmount");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Money::from_major(1_030_000), 0), "1,030,000");
        assert_eq!(format_amount(Money::from_decimal(dec!(999.456)), 2), "999.46");
        assert_eq!(format_amount(Money::from_decimal(dec!(-1234.5)), 1), "-1,234.5");
        assert_eq!(format_amount(Money::ZERO, 0), "0");
        assert_eq!(format_amount(Money::from_major(100), 0), "100");
    }
}
