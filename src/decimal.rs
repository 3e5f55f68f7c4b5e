use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// number of decimal places every `Money` value is held at
pub const MONEY_DP: u32 = 8;

/// Money type with 8 decimal places precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_DP))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_DP)))
    }

    /// create from whole currency units (rials, tomans)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// addition that reports overflow instead of panicking
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money::from_decimal)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money::from_decimal)
    }

    /// sum of `amounts`, `None` if it does not fit
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// interest on this balance for a single day at `daily_rate`, unrounded
    ///
    /// `daily_rate` is at most one, so the product never outgrows the balance.
    pub fn daily_interest(&self, daily_rate: Rate) -> Decimal {
        self.0 * daily_rate.as_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

/// rate type for interest rates, held as a fraction (0.03 for 3%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from a percentage (e.g., 4.5 for 4.5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// daily rate from a monthly rate, on a fixed-length month
    pub fn daily_from_monthly(&self, days_per_month: u32) -> Rate {
        Rate(self.0 / Decimal::from(days_per_month))
    }

    /// monthly rate from an annual rate
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_display_drops_trailing_zeros() {
        let m = Money::from_decimal(dec!(30000.000));
        assert_eq!(m.to_string(), "30000");
    }

    #[test]
    fn test_daily_rate_from_monthly_percent() {
        let monthly = Rate::from_percent(dec!(3));
        let daily = monthly.daily_from_monthly(30);
        assert_eq!(daily.as_decimal(), dec!(0.001));
        assert_eq!(monthly.to_string(), "3%");
    }

    #[test]
    fn test_daily_interest_is_unrounded() {
        let balance = Money::from_major(1);
        let daily = Rate::from_percent(dec!(1)).daily_from_monthly(30);
        let interest = balance.daily_interest(daily);
        // 1 / 3000 carries more than 8 places
        assert!(interest.scale() > MONEY_DP);
    }

    #[test]
    fn test_checked_sum() {
        let parts = [Money::from_major(250), Money::from_major(750)];
        assert_eq!(Money::checked_sum(parts), Some(Money::from_major(1_000)));
    }

    #[test]
    fn test_checked_sum_overflow() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(Money::checked_sum([huge, Money::ONE]), None);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(Money::from_major(5).checked_sub(Money::from_major(2)), Some(Money::from_major(3)));
    }
}
