use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};

/// running interest accrual on a fixed-length month
///
/// Interest is computed every day on the balance handed to [`accrue`] and
/// held unrounded until [`settle`] pays it out.
///
/// [`accrue`]: AccrualEngine::accrue
/// [`settle`]: AccrualEngine::settle
#[derive(Debug, Clone)]
pub struct AccrualEngine {
    daily_rate: Rate,
    accrued: Decimal,
}

impl AccrualEngine {
    pub fn new(monthly_rate: Rate, days_per_month: u32) -> Self {
        Self {
            daily_rate: monthly_rate.daily_from_monthly(days_per_month),
            accrued: Decimal::ZERO,
        }
    }

    pub fn daily_rate(&self) -> Rate {
        self.daily_rate
    }

    /// add one day of interest on `balance`, returns that day's interest
    pub fn accrue(&mut self, balance: Money) -> Result<Decimal> {
        let interest = balance.daily_interest(self.daily_rate);
        self.accrued = self
            .accrued
            .checked_add(interest)
            .ok_or_else(|| ScheduleError::overflow("accrued interest"))?;
        Ok(interest)
    }

    /// interest accrued and not yet paid
    pub fn accrued(&self) -> Money {
        Money::from_decimal(self.accrued)
    }

    /// pay out everything accrued so far and start a new period
    pub fn settle(&mut self) -> Money {
        let paid = Money::from_decimal(self.accrued);
        self.accrued = Decimal::ZERO;
        paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thirty_day_month() {
        let engine = AccrualEngine::new(Rate::from_percent(dec!(4.5)), 30);
        assert_eq!(engine.daily_rate().as_decimal(), dec!(0.0015));
    }

    #[test]
    fn test_accrual_carries_until_settled() {
        let mut engine = AccrualEngine::new(Rate::from_percent(dec!(3)), 30);
        let balance = Money::from_major(1_000_000);

        for _ in 0..15 {
            assert_eq!(engine.accrue(balance).unwrap(), dec!(1000));
        }
        assert_eq!(engine.accrued(), Money::from_major(15_000));

        assert_eq!(engine.settle(), Money::from_major(15_000));
        assert_eq!(engine.accrued(), Money::ZERO);
        assert_eq!(engine.settle(), Money::ZERO);
    }

    #[test]
    fn test_accrual_follows_balance() {
        let mut engine = AccrualEngine::new(Rate::from_percent(dec!(3)), 30);

        engine.accrue(Money::from_major(1_000_000)).unwrap();
        engine.accrue(Money::from_major(500_000)).unwrap();

        assert_eq!(engine.settle(), Money::from_major(1_500));
    }

    #[test]
    fn test_accrual_overflow_is_an_error() {
        let mut engine = AccrualEngine::new(Rate::from_percent(dec!(100)), 30);
        let balance = Money::from_decimal(Decimal::from_i128_with_scale(70_000_000_000_000_000_000_000_000_000, 0));

        let mut result = Ok(Decimal::ZERO);
        for _ in 0..40 {
            result = engine.accrue(balance);
            if result.is_err() {
                break;
            }
        }
        assert_eq!(result.unwrap_err().code(), "ArithmeticOverflow");
    }
}
