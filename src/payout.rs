use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};

/// expected investor return on a funded project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutEstimate {
    pub invested: Money,
    pub annual_rate: Rate,
    pub duration_months: u32,
    pub total_profit: Money,
    pub monthly_profit: Money,
    pub total_return: Money,
}

/// simple-interest payout: profit = amount × rate × months / 12
pub fn estimate_payout(amount: Money, annual_rate_percent: Decimal, duration_months: u32) -> Result<PayoutEstimate> {
    if !amount.is_positive() {
        return Err(ScheduleError::invalid_amount(amount));
    }
    if annual_rate_percent <= Decimal::ZERO || annual_rate_percent > Decimal::ONE_HUNDRED {
        return Err(ScheduleError::InvalidRate { rate: annual_rate_percent });
    }
    if duration_months == 0 {
        return Err(ScheduleError::invalid_schedule("investment duration must be at least one month"));
    }

    let annual_rate = Rate::from_percent(annual_rate_percent);
    let months = Decimal::from(duration_months);
    let total_profit = annual_rate
        .monthly_rate()
        .as_decimal()
        .checked_mul(months)
        .and_then(|factor| amount.as_decimal().checked_mul(factor))
        .map(Money::from_decimal)
        .ok_or_else(|| ScheduleError::overflow("total profit"))?;
    let monthly_profit = total_profit
        .as_decimal()
        .checked_div(months)
        .map(Money::from_decimal)
        .ok_or_else(|| ScheduleError::overflow("monthly profit"))?;
    let total_return = amount
        .checked_add(total_profit)
        .ok_or_else(|| ScheduleError::overflow("total return"))?;

    Ok(PayoutEstimate {
        invested: amount,
        annual_rate,
        duration_months,
        total_profit,
        monthly_profit,
        total_return,
    })
}
