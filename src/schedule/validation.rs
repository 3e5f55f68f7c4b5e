use rust_decimal::Decimal;
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::{PrincipalRepayment, SameDayPolicy, ScheduleRequest};

/// a request that passed validation, with its event lists sorted
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPlan {
    pub loan_amount: Money,
    pub monthly_rate: Rate,
    /// ascending by day, one entry per day
    pub repayments: Vec<PrincipalRepayment>,
    /// ascending, no duplicates
    pub interest_days: Vec<u32>,
}

impl ValidatedPlan {
    /// last day carrying any event, 0 when there are none
    pub fn final_day(&self) -> u32 {
        let last_repayment = self.repayments.last().map(|r| r.day).unwrap_or(0);
        let last_interest = self.interest_days.last().copied().unwrap_or(0);
        last_repayment.max(last_interest)
    }
}

/// check a request and bring it into the shape the day loop expects
pub fn validate_request(request: &ScheduleRequest, config: &CalculatorConfig) -> Result<ValidatedPlan> {
    if !request.loan_amount.is_positive() {
        return Err(ScheduleError::invalid_amount(request.loan_amount));
    }

    let rate = request.monthly_rate_percent;
    if rate <= Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(ScheduleError::InvalidRate { rate });
    }

    for repayment in &request.principal_repayments {
        if repayment.day < 1 {
            return Err(ScheduleError::invalid_schedule(
                "principal repayment day must be at least 1",
            ));
        }
        if !repayment.amount.is_positive() {
            return Err(ScheduleError::invalid_schedule(format!(
                "principal repayment on day {} must be positive, got {}",
                repayment.day, repayment.amount
            )));
        }
    }

    if request.interest_payment_days.iter().any(|&day| day < 1) {
        return Err(ScheduleError::invalid_schedule(
            "interest payment day must be at least 1",
        ));
    }

    let horizon = request
        .principal_repayments
        .iter()
        .map(|r| r.day)
        .chain(request.interest_payment_days.iter().copied())
        .max()
        .unwrap_or(0);
    if horizon > config.max_horizon_days {
        return Err(ScheduleError::invalid_schedule(format!(
            "last scheduled day {} is beyond the {}-day horizon",
            horizon, config.max_horizon_days
        )));
    }

    let repayments = merge_same_day(request.loan_amount, &request.principal_repayments, config.same_day_policy)?;

    let repaid = Money::checked_sum(repayments.iter().map(|r| r.amount))
        .ok_or_else(|| over_repayment_overflow(request.loan_amount))?;
    if repaid > request.loan_amount {
        return Err(ScheduleError::OverRepayment {
            loan_amount: request.loan_amount,
            repaid,
        });
    }

    let mut interest_days = request.interest_payment_days.clone();
    interest_days.sort_unstable();
    interest_days.dedup();

    debug!(
        repayments = repayments.len(),
        interest_days = interest_days.len(),
        "schedule request validated"
    );

    Ok(ValidatedPlan {
        loan_amount: request.loan_amount,
        monthly_rate: Rate::from_percent(rate),
        repayments,
        interest_days,
    })
}

/// sort repayments by day and resolve entries that share a day
fn merge_same_day(
    loan_amount: Money,
    repayments: &[PrincipalRepayment],
    policy: SameDayPolicy,
) -> Result<Vec<PrincipalRepayment>> {
    let mut sorted = repayments.to_vec();
    sorted.sort_by_key(|r| r.day);

    let mut merged: Vec<PrincipalRepayment> = Vec::with_capacity(sorted.len());
    for repayment in sorted {
        match merged.last_mut() {
            Some(last) if last.day == repayment.day => match policy {
                SameDayPolicy::Reject => {
                    return Err(ScheduleError::DuplicateRepaymentDay { day: repayment.day });
                }
                SameDayPolicy::Aggregate => {
                    last.amount = last
                        .amount
                        .checked_add(repayment.amount)
                        .ok_or_else(|| over_repayment_overflow(loan_amount))?;
                }
            },
            _ => merged.push(repayment),
        }
    }

    Ok(merged)
}

/// repayments too large to add up are necessarily more than the loan
fn over_repayment_overflow(loan_amount: Money) -> ScheduleError {
    ScheduleError::OverRepayment {
        loan_amount,
        repaid: Money::from_decimal(Decimal::MAX),
    }
}

/// caller-side check that the repayments cover the loan
///
/// The calculator itself accepts partial plans; this is the check the
/// marketplace form runs before submitting.
pub fn check_repayment_total(
    loan_amount: Money,
    repayments: &[PrincipalRepayment],
    tolerance: Money,
) -> Result<()> {
    let mismatch = |repaid| ScheduleError::RepaymentTotalMismatch {
        loan_amount,
        repaid,
        tolerance,
    };

    let repaid = Money::checked_sum(repayments.iter().map(|r| r.amount))
        .ok_or_else(|| mismatch(Money::from_decimal(Decimal::MAX)))?;
    let gap = repaid
        .checked_sub(loan_amount)
        .ok_or_else(|| mismatch(repaid))?;
    if gap.abs() > tolerance {
        return Err(mismatch(repaid));
    }
    Ok(())
}
