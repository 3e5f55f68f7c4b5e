pub mod accrual;
pub mod validation;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::{DayEvent, DayRecord, ScheduleRequest, ScheduleSummary};

pub use accrual::AccrualEngine;
pub use validation::{check_repayment_total, validate_request, ValidatedPlan};

/// day-by-day repayment ledger with totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub loan_amount: Money,
    pub monthly_rate: Rate,
    pub daily_rate: Rate,
    pub days: Vec<DayRecord>,
    pub summary: ScheduleSummary,
}

impl RepaymentSchedule {
    /// record for a given day index, if inside the horizon
    pub fn get_day(&self, day: u32) -> Option<&DayRecord> {
        if day == 0 {
            return None;
        }
        self.days.get((day - 1) as usize)
    }

    /// days on which something is paid
    pub fn payment_days(&self) -> impl Iterator<Item = &DayRecord> {
        self.days
            .iter()
            .filter(|record| record.description != DayEvent::NoPayment)
    }

    /// principal still outstanding after the final day
    pub fn remaining_principal(&self) -> Money {
        self.days
            .last()
            .map(|record| record.remaining_principal_after)
            .unwrap_or(self.loan_amount)
    }

    /// map day indices onto the calendar, day 0 being `disbursed_on`
    pub fn dated(&self, disbursed_on: NaiveDate) -> impl Iterator<Item = (NaiveDate, &DayRecord)> {
        self.days.iter().filter_map(move |record| {
            disbursed_on
                .checked_add_days(Days::new(record.day as u64))
                .map(|date| (date, record))
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// compute the repayment schedule with the marketplace settings
pub fn compute_schedule(request: &ScheduleRequest) -> Result<RepaymentSchedule> {
    compute_schedule_with(request, &CalculatorConfig::default())
}

/// compute the repayment schedule
///
/// Walks days `1..=final_day`. Each day first accrues interest on the
/// balance carried in from the previous day, then applies that day's
/// principal repayment, then settles accrued interest if the day is an
/// interest payment day. A repayment therefore lowers interest from the
/// following day on.
pub fn compute_schedule_with(request: &ScheduleRequest, config: &CalculatorConfig) -> Result<RepaymentSchedule> {
    config.validate()?;
    let plan = validate_request(request, config)?;
    let final_day = plan.final_day();

    let mut accrual = AccrualEngine::new(plan.monthly_rate, config.days_per_month);
    let mut remaining = plan.loan_amount;
    let mut repayments = plan.repayments.iter().peekable();
    let mut interest_days = plan.interest_days.iter().peekable();

    let mut days = Vec::with_capacity(final_day as usize);
    let mut summary = ScheduleSummary {
        final_day,
        ..ScheduleSummary::default()
    };

    debug!(
        loan_amount = %plan.loan_amount,
        monthly_rate = %plan.monthly_rate,
        final_day,
        "computing repayment schedule"
    );

    for day in 1..=final_day {
        let before = remaining;
        accrual.accrue(before)?;

        let principal_payment = match repayments.next_if(|r| r.day == day) {
            Some(repayment) => {
                // validation keeps the repayments within the loan amount
                remaining = remaining
                    .checked_sub(repayment.amount)
                    .ok_or_else(|| ScheduleError::overflow("remaining principal"))?;
                Some(repayment.amount)
            }
            None => None,
        };

        let interest_payment = interest_days
            .next_if(|&&d| d == day)
            .map(|_| accrual.settle());

        let description = DayEvent::from_flags(principal_payment.is_some(), interest_payment.is_some());
        let principal_payment = principal_payment.unwrap_or(Money::ZERO);
        let interest_payment = interest_payment.unwrap_or(Money::ZERO);
        let total_payment = principal_payment
            .checked_add(interest_payment)
            .ok_or_else(|| ScheduleError::overflow("daily payment"))?;

        summary.total_principal_paid = summary
            .total_principal_paid
            .checked_add(principal_payment)
            .ok_or_else(|| ScheduleError::overflow("total principal paid"))?;
        summary.total_interest_paid = summary
            .total_interest_paid
            .checked_add(interest_payment)
            .ok_or_else(|| ScheduleError::overflow("total interest paid"))?;
        summary.total_payments = summary
            .total_payments
            .checked_add(total_payment)
            .ok_or_else(|| ScheduleError::overflow("total payments"))?;

        days.push(DayRecord {
            day,
            remaining_principal_before: before,
            principal_payment,
            interest_payment,
            total_payment,
            remaining_principal_after: remaining,
            description,
        });
    }

    debug!(
        total_principal_paid = %summary.total_principal_paid,
        total_interest_paid = %summary.total_interest_paid,
        unpaid_interest = %accrual.accrued(),
        "repayment schedule computed"
    );

    Ok(RepaymentSchedule {
        loan_amount: plan.loan_amount,
        monthly_rate: plan.monthly_rate,
        daily_rate: accrual.daily_rate(),
        days,
        summary,
    })
}
