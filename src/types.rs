use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;

/// scheduled principal repayment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRepayment {
    /// day index counted from disbursement, starting at 1
    pub day: u32,
    pub amount: Money,
}

impl PrincipalRepayment {
    pub fn new(day: u32, amount: Money) -> Self {
        Self { day, amount }
    }
}

/// fully specified input for one schedule calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub loan_amount: Money,
    /// monthly rate as a percentage, 4.5 means 4.5% per month
    pub monthly_rate_percent: Decimal,
    pub principal_repayments: Vec<PrincipalRepayment>,
    pub interest_payment_days: Vec<u32>,
}

impl ScheduleRequest {
    pub fn new(loan_amount: Money, monthly_rate_percent: Decimal) -> Self {
        Self {
            loan_amount,
            monthly_rate_percent,
            principal_repayments: Vec::new(),
            interest_payment_days: Vec::new(),
        }
    }

    pub fn repay(mut self, day: u32, amount: Money) -> Self {
        self.principal_repayments.push(PrincipalRepayment::new(day, amount));
        self
    }

    pub fn pay_interest_on(mut self, day: u32) -> Self {
        self.interest_payment_days.push(day);
        self
    }
}

/// what happened on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayEvent {
    NoPayment,
    Principal,
    Interest,
    PrincipalAndInterest,
}

impl DayEvent {
    pub(crate) fn from_flags(principal: bool, interest: bool) -> Self {
        match (principal, interest) {
            (false, false) => DayEvent::NoPayment,
            (true, false) => DayEvent::Principal,
            (false, true) => DayEvent::Interest,
            (true, true) => DayEvent::PrincipalAndInterest,
        }
    }
}

impl fmt::Display for DayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DayEvent::NoPayment => "no payment this day",
            DayEvent::Principal => "principal payment",
            DayEvent::Interest => "interest payment",
            DayEvent::PrincipalAndInterest => "principal payment + interest payment",
        };
        f.write_str(text)
    }
}

/// one row of the day-by-day ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: u32,
    pub remaining_principal_before: Money,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub total_payment: Money,
    pub remaining_principal_after: Money,
    pub description: DayEvent,
}

/// totals over the whole schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScheduleSummary {
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
    pub total_payments: Money,
    pub final_day: u32,
}

/// how repayments that share a day are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameDayPolicy {
    /// refuse the request
    #[default]
    Reject,
    /// sum the amounts into a single repayment
    Aggregate,
}
