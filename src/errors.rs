use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("invalid loan amount: {amount}")]
    InvalidAmount {
        amount: String,
    },

    #[error("invalid monthly interest rate: {rate}% (must be in (0, 100])")]
    InvalidRate {
        rate: Decimal,
    },

    #[error("invalid schedule: {message}")]
    InvalidSchedule {
        message: String,
    },

    #[error("more than one principal repayment on day {day}")]
    DuplicateRepaymentDay {
        day: u32,
    },

    #[error("principal repayments {repaid} exceed loan amount {loan_amount}")]
    OverRepayment {
        loan_amount: Money,
        repaid: Money,
    },

    #[error("principal repayments {repaid} do not match loan amount {loan_amount} (tolerance {tolerance})")]
    RepaymentTotalMismatch {
        loan_amount: Money,
        repaid: Money,
        tolerance: Money,
    },

    #[error("amount too large: {operation} overflowed")]
    ArithmeticOverflow {
        operation: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl ScheduleError {
    /// stable machine-readable code, used as the `error` field on the wire
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleError::InvalidAmount { .. } => "InvalidAmount",
            ScheduleError::InvalidRate { .. } => "InvalidRate",
            ScheduleError::InvalidSchedule { .. } => "InvalidSchedule",
            ScheduleError::DuplicateRepaymentDay { .. } => "DuplicateRepaymentDay",
            ScheduleError::OverRepayment { .. } => "OverRepayment",
            ScheduleError::RepaymentTotalMismatch { .. } => "RepaymentTotalMismatch",
            ScheduleError::ArithmeticOverflow { .. } => "ArithmeticOverflow",
            ScheduleError::InvalidConfiguration { .. } => "InvalidConfiguration",
        }
    }

    pub(crate) fn invalid_amount(amount: impl ToString) -> Self {
        ScheduleError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    pub(crate) fn overflow(operation: &str) -> Self {
        ScheduleError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    pub(crate) fn invalid_schedule(message: impl Into<String>) -> Self {
        ScheduleError::InvalidSchedule {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
