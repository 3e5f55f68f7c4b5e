//! json contract of the loan calculator webhook
//!
//! Requests arrive with PascalCase keys (camelCase is accepted too) and
//! are converted once into a [`ScheduleRequest`]. Responses keep the
//! Persian field labels the marketplace frontend reads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::locale::to_persian_digits;
use crate::schedule::{check_repayment_total, compute_schedule_with, RepaymentSchedule};
use crate::types::{DayEvent, DayRecord, PrincipalRepayment, ScheduleRequest};

/// error code for bodies that are not a valid request at all
pub const INVALID_REQUEST: &str = "InvalidRequest";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRequest {
    #[serde(rename = "LoanAmount", alias = "loanAmount")]
    pub loan_amount: Decimal,
    #[serde(rename = "MonthlyInterestRate", alias = "monthlyInterestRate")]
    pub monthly_interest_rate: Decimal,
    #[serde(rename = "PrincipalRepayments", alias = "principalRepayments", default)]
    pub principal_repayments: Vec<WireRepayment>,
    #[serde(rename = "InterestPaymentDates", alias = "interestPaymentDates", default)]
    pub interest_payment_dates: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRepayment {
    #[serde(alias = "day")]
    pub days: i64,
    pub amount: Decimal,
}

impl WireRequest {
    /// convert into the typed request, checking day indices fit
    pub fn into_request(self) -> Result<ScheduleRequest> {
        let principal_repayments = self
            .principal_repayments
            .into_iter()
            .map(|r| -> Result<PrincipalRepayment> {
                Ok(PrincipalRepayment::new(day_index(r.days)?, Money::from_decimal(r.amount)))
            })
            .collect::<Result<Vec<_>>>()?;

        let interest_payment_days = self
            .interest_payment_dates
            .into_iter()
            .map(day_index)
            .collect::<Result<Vec<_>>>()?;

        Ok(ScheduleRequest {
            loan_amount: Money::from_decimal(self.loan_amount),
            monthly_rate_percent: self.monthly_interest_rate,
            principal_repayments,
            interest_payment_days,
        })
    }
}

fn day_index(day: i64) -> Result<u32> {
    match u32::try_from(day) {
        Ok(day) if day >= 1 => Ok(day),
        _ => Err(ScheduleError::invalid_schedule(format!(
            "day index must be between 1 and {}, got {}",
            u32::MAX,
            day
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDayRecord {
    #[serde(rename = "روز")]
    pub day: u32,
    #[serde(rename = "اصل پول باقی\u{200c}مانده (قبل از پرداخت)", with = "rust_decimal::serde::float")]
    pub remaining_principal_before: Decimal,
    #[serde(rename = "مبلغ پرداخت اصل پول", with = "rust_decimal::serde::float")]
    pub principal_payment: Decimal,
    #[serde(rename = "سود انباشته پرداخت شده", with = "rust_decimal::serde::float")]
    pub interest_payment: Decimal,
    #[serde(rename = "مبلغ کل پرداختی در این روز", with = "rust_decimal::serde::float")]
    pub total_payment: Decimal,
    #[serde(rename = "توضیحات")]
    pub description: String,
}

impl From<&DayRecord> for WireDayRecord {
    fn from(record: &DayRecord) -> Self {
        Self {
            day: record.day,
            remaining_principal_before: record.remaining_principal_before.as_decimal(),
            principal_payment: record.principal_payment.as_decimal(),
            interest_payment: record.interest_payment.as_decimal(),
            total_payment: record.total_payment.as_decimal(),
            description: localize_event(record.description).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSummary {
    #[serde(rename = "مبلغ کل وام", with = "rust_decimal::serde::float")]
    pub loan_amount: Decimal,
    #[serde(rename = "نرخ سود ماهیانه")]
    pub monthly_rate: String,
    #[serde(rename = "نرخ سود روزانه")]
    pub daily_rate: String,
    #[serde(rename = "مجموع اصل پول پرداخت شده", with = "rust_decimal::serde::float")]
    pub total_principal_paid: Decimal,
    #[serde(rename = "مجموع سود پرداخت شده", with = "rust_decimal::serde::float")]
    pub total_interest_paid: Decimal,
    #[serde(rename = "مجموع کل پرداختی", with = "rust_decimal::serde::float")]
    pub total_payments: Decimal,
    #[serde(rename = "تعداد روزها")]
    pub final_day: u32,
    #[serde(rename = "_raw")]
    pub raw: RawSummary,
}

/// unlabelled totals for programmatic consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_principal_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_payments: Decimal,
    pub final_day: u32,
}

impl From<&RepaymentSchedule> for WireSummary {
    fn from(schedule: &RepaymentSchedule) -> Self {
        let summary = &schedule.summary;
        let daily_percent = schedule.daily_rate.as_percentage().round_dp(6).normalize();

        Self {
            loan_amount: schedule.loan_amount.as_decimal(),
            monthly_rate: schedule.monthly_rate.to_string(),
            daily_rate: format!("{}%", daily_percent),
            total_principal_paid: summary.total_principal_paid.as_decimal(),
            total_interest_paid: summary.total_interest_paid.as_decimal(),
            total_payments: summary.total_payments.as_decimal(),
            final_day: summary.final_day,
            raw: RawSummary {
                total_principal_paid: summary.total_principal_paid.as_decimal(),
                total_interest_paid: summary.total_interest_paid.as_decimal(),
                total_payments: summary.total_payments.as_decimal(),
                final_day: summary.final_day,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub schedule: Vec<WireDayRecord>,
    pub summary: WireSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// response envelope, distinguished on the wire by `success`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleResponse {
    Success(SuccessResponse),
    Failure(FailureResponse),
}

impl ScheduleResponse {
    pub fn from_schedule(schedule: &RepaymentSchedule) -> Self {
        ScheduleResponse::Success(SuccessResponse {
            success: true,
            schedule: schedule.days.iter().map(WireDayRecord::from).collect(),
            summary: WireSummary::from(schedule),
        })
    }

    pub fn from_error(error: &ScheduleError) -> Self {
        ScheduleResponse::Failure(FailureResponse {
            success: false,
            error: error.code().to_string(),
            message: persian_message(error),
        })
    }

    fn invalid_request() -> Self {
        ScheduleResponse::Failure(FailureResponse {
            success: false,
            error: INVALID_REQUEST.to_string(),
            message: "درخواست نامعتبر است. ساختار داده\u{200c}های ارسالی را بررسی کنید.".to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScheduleResponse::Success(_))
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// run a typed request through the calculator and wrap the outcome
pub fn respond(request: &ScheduleRequest, config: &CalculatorConfig) -> ScheduleResponse {
    match calculate(request, config) {
        Ok(schedule) => {
            info!(
                final_day = schedule.summary.final_day,
                total_payments = %schedule.summary.total_payments,
                "repayment schedule served"
            );
            ScheduleResponse::from_schedule(&schedule)
        }
        Err(error) => {
            warn!(code = error.code(), %error, "repayment schedule rejected");
            ScheduleResponse::from_error(&error)
        }
    }
}

/// handle a raw json body; every failure becomes a failure envelope
pub fn handle_request(body: &str, config: &CalculatorConfig) -> ScheduleResponse {
    let wire: WireRequest = match serde_json::from_str(body) {
        Ok(wire) => wire,
        Err(error) => {
            warn!(%error, "malformed schedule request");
            return ScheduleResponse::invalid_request();
        }
    };

    match wire.into_request() {
        Ok(request) => respond(&request, config),
        Err(error) => {
            warn!(code = error.code(), %error, "repayment schedule rejected");
            ScheduleResponse::from_error(&error)
        }
    }
}

fn calculate(request: &ScheduleRequest, config: &CalculatorConfig) -> Result<RepaymentSchedule> {
    let schedule = compute_schedule_with(request, config)?;
    // reported after the calculator's own checks so input errors come first
    if config.enforce_repayment_total {
        check_repayment_total(
            request.loan_amount,
            &request.principal_repayments,
            config.repayment_tolerance,
        )?;
    }
    Ok(schedule)
}

/// Persian label for a ledger row
pub fn localize_event(event: DayEvent) -> &'static str {
    match event {
        DayEvent::NoPayment => "بدون پرداخت در این روز",
        DayEvent::Principal => "پرداخت اصل پول",
        DayEvent::Interest => "پرداخت سود",
        DayEvent::PrincipalAndInterest => "پرداخت اصل پول + پرداخت سود",
    }
}

/// user-facing Persian message for an error
pub fn persian_message(error: &ScheduleError) -> String {
    match error {
        ScheduleError::InvalidAmount { .. } => "مبلغ وام باید عددی بزرگ\u{200c}تر از صفر باشد.".to_string(),
        ScheduleError::InvalidRate { .. } => "نرخ سود ماهیانه باید بیشتر از ۰ و حداکثر ۱۰۰ درصد باشد.".to_string(),
        ScheduleError::InvalidSchedule { .. } => {
            "برنامه پرداخت نامعتبر است. روزها باید از ۱ شروع شوند و مبالغ بزرگ\u{200c}تر از صفر باشند.".to_string()
        }
        ScheduleError::DuplicateRepaymentDay { day } => format!(
            "برای روز {} بیش از یک پرداخت اصل پول ثبت شده است.",
            to_persian_digits(&day.to_string())
        ),
        ScheduleError::OverRepayment { .. } => {
            "مجموع پرداخت\u{200c}های اصل پول از مبلغ کل وام بیشتر است.".to_string()
        }
        ScheduleError::RepaymentTotalMismatch { .. } => {
            "مجموع پرداخت\u{200c}های اصل پول باید با مبلغ کل وام برابر باشد.".to_string()
        }
        ScheduleError::ArithmeticOverflow { .. } => {
            "مبالغ وارد شده برای محاسبه بیش از حد بزرگ هستند.".to_string()
        }
        ScheduleError::InvalidConfiguration { .. } => "تنظیمات محاسبه\u{200c}گر نامعتبر است.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    const BULLET: &str = r#"{
        "LoanAmount": 1000000,
        "MonthlyInterestRate": 3,
        "PrincipalRepayments": [{ "days": 30, "amount": 1000000 }],
        "InterestPaymentDates": [30]
    }"#;

    #[test]
    fn test_parses_pascal_and_camel_case() {
        let pascal: WireRequest = serde_json::from_str(BULLET).unwrap();
        let camel: WireRequest = serde_json::from_str(
            r#"{ "loanAmount": 1000000, "monthlyInterestRate": 3,
                 "principalRepayments": [{ "day": 30, "amount": 1000000 }],
                 "interestPaymentDates": [30] }"#,
        )
        .unwrap();
        assert_eq!(pascal, camel);

        let request = pascal.into_request().unwrap();
        assert_eq!(request.loan_amount, Money::from_major(1_000_000));
        assert_eq!(request.monthly_rate_percent, dec!(3));
        assert_eq!(request.principal_repayments, vec![PrincipalRepayment::new(30, Money::from_major(1_000_000))]);
    }

    #[test]
    fn test_success_payload_labels() {
        let response = handle_request(BULLET, &CalculatorConfig::default());
        assert!(response.is_success());

        let json: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["success"], Value::Bool(true));

        let day30 = &json["schedule"][29];
        assert_eq!(day30["روز"], 30);
        assert_eq!(day30["سود انباشته پرداخت شده"].as_f64(), Some(30000.0));
        assert_eq!(day30["مبلغ کل پرداختی در این روز"].as_f64(), Some(1030000.0));
        assert_eq!(day30["اصل پول باقی\u{200c}مانده (قبل از پرداخت)"].as_f64(), Some(1000000.0));
        assert_eq!(day30["توضیحات"], "پرداخت اصل پول + پرداخت سود");
        assert_eq!(json["schedule"][0]["توضیحات"], "بدون پرداخت در این روز");

        let summary = &json["summary"];
        assert_eq!(summary["مبلغ کل وام"].as_f64(), Some(1000000.0));
        assert_eq!(summary["نرخ سود ماهیانه"], "3%");
        assert_eq!(summary["نرخ سود روزانه"], "0.1%");
        assert_eq!(summary["_raw"]["totalInterestPaid"].as_f64(), Some(30000.0));
        assert_eq!(summary["_raw"]["finalDay"], 30);
    }

    #[test]
    fn test_failure_payload() {
        let body = r#"{ "LoanAmount": 1000000, "MonthlyInterestRate": 120,
                        "PrincipalRepayments": [], "InterestPaymentDates": [] }"#;
        let response = handle_request(body, &CalculatorConfig::default());

        match response {
            ScheduleResponse::Failure(failure) => {
                assert!(!failure.success);
                assert_eq!(failure.error, "InvalidRate");
                assert!(failure.message.contains("نرخ سود"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_day_is_a_schedule_error() {
        let body = r#"{ "LoanAmount": 1000, "MonthlyInterestRate": 3,
                        "PrincipalRepayments": [{ "days": -2, "amount": 1000 }] }"#;
        let response = handle_request(body, &CalculatorConfig::default());
        let json: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["error"], "InvalidSchedule");
    }

    #[test]
    fn test_malformed_body() {
        let response = handle_request("{ not json", &CalculatorConfig::default());
        let json: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["success"], Value::Bool(false));
        assert_eq!(json["error"], INVALID_REQUEST);

        let missing_rate = handle_request(r#"{ "LoanAmount": 10 }"#, &CalculatorConfig::default());
        assert!(!missing_rate.is_success());
    }

    #[test]
    fn test_repayment_total_enforced_by_config() {
        let body = r#"{ "LoanAmount": 1000000, "MonthlyInterestRate": 3,
                        "PrincipalRepayments": [{ "days": 30, "amount": 400000 }],
                        "InterestPaymentDates": [30] }"#;

        let strict = handle_request(body, &CalculatorConfig::strict());
        let json: Value = serde_json::from_str(&strict.to_json().unwrap()).unwrap();
        assert_eq!(json["error"], "RepaymentTotalMismatch");

        assert!(handle_request(body, &CalculatorConfig::default()).is_success());
        assert!(handle_request(body, &CalculatorConfig::lenient()).is_success());
    }

    #[test]
    fn test_partial_plan_under_default_config() {
        let body = r#"{ "LoanAmount": 1000000, "MonthlyInterestRate": 3,
                        "PrincipalRepayments": [{ "days": 10, "amount": 250000 }],
                        "InterestPaymentDates": [10] }"#;
        let response = handle_request(body, &CalculatorConfig::default());
        let json: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["schedule"].as_array().map(Vec::len), Some(10));
        assert_eq!(json["summary"]["_raw"]["totalPrincipalPaid"].as_f64(), Some(250000.0));
    }

    #[test]
    fn test_far_interest_day_is_rejected() {
        let body = r#"{ "LoanAmount": 1000000, "MonthlyInterestRate": 3,
                        "InterestPaymentDates": [4294967295] }"#;
        let response = handle_request(body, &CalculatorConfig::default());
        let json: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "InvalidSchedule");
    }

    #[test]
    fn test_overflow_message() {
        let message = persian_message(&ScheduleError::overflow("accrued interest"));
        assert!(!message.is_empty());
    }

    #[test]
    fn test_duplicate_day_message_uses_persian_digits() {
        let message = persian_message(&ScheduleError::DuplicateRepaymentDay { day: 12 });
        assert!(message.contains("۱۲"));
    }

    #[test]
    fn test_empty_schedule_response() {
        let body = r#"{ "LoanAmount": 1000000, "MonthlyInterestRate": 3 }"#;
        let response = handle_request(body, &CalculatorConfig::default());
        let json: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["schedule"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["summary"]["_raw"]["finalDay"], 0);
    }
}
