pub mod config;
pub mod decimal;
pub mod errors;
pub mod locale;
pub mod payout;
pub mod schedule;
pub mod types;
pub mod wire;

// re-export key types
pub use config::CalculatorConfig;
pub use decimal::{Money, Rate};
pub use errors::{Result, ScheduleError};
pub use payout::{estimate_payout, PayoutEstimate};
pub use schedule::{
    check_repayment_total, compute_schedule, compute_schedule_with, AccrualEngine,
    RepaymentSchedule,
};
pub use types::{
    DayEvent, DayRecord, PrincipalRepayment, SameDayPolicy, ScheduleRequest, ScheduleSummary,
};
pub use wire::{handle_request, ScheduleResponse, WireRequest};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
