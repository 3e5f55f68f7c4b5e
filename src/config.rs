use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::types::SameDayPolicy;

/// one hundred 360-day years
pub const DEFAULT_MAX_HORIZON_DAYS: u32 = 36_000;

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// divisor turning a monthly rate into a daily one
    pub days_per_month: u32,
    /// absolute tolerance for the repayment-total check
    pub repayment_tolerance: Money,
    pub same_day_policy: SameDayPolicy,
    /// run the repayment-total check before calculating, off unless asked for
    pub enforce_repayment_total: bool,
    /// latest day index a request may reference
    pub max_horizon_days: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::marketplace()
    }
}

impl CalculatorConfig {
    /// settings matching the marketplace loan calculator
    pub fn marketplace() -> Self {
        Self {
            days_per_month: 30,
            repayment_tolerance: Money::ONE,
            same_day_policy: SameDayPolicy::Reject,
            enforce_repayment_total: false,
            max_horizon_days: DEFAULT_MAX_HORIZON_DAYS,
        }
    }

    /// marketplace settings that also require the repayments to cover the loan
    pub fn strict() -> Self {
        Self {
            enforce_repayment_total: true,
            ..Self::marketplace()
        }
    }

    /// accepts same-day repayments and partial repayment plans
    pub fn lenient() -> Self {
        Self {
            same_day_policy: SameDayPolicy::Aggregate,
            enforce_repayment_total: false,
            ..Self::marketplace()
        }
    }

    /// parse from json, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig =
            serde_json::from_str(json).map_err(|e| ScheduleError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.days_per_month == 0 {
            return Err(ScheduleError::InvalidConfiguration {
                message: "days_per_month must be at least 1".to_string(),
            });
        }

        if self.max_horizon_days == 0 {
            return Err(ScheduleError::InvalidConfiguration {
                message: "max_horizon_days must be at least 1".to_string(),
            });
        }

        if self.repayment_tolerance.is_negative() {
            return Err(ScheduleError::InvalidConfiguration {
                message: format!("repayment_tolerance must not be negative, got {}", self.repayment_tolerance),
            });
        }

        Ok(())
    }
}
