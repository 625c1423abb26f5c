use crate::error::{FinanceError, Result};
use crate::utils::YearMonth;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[schemars(description = "Money leaving the business against a budget")]
    Expense,

    #[schemars(description = "Money received, recorded against a budget")]
    Revenue,
}

/// A single ledger movement as read from the transaction store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransactionRecord {
    #[schemars(description = "Budget this transaction is booked against, if any")]
    pub budget_id: Option<String>,

    pub kind: TransactionKind,

    #[schemars(description = "Non-negative amount in the store's currency")]
    pub amount: f64,

    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyAggregate {
    pub month: YearMonth,
    pub total_expenses: f64,
    pub total_revenue: f64,
    pub transaction_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastPoint {
    #[schemars(description = "1-based number of months ahead of the current month")]
    pub period_index: u32,

    pub target_month: YearMonth,

    #[schemars(description = "Predicted expense total for the month, never negative")]
    pub predicted_expense: f64,

    #[schemars(description = "Heuristic certainty in percent, 0 to 100")]
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    #[default]
    #[schemars(description = "Least-squares trend line over the history")]
    Linear,

    #[schemars(description = "Flat projection of the mean of the last three months")]
    MovingAverage,

    #[schemars(description = "Flat projection of the simple exponentially smoothed level")]
    Exponential,

    #[schemars(description = "Overall mean scaled by a per-calendar-month index; needs a full year")]
    Seasonal,
}

impl ForecastMethod {
    pub const ALL: [ForecastMethod; 4] = [
        ForecastMethod::Linear,
        ForecastMethod::MovingAverage,
        ForecastMethod::Exponential,
        ForecastMethod::Seasonal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::Linear => "linear",
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::Exponential => "exponential",
            ForecastMethod::Seasonal => "seasonal",
        }
    }

    /// Fewest history points the method needs before it will predict.
    pub fn min_history(&self) -> usize {
        match self {
            ForecastMethod::Linear | ForecastMethod::Exponential => 2,
            ForecastMethod::MovingAverage => 3,
            ForecastMethod::Seasonal => 12,
        }
    }

    /// Confidence points lost per month ahead.
    pub fn confidence_decay(&self) -> f64 {
        match self {
            ForecastMethod::Linear => 5.0,
            ForecastMethod::MovingAverage => 3.0,
            ForecastMethod::Exponential => 4.0,
            ForecastMethod::Seasonal => 2.0,
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastMethod {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        ForecastMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| FinanceError::InvalidMethod(s.to_string()))
    }
}

/// Number of future months to predict. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "u32", into = "u32")]
pub struct ForecastHorizon(u32);

impl ForecastHorizon {
    /// Horizons offered by the budget forecast form.
    pub const ALLOWED: [u32; 4] = [6, 12, 18, 24];

    pub fn new(months: u32) -> Result<Self> {
        if months == 0 {
            return Err(FinanceError::InvalidHorizon(
                "horizon must be at least one month".to_string(),
            ));
        }
        Ok(Self(months))
    }

    /// Like `new`, but only accepts the horizons the form offers.
    pub fn from_choice(months: u32) -> Result<Self> {
        if !Self::ALLOWED.contains(&months) {
            return Err(FinanceError::InvalidHorizon(format!(
                "{} months is not one of {:?}",
                months,
                Self::ALLOWED
            )));
        }
        Self::new(months)
    }

    pub fn months(&self) -> u32 {
        self.0
    }
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        Self(12)
    }
}

impl TryFrom<u32> for ForecastHorizon {
    type Error = FinanceError;

    fn try_from(months: u32) -> Result<Self> {
        Self::new(months)
    }
}

impl From<ForecastHorizon> for u32 {
    fn from(horizon: ForecastHorizon) -> Self {
        horizon.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ForecastRequest {
    #[schemars(description = "Budget to forecast; absent means all budgets combined")]
    pub scope: Option<String>,

    pub horizon: ForecastHorizon,

    pub method: ForecastMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ActiveBudget {
    pub id: String,
    pub name: String,
    pub budgeted_amount: f64,
    pub actual_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tags() {
        for method in ForecastMethod::ALL {
            assert_eq!(method.as_str().parse::<ForecastMethod>().unwrap(), method);
        }
        assert_eq!(
            "moving_average".parse::<ForecastMethod>().unwrap(),
            ForecastMethod::MovingAverage
        );

        let err = "arima".parse::<ForecastMethod>().unwrap_err();
        assert!(matches!(err, FinanceError::InvalidMethod(tag) if tag == "arima"));
    }

    #[test]
    fn test_method_serde_matches_tags() {
        let json = serde_json::to_string(&ForecastMethod::MovingAverage).unwrap();
        assert_eq!(json, "\"moving_average\"");
    }

    #[test]
    fn test_horizon_validation() {
        assert!(ForecastHorizon::new(0).is_err());
        assert_eq!(ForecastHorizon::new(7).unwrap().months(), 7);

        assert!(ForecastHorizon::from_choice(7).is_err());
        assert_eq!(ForecastHorizon::from_choice(18).unwrap().months(), 18);
        assert_eq!(ForecastHorizon::default().months(), 12);

        assert!(serde_json::from_str::<ForecastHorizon>("0").is_err());
        let parsed: ForecastHorizon = serde_json::from_str("6").unwrap();
        assert_eq!(parsed.months(), 6);
    }

    #[test]
    fn test_request_schema_generation() {
        let schema = schemars::schema_for!(ForecastRequest);
        let json = serde_json::to_string_pretty(&schema).unwrap();
        assert!(json.contains("scope"));
        assert!(json.contains("moving_average"));
    }
}
