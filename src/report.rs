use crate::config::FinanceSettings;
use crate::error::{FinanceError, Result};
use crate::risk::RiskLevel;
use crate::schema::{ForecastHorizon, ForecastMethod, ForecastPoint, ForecastRequest};
use crate::utils::YearMonth;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Raw values of the budget forecast form, as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ForecastForm {
    #[serde(default)]
    pub budget_id: Option<String>,
    #[serde(default)]
    pub forecast_period: Option<String>,
    #[serde(default)]
    pub forecast_method: Option<String>,
}

impl ForecastForm {
    /// Validates the form, filling absent fields from `settings`.
    ///
    /// A blank `budget_id` means all budgets. A period or method that is
    /// present but unrecognised is an error.
    pub fn into_request(self, settings: &FinanceSettings) -> Result<ForecastRequest> {
        let scope = self
            .budget_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let horizon = match non_blank(self.forecast_period) {
            None => ForecastHorizon::from_choice(settings.default_horizon)?,
            Some(raw) => {
                let months: u32 = raw.parse().map_err(|_| {
                    FinanceError::InvalidHorizon(format!("'{}' is not a number of months", raw))
                })?;
                ForecastHorizon::from_choice(months)?
            }
        };

        let method = match non_blank(self.forecast_method) {
            None => settings.default_method,
            Some(raw) => raw.parse::<ForecastMethod>()?,
        };

        Ok(ForecastRequest {
            scope,
            horizon,
            method,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastRow {
    pub period: u32,
    pub month: YearMonth,
    pub predicted_expenses: f64,
    pub confidence: f64,
    pub risk: RiskLevel,
}

impl From<&ForecastPoint> for ForecastRow {
    fn from(point: &ForecastPoint) -> Self {
        Self {
            period: point.period_index,
            month: point.target_month,
            predicted_expenses: point.predicted_expense,
            confidence: point.confidence,
            risk: RiskLevel::from_confidence(point.confidence),
        }
    }
}

/// Forecast rows plus the summary figures shown above the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastReport {
    pub method: ForecastMethod,
    pub scope: Option<String>,
    pub history_months: usize,
    pub rows: Vec<ForecastRow>,
    pub total_predicted: f64,
    pub average_confidence: f64,
}

impl ForecastReport {
    pub fn from_points(
        request: &ForecastRequest,
        history_months: usize,
        points: &[ForecastPoint],
    ) -> Self {
        let rows: Vec<ForecastRow> = points.iter().map(ForecastRow::from).collect();
        let total_predicted = rows.iter().map(|r| r.predicted_expenses).sum();
        let average_confidence = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.confidence).sum::<f64>() / rows.len() as f64
        };

        Self {
            method: request.method,
            scope: request.scope.clone(),
            history_months,
            rows,
            total_predicted,
            average_confidence,
        }
    }

    /// True when there was too little history to forecast.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
