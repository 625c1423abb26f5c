use crate::schema::ActiveBudget;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Budgets ending within this many days are flagged as ending soon.
pub const ENDING_SOON_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PeriodStatus {
    Overdue,
    #[serde(rename = "Ending Soon")]
    EndingSoon,
    #[serde(rename = "On Track")]
    OnTrack,
}

impl PeriodStatus {
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        if days_remaining < 0 {
            PeriodStatus::Overdue
        } else if days_remaining < ENDING_SOON_DAYS {
            PeriodStatus::EndingSoon
        } else {
            PeriodStatus::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodStatus::Overdue => "Overdue",
            PeriodStatus::EndingSoon => "Ending Soon",
            PeriodStatus::OnTrack => "On Track",
        }
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BudgetPerformance {
    pub budget_id: String,
    pub name: String,
    pub budgeted_amount: f64,
    pub actual_amount: f64,
    /// Actual spend as a percentage of the budgeted amount.
    pub utilization: f64,
    pub remaining: f64,
    pub days_remaining: i64,
    pub status: PeriodStatus,
}

impl BudgetPerformance {
    pub fn evaluate(budget: &ActiveBudget, today: NaiveDate) -> Self {
        let utilization = if budget.budgeted_amount == 0.0 {
            0.0
        } else {
            budget.actual_amount / budget.budgeted_amount * 100.0
        };
        let days_remaining = (budget.end_date - today).num_days();

        Self {
            budget_id: budget.id.clone(),
            name: budget.name.clone(),
            budgeted_amount: budget.budgeted_amount,
            actual_amount: budget.actual_amount,
            utilization,
            remaining: budget.budgeted_amount - budget.actual_amount,
            days_remaining,
            status: PeriodStatus::from_days_remaining(days_remaining),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceSummary {
    pub total_budgeted: f64,
    pub total_actual: f64,
    pub total_remaining: f64,
    pub overall_utilization: f64,
    pub overdue_count: usize,
}

impl PerformanceSummary {
    pub fn from_rows(rows: &[BudgetPerformance]) -> Self {
        let total_budgeted: f64 = rows.iter().map(|r| r.budgeted_amount).sum();
        let total_actual: f64 = rows.iter().map(|r| r.actual_amount).sum();

        Self {
            total_budgeted,
            total_actual,
            total_remaining: total_budgeted - total_actual,
            overall_utilization: if total_budgeted == 0.0 {
                0.0
            } else {
                total_actual / total_budgeted * 100.0
            },
            overdue_count: rows
                .iter()
                .filter(|r| r.status == PeriodStatus::Overdue)
                .count(),
        }
    }
}

pub fn evaluate_budgets(budgets: &[ActiveBudget], today: NaiveDate) -> Vec<BudgetPerformance> {
    budgets
        .iter()
        .map(|b| BudgetPerformance::evaluate(b, today))
        .collect()
}
