//! # Budget Forecast
//!
//! Expense forecasting for the finance pages of a point-of-sale back office.
//!
//! ## Core Concepts
//!
//! - **Monthly Aggregates**: Raw transactions grouped into ascending calendar-month
//!   expense/revenue totals. Months without activity are simply absent.
//! - **Forecast Methods**: Linear trend, moving average, exponential smoothing and
//!   seasonal index, each with its own minimum history and confidence decay.
//! - **Risk Tiers**: Confidence mapped to Low / Medium / High for display.
//! - **Period Performance**: Utilization and time remaining for every active budget.
//!
//! ## Example
//!
//! ```rust,ignore
//! use budget_forecast::*;
//! use chrono::NaiveDate;
//!
//! let ledger = InMemoryLedger::from_json_str(&std::fs::read_to_string("ledger.json")?)?;
//! let ctx = RequestContext::new(
//!     FinanceSettings::default(),
//!     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
//! );
//!
//! let request = ForecastForm {
//!     budget_id: None,
//!     forecast_period: Some("12".to_string()),
//!     forecast_method: Some("seasonal".to_string()),
//! }
//! .into_request(&ctx.settings)?;
//!
//! let report = BudgetForecaster::new(&ledger).forecast(&ctx, &request)?;
//! for row in &report.rows {
//!     println!("{} {:.2} ({})", row.month, row.predicted_expenses, row.risk);
//! }
//! ```

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod error;
pub mod performance;
pub mod report;
pub mod risk;
pub mod schema;
pub mod seasonality;
pub mod store;
pub mod utils;

pub use aggregation::aggregate_monthly;
pub use config::{FinanceSettings, RequestContext};
pub use engine::{forecast, ForecastEngine};
pub use error::{FinanceError, Result};
pub use performance::{evaluate_budgets, BudgetPerformance, PerformanceSummary, PeriodStatus};
pub use report::{ForecastForm, ForecastReport, ForecastRow};
pub use risk::RiskLevel;
pub use schema::*;
pub use seasonality::SeasonalProfile;
pub use store::{BudgetStore, InMemoryLedger, TransactionStore};
pub use utils::YearMonth;

use log::{debug, info};

/// Runs forecasts and budget performance against a storage backend.
pub struct BudgetForecaster<'a, S> {
    store: &'a S,
}

impl<'a, S> BudgetForecaster<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

impl<'a, S: TransactionStore> BudgetForecaster<'a, S> {
    pub fn forecast(&self, ctx: &RequestContext, request: &ForecastRequest) -> Result<ForecastReport> {
        ctx.settings.validate()?;

        info!(
            "Forecasting {} months with {} method (scope: {})",
            request.horizon.months(),
            request.method,
            request.scope.as_deref().unwrap_or("all budgets")
        );

        let history = self.store.fetch_monthly_totals(
            request.scope.as_deref(),
            ctx.settings.lookback_months,
            ctx.today,
        )?;
        debug!(
            "Loaded {} months of history over a {}-month lookback",
            history.len(),
            ctx.settings.lookback_months
        );

        let engine = ForecastEngine::new(YearMonth::from_date(ctx.today));
        let points = engine.forecast(&history, request.horizon, request.method);

        if points.is_empty() {
            info!(
                "No forecast available: {} months of history is below the {} method minimum",
                history.len(),
                request.method
            );
        }

        Ok(ForecastReport::from_points(request, history.len(), &points))
    }
}

impl<'a, S: BudgetStore> BudgetForecaster<'a, S> {
    pub fn performance(&self, ctx: &RequestContext) -> Result<Vec<BudgetPerformance>> {
        let budgets = self.store.fetch_active_budgets(ctx.today)?;
        debug!("Evaluating {} active budgets", budgets.len());
        Ok(evaluate_budgets(&budgets, ctx.today))
    }
}
