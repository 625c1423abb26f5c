use crate::schema::{ForecastHorizon, ForecastMethod, ForecastPoint, MonthlyAggregate};
use crate::seasonality::SeasonalProfile;
use crate::utils::{clamp_percentage, YearMonth};
use log::debug;

/// Smoothing factor for the exponential method.
pub const SMOOTHING_ALPHA: f64 = 0.3;

/// Window of the moving-average method, in months.
pub const MOVING_AVERAGE_WINDOW: usize = 3;

/// Projects monthly expense totals forward from a fixed current month.
///
/// Period `i` of every forecast targets `anchor + i` months.
pub struct ForecastEngine {
    anchor: YearMonth,
}

impl ForecastEngine {
    pub fn new(anchor: YearMonth) -> Self {
        Self { anchor }
    }

    /// Runs `method` over `history` (ascending by month).
    ///
    /// Returns exactly `horizon` points, or none when the history is shorter
    /// than the method's minimum.
    pub fn forecast(
        &self,
        history: &[MonthlyAggregate],
        horizon: ForecastHorizon,
        method: ForecastMethod,
    ) -> Vec<ForecastPoint> {
        method.predict(history, horizon, self.anchor)
    }
}

impl ForecastMethod {
    pub fn predict(
        &self,
        history: &[MonthlyAggregate],
        horizon: ForecastHorizon,
        anchor: YearMonth,
    ) -> Vec<ForecastPoint> {
        if *self == ForecastMethod::Seasonal && history.len() < self.min_history() {
            debug!(
                "Seasonal forecast needs {} months, got {}; using linear trend",
                self.min_history(),
                history.len()
            );
            return ForecastMethod::Linear.predict(history, horizon, anchor);
        }

        if history.len() < self.min_history() {
            debug!(
                "Not enough history for {} forecast: {} of {} months",
                self,
                history.len(),
                self.min_history()
            );
            return Vec::new();
        }

        let expenses: Vec<f64> = history.iter().map(|h| h.total_expenses).collect();

        match self {
            ForecastMethod::Linear => {
                let (slope, intercept) = least_squares(&expenses);
                let n = expenses.len() as f64;
                self.project(horizon, anchor, |i, _| slope * (n + i as f64) + intercept)
            }
            ForecastMethod::MovingAverage => {
                let level = trailing_mean(&expenses, MOVING_AVERAGE_WINDOW);
                self.project(horizon, anchor, |_, _| level)
            }
            ForecastMethod::Exponential => {
                let level = smoothed_level(&expenses, SMOOTHING_ALPHA);
                self.project(horizon, anchor, |_, _| level)
            }
            ForecastMethod::Seasonal => match SeasonalProfile::from_history(history) {
                Some(profile) => self.project(horizon, anchor, |_, month| profile.expected(month)),
                None => Vec::new(),
            },
        }
    }

    fn project<F>(&self, horizon: ForecastHorizon, anchor: YearMonth, value_at: F) -> Vec<ForecastPoint>
    where
        F: Fn(u32, YearMonth) -> f64,
    {
        let decay = self.confidence_decay();

        (1..=horizon.months())
            .map(|i| {
                let target_month = anchor.add_months(i as i32);
                let raw = value_at(i, target_month);
                ForecastPoint {
                    period_index: i,
                    target_month,
                    predicted_expense: if raw.is_finite() { raw.max(0.0) } else { 0.0 },
                    confidence: clamp_percentage(100.0 - decay * i as f64),
                }
            })
            .collect()
    }
}

/// Ordinary least-squares fit of `values` against x = 1..=n.
///
/// Returns `(slope, intercept)`. A degenerate fit yields a flat line through
/// the mean.
pub fn least_squares(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (idx, &y) in values.iter().enumerate() {
        let x = (idx + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    let slope = if denominator.abs() < f64::EPSILON {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;

    (slope, intercept)
}

/// Mean of the last `window` values (or of all of them, if fewer).
pub fn trailing_mean(values: &[f64], window: usize) -> f64 {
    let window = window.min(values.len());
    if window == 0 {
        return 0.0;
    }
    values[values.len() - window..].iter().sum::<f64>() / window as f64
}

/// Simple exponential smoothing level after consuming every value.
///
/// The level starts at the first observation and moves `alpha` of the way
/// toward each later one. This is the recursive update, not a flat
/// projection of the first observation: `[100, 200]` smooths to 130.
pub fn smoothed_level(values: &[f64], alpha: f64) -> f64 {
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return 0.0;
    };
    iter.fold(first, |level, &y| alpha * y + (1.0 - alpha) * level)
}

pub fn forecast(
    history: &[MonthlyAggregate],
    horizon: ForecastHorizon,
    method: ForecastMethod,
    anchor: YearMonth,
) -> Vec<ForecastPoint> {
    ForecastEngine::new(anchor).forecast(history, horizon, method)
}
