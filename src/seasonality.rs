use crate::schema::MonthlyAggregate;
use crate::utils::YearMonth;
use serde::{Deserialize, Serialize};

/// Per-calendar-month expense indices derived from history.
///
/// `indices[0]` is January. An index of 1.0 means the month spends exactly
/// the overall monthly average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalProfile {
    pub overall_average: f64,
    pub indices: [f64; 12],
}

impl SeasonalProfile {
    /// Builds the profile from the months present in `history`.
    ///
    /// Calendar months absent from the history take the overall average, so
    /// their index is 1.0. Returns `None` for an empty history.
    pub fn from_history(history: &[MonthlyAggregate]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }

        let overall_average =
            history.iter().map(|h| h.total_expenses).sum::<f64>() / history.len() as f64;

        let mut sums = [0.0_f64; 12];
        let mut counts = [0_u32; 12];
        for point in history {
            let idx = point.month.month0();
            sums[idx] += point.total_expenses;
            counts[idx] += 1;
        }

        let mut indices = [1.0_f64; 12];
        for (idx, index) in indices.iter_mut().enumerate() {
            let month_average = if counts[idx] == 0 {
                overall_average
            } else {
                sums[idx] / counts[idx] as f64
            };

            *index = if overall_average == 0.0 {
                1.0
            } else {
                month_average / overall_average
            };
        }

        Some(Self {
            overall_average,
            indices,
        })
    }

    pub fn index_for(&self, month: YearMonth) -> f64 {
        self.indices[month.month0()]
    }

    /// Expected expense for `month`: the overall average scaled by its index.
    pub fn expected(&self, month: YearMonth) -> f64 {
        self.overall_average * self.index_for(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: &str, expenses: f64) -> MonthlyAggregate {
        MonthlyAggregate {
            month: month.parse().unwrap(),
            total_expenses: expenses,
            total_revenue: 0.0,
            transaction_count: 1,
        }
    }

    #[test]
    fn test_flat_history_has_unit_indices() {
        let history: Vec<_> = (1..=12)
            .map(|m| point(&format!("2023-{:02}", m), 500.0))
            .collect();
        let profile = SeasonalProfile::from_history(&history).unwrap();

        assert!((profile.overall_average - 500.0).abs() < 1e-10);
        for index in profile.indices {
            assert!((index - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_december_peak() {
        let mut history: Vec<_> = (1..=11)
            .map(|m| point(&format!("2023-{:02}", m), 100.0))
            .collect();
        history.push(point("2023-12", 1300.0));

        let profile = SeasonalProfile::from_history(&history).unwrap();
        // overall = (1100 + 1300) / 12 = 200
        assert!((profile.overall_average - 200.0).abs() < 1e-10);
        assert!((profile.indices[11] - 6.5).abs() < 1e-10);
        assert!((profile.indices[0] - 0.5).abs() < 1e-10);

        let dec: YearMonth = "2024-12".parse().unwrap();
        assert!((profile.expected(dec) - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_months_are_averaged() {
        let history = vec![
            point("2022-03", 100.0),
            point("2023-03", 300.0),
            point("2023-04", 200.0),
        ];
        let profile = SeasonalProfile::from_history(&history).unwrap();
        assert!((profile.overall_average - 200.0).abs() < 1e-10);
        assert!((profile.indices[2] - 1.0).abs() < 1e-10);
        // July never observed, falls back to the overall average
        assert!((profile.indices[6] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_history_does_not_divide_by_zero() {
        let history = vec![point("2023-01", 0.0), point("2023-02", 0.0)];
        let profile = SeasonalProfile::from_history(&history).unwrap();
        assert!(profile.indices.iter().all(|i| *i == 1.0));
        assert_eq!(SeasonalProfile::from_history(&[]), None);
    }
}
