use crate::schema::{MonthlyAggregate, TransactionKind, TransactionRecord};
use crate::utils::{lookback_start, YearMonth};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Groups transactions into ascending monthly expense/revenue totals.
///
/// Only records dated between the start of the lookback window and `today`
/// (inclusive) count, and with a `scope` only records booked to that budget.
/// Months without any matching record are left out rather than zero-filled.
pub fn aggregate_monthly(
    records: &[TransactionRecord],
    scope: Option<&str>,
    lookback_months: u32,
    today: NaiveDate,
) -> Vec<MonthlyAggregate> {
    let window_start = lookback_start(today, lookback_months);
    let mut buckets: BTreeMap<YearMonth, MonthlyAggregate> = BTreeMap::new();

    for record in records {
        if record.date > today || YearMonth::from_date(record.date) < window_start {
            continue;
        }
        if let Some(budget_id) = scope {
            if record.budget_id.as_deref() != Some(budget_id) {
                continue;
            }
        }

        let month = YearMonth::from_date(record.date);
        let bucket = buckets.entry(month).or_insert_with(|| MonthlyAggregate {
            month,
            total_expenses: 0.0,
            total_revenue: 0.0,
            transaction_count: 0,
        });

        match record.kind {
            TransactionKind::Expense => bucket.total_expenses += record.amount,
            TransactionKind::Revenue => bucket.total_revenue += record.amount,
        }
        bucket.transaction_count += 1;
    }

    buckets.into_values().collect()
}
