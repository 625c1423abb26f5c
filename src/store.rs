use crate::aggregation::aggregate_monthly;
use crate::error::{FinanceError, Result};
use crate::schema::{ActiveBudget, MonthlyAggregate, TransactionRecord};
use chrono::NaiveDate;
use log::debug;

/// Source of monthly transaction totals.
pub trait TransactionStore {
    /// Ascending monthly totals for `scope` (all budgets when `None`) over
    /// the trailing `lookback_months` window ending at `today`.
    fn fetch_monthly_totals(
        &self,
        scope: Option<&str>,
        lookback_months: u32,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyAggregate>>;
}

/// Source of budgets that have started as of `today`.
pub trait BudgetStore {
    fn fetch_active_budgets(&self, today: NaiveDate) -> Result<Vec<ActiveBudget>>;
}

/// Store backed by in-process vectors of transactions and budgets.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    transactions: Vec<TransactionRecord>,
    budgets: Vec<ActiveBudget>,
}

impl InMemoryLedger {
    pub fn new(transactions: Vec<TransactionRecord>, budgets: Vec<ActiveBudget>) -> Self {
        Self {
            transactions,
            budgets,
        }
    }

    /// Loads a ledger from a JSON document shaped
    /// `{"transactions": [...], "budgets": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        struct LedgerFile {
            #[serde(default)]
            transactions: Vec<TransactionRecord>,
            #[serde(default)]
            budgets: Vec<ActiveBudget>,
        }

        let file: LedgerFile = serde_json::from_str(json)?;
        for txn in &file.transactions {
            if txn.amount.is_nan() || txn.amount < 0.0 {
                return Err(FinanceError::Storage(format!(
                    "transaction on {} has invalid amount {}",
                    txn.date, txn.amount
                )));
            }
        }
        Ok(Self::new(file.transactions, file.budgets))
    }

    pub fn push_transaction(&mut self, record: TransactionRecord) {
        self.transactions.push(record);
    }

    pub fn push_budget(&mut self, budget: ActiveBudget) {
        self.budgets.push(budget);
    }
}

impl TransactionStore for InMemoryLedger {
    fn fetch_monthly_totals(
        &self,
        scope: Option<&str>,
        lookback_months: u32,
        today: NaiveDate,
    ) -> Result<Vec<MonthlyAggregate>> {
        let months = aggregate_monthly(&self.transactions, scope, lookback_months, today);
        debug!(
            "Aggregated {} transactions into {} months (scope: {:?})",
            self.transactions.len(),
            months.len(),
            scope
        );
        Ok(months)
    }
}

impl BudgetStore for InMemoryLedger {
    fn fetch_active_budgets(&self, today: NaiveDate) -> Result<Vec<ActiveBudget>> {
        Ok(self
            .budgets
            .iter()
            .filter(|b| b.start_date <= today)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_active_budgets_exclude_future_starts() {
        let mut ledger = InMemoryLedger::default();
        ledger.push_budget(ActiveBudget {
            id: "b1".to_string(),
            name: "Stock".to_string(),
            budgeted_amount: 1000.0,
            actual_amount: 200.0,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
        });
        ledger.push_budget(ActiveBudget {
            id: "b2".to_string(),
            name: "Next year".to_string(),
            budgeted_amount: 1000.0,
            actual_amount: 0.0,
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
        });

        let active = ledger.fetch_active_budgets(date(2024, 6, 1)).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "b1");
    }

    #[test]
    fn test_monthly_totals_delegate_to_aggregator() {
        let mut ledger = InMemoryLedger::default();
        ledger.push_transaction(TransactionRecord {
            budget_id: Some("b1".to_string()),
            kind: TransactionKind::Expense,
            amount: 42.0,
            date: date(2024, 5, 3),
        });

        let months = ledger
            .fetch_monthly_totals(Some("b1"), 12, date(2024, 6, 1))
            .unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].total_expenses, 42.0);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "transactions": [
                {"budget_id": "b1", "kind": "expense", "amount": 10.5, "date": "2024-02-01"},
                {"budget_id": null, "kind": "revenue", "amount": 99.0, "date": "2024-02-03"}
            ]
        }"#;
        let ledger = InMemoryLedger::from_json_str(json).unwrap();
        let months = ledger.fetch_monthly_totals(None, 12, date(2024, 6, 1)).unwrap();
        assert_eq!(months[0].transaction_count, 2);

        let negative = r#"{"transactions": [{"budget_id": null, "kind": "expense", "amount": -1.0, "date": "2024-02-01"}]}"#;
        assert!(matches!(
            InMemoryLedger::from_json_str(negative),
            Err(FinanceError::Storage(_))
        ));
        assert!(InMemoryLedger::from_json_str("not json").is_err());
    }
}
