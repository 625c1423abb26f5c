use budget_forecast::*;
use chrono::NaiveDate;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).ok_or("invalid date")?;
    let mut ledger = InMemoryLedger::default();

    // Eighteen months of restaurant spend with a December rush
    let start: YearMonth = "2023-01".parse()?;
    for i in 0..18 {
        let month = start.add_months(i);
        let base = 40_000.0 + 600.0 * i as f64;
        let amount = if month.month() == 12 { base * 1.8 } else { base };
        let date = month.first_day().ok_or("invalid month")?;

        ledger.push_transaction(TransactionRecord {
            budget_id: Some("kitchen".to_string()),
            kind: TransactionKind::Expense,
            amount,
            date,
        });
        ledger.push_transaction(TransactionRecord {
            budget_id: Some("kitchen".to_string()),
            kind: TransactionKind::Revenue,
            amount: amount * 1.35,
            date,
        });
    }
    ledger.push_budget(ActiveBudget {
        id: "kitchen".to_string(),
        name: "Kitchen supplies".to_string(),
        budgeted_amount: 300_000.0,
        actual_amount: 248_500.0,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid date")?,
        end_date: NaiveDate::from_ymd_opt(2024, 6, 30).ok_or("invalid date")?,
    });

    let ctx = RequestContext::new(FinanceSettings::default(), today);
    let forecaster = BudgetForecaster::new(&ledger);

    for method in ForecastMethod::ALL {
        let request = ForecastForm {
            budget_id: Some("kitchen".to_string()),
            forecast_period: Some("12".to_string()),
            forecast_method: Some(method.to_string()),
        }
        .into_request(&ctx.settings)?;

        let report = forecaster.forecast(&ctx, &request)?;
        println!("\n=== {} ({} months of history) ===", method, report.history_months);

        if report.is_empty() {
            println!("No forecast available");
            continue;
        }

        for row in &report.rows {
            println!(
                "{:>2}  {}  {:>18}  {:>5.1}%  {}",
                row.period,
                row.month,
                ctx.settings.format_amount(row.predicted_expenses),
                row.confidence,
                row.risk
            );
        }
        println!(
            "Total: {}  Mean confidence: {:.1}%",
            ctx.settings.format_amount(report.total_predicted),
            report.average_confidence
        );
    }

    println!("\n=== Period performance ===");
    for row in forecaster.performance(&ctx)? {
        println!(
            "{}: {:.1}% used, {} left, {} days ({})",
            row.name,
            row.utilization,
            ctx.settings.format_amount(row.remaining),
            row.days_remaining,
            row.status
        );
    }

    Ok(())
}
