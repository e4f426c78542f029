//! Bank reconciliation example: import a statement, reconcile, confirm and report

use ledger_recon::utils::MemoryStorage;
use ledger_recon::{BankRecord, EngineConfig, FixedClock, Ledger, Period, Transaction};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

const LEDGER_JSON: &str = r#"[
    {"id": 1, "date": "2024-01-15", "amount": "150.00", "reason": "Grocery", "category": "Food", "type": "expense"},
    {"id": 2, "date": "2024-01-14", "amount": "2000.00", "reason": "Salary", "category": "Income", "type": "income"},
    {"id": 3, "date": "2024-01-02", "amount": "900.00", "reason": "Rent", "category": "Housing", "type": "expense"},
    {"id": 4, "date": "2024-01-18", "amount": "38.20", "reason": "Fuel", "category": "Transportation", "type": "expense"},
    {"id": 5, "date": "2024-01-19", "amount": "n/a", "reason": "Pharmacy", "category": "Healthcare", "type": "expense"}
]"#;

const STATEMENT_JSON: &str = r#"[
    {"date": "2024-01-15", "amount": "140.00", "reason": "Grocery", "type": "expense"},
    {"date": "2024-01-14", "amount": 2000, "reason": "ACME PAYROLL", "type": "income"},
    {"date": "2024-01-02", "amount": "900", "reason": "Rent", "type": "expense"},
    {"date": "2024-01-19", "amount": "12.99", "reason": "Pharmacy", "type": "expense"}
]"#;

const CONFIG_TOML: &str = r#"
top_category_count = 2
export_file_prefix = "household_report"
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("🏦 Ledger Recon - Bank Reconciliation Example\n");

    let transactions: Vec<Transaction> = serde_json::from_str(LEDGER_JSON)?;
    let statement: Vec<BankRecord> = serde_json::from_str(STATEMENT_JSON)?;
    let now = NaiveDate::from_ymd_opt(2024, 1, 20)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .ok_or("invalid demo date")?;

    let mut ledger = Ledger::new(MemoryStorage::with_transactions(transactions))
        .with_clock(Box::new(FixedClock(now)))
        .with_config(EngineConfig::from_toml_str(CONFIG_TOML)?);

    // 1. Import the bank statement
    let imported = ledger.import_bank_statement(statement);
    println!(
        "📥 Imported statement {} with {} records\n",
        imported.id,
        imported.records.len()
    );

    // 2. Reconcile
    let run = ledger.reconcile().await?;
    println!("🔗 Exact matches: {}", run.outcome.matched_count);
    println!("❓ Not on the bank statement:");
    for transaction in &run.outcome.unmatched {
        println!(
            "  #{} {} {} ${}",
            transaction.id,
            transaction.date,
            transaction.reason,
            transaction.amount_or_zero()
        );
    }

    println!("\n⚠️  Amount discrepancies:");
    for discrepancy in &run.discrepancies {
        println!(
            "  #{} {}: ledger ${} vs bank ${} (difference ${})",
            discrepancy.transaction.id,
            discrepancy.transaction.reason,
            discrepancy.transaction.amount_or_zero(),
            discrepancy
                .bank_amount
                .as_ref()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "?".to_string()),
            discrepancy.difference()
        );
    }

    // 3. The user confirms what they have checked
    for id in [2, 3] {
        let confirmed = ledger.confirm_match(id).await?;
        println!("\n  ✓ Confirmed #{} {}", confirmed.id, confirmed.reason);
    }

    let status = ledger.reconciliation_status().await?;
    println!(
        "\n📋 Status: {} total, {} confirmed, {} unconfirmed, {} not on statement, {} discrepancies",
        status.total, status.confirmed, status.unconfirmed, status.bank_unmatched, status.discrepancies
    );

    // 4. Generate and export a report
    let report = ledger.generate_report(Period::Month).await?;
    println!("\n🧾 Report #{} ({})", report.id, report.date);
    println!("  Income:   ${}", report.income);
    println!("  Expenses: ${}", report.expenses);
    println!("  Balance:  ${}", report.balance);
    println!("  Top categories: {}", report.top_categories.join(", "));

    let export = ledger.export_report(report.id).await?;
    println!("\n💾 Export file: {}", export.file_name);
    println!("{}", export.contents);

    println!("\n🎉 Bank reconciliation example completed successfully!");

    Ok(())
}
