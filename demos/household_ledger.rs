//! Household ledger example: record transactions and look at them per period

use ledger_recon::utils::{EnhancedTransactionValidator, MemoryStorage};
use ledger_recon::{
    patterns, FixedClock, Ledger, Period, TransactionBuilder, TransactionQuery, TransactionType,
    TypeFilter,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("🏠 Ledger Recon - Household Ledger Example\n");

    let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
    let mut ledger = Ledger::with_validator(MemoryStorage::new(), Box::new(EnhancedTransactionValidator))
        .with_clock(Box::new(FixedClock(today.and_hms_opt(18, 0, 0).unwrap())));

    // 1. Record a month of household activity
    println!("💰 Recording Transactions...\n");

    let salary = patterns::create_income(
        ledger.next_transaction_id().await?,
        NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
        "Salary".to_string(),
        BigDecimal::from(2000),
    )?;
    ledger.record_transaction(salary).await?;
    println!("  ✓ Recorded: Salary of $2000");

    let entries = [
        (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "Rent", "Housing", 900),
        (NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), "Grocery", "Food", 150),
        (NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(), "Bus pass", "Transportation", 45),
        (NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(), "Cinema", "Entertainment", 24),
        (NaiveDate::from_ymd_opt(2023, 12, 22).unwrap(), "Heating", "Utilities", 130),
    ];

    for (date, reason, category, amount) in entries {
        let expense = patterns::create_expense(
            ledger.next_transaction_id().await?,
            date,
            reason.to_string(),
            category.to_string(),
            BigDecimal::from(amount),
        )?;
        ledger.record_transaction(expense).await?;
        println!("  ✓ Recorded: {} ({}) ${}", reason, category, amount);
    }

    let refund = TransactionBuilder::new(
        ledger.next_transaction_id().await?,
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        "Returned jacket".to_string(),
        TransactionType::Income,
    )
    .amount(BigDecimal::from(60))
    .category("Other".to_string())
    .build()?;
    ledger.record_transaction(refund).await?;
    println!("  ✓ Recorded: Refund of $60");

    // 2. Summaries for each period
    println!("\n📈 Period Summaries (as of {})...\n", today);
    for period in Period::ALL_PERIODS {
        let summary = ledger.summary(period).await?;
        println!(
            "  {:<6} income ${:<8} expenses ${:<8} balance ${}",
            period, summary.income, summary.expenses, summary.balance
        );
    }

    // 3. Where the money went
    println!("\n📊 Spending by Category:");
    for entry in ledger.category_breakdown().await?.sorted_by_total() {
        println!("  {}: ${}", entry.category, entry.total);
    }

    println!("\n📅 Monthly Trend:");
    for month in ledger.monthly_trend().await? {
        println!(
            "  {}: income ${}, expenses ${}, net ${}",
            month.label(),
            month.income,
            month.expenses,
            month.net()
        );
    }

    // 4. Search
    let query = TransactionQuery::new("food", TypeFilter::Expense);
    println!("\n🔍 Expenses matching \"{}\" this month:", query.search);
    for transaction in ledger.search(&query, Period::Month).await? {
        println!(
            "  #{} {} {} ${}",
            transaction.id,
            transaction.date,
            transaction.reason,
            transaction.amount_or_zero()
        );
    }

    println!("\n🎉 Household ledger example completed successfully!");

    Ok(())
}
