use ledger_recon::utils::{EnhancedTransactionValidator, MemoryStorage};
use ledger_recon::*;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

fn dec(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
}

fn household() -> Vec<Transaction> {
    let raw = r#"[
        {"id": 1, "date": "2024-01-15", "amount": "150.00", "reason": "Grocery", "category": "Food", "type": "expense", "matched": false},
        {"id": 2, "date": "2024-01-14", "amount": 2000, "reason": "Salary", "category": "Income", "type": "income", "matched": true},
        {"id": 3, "date": "2024-01-20", "amount": "12.5", "reason": "Lunch", "category": "Food", "type": "expense"},
        {"id": 4, "date": "2024-01-02", "amount": "900", "reason": "Rent", "category": "Housing", "type": "expense"},
        {"id": 5, "date": "2023-12-24", "amount": "80", "reason": "Gifts", "type": "expense"},
        {"id": 6, "date": "2023-06-01", "amount": "300", "reason": "Bonus", "category": "Income", "type": "income"},
        {"id": 7, "date": "2024-01-18", "amount": "oops", "reason": "Parking", "category": "Transportation", "type": "expense"}
    ]"#;
    serde_json::from_str(raw).unwrap()
}

#[test]
fn test_balance_identity_holds_for_every_period() {
    let transactions = household();
    let reference = date(2024, 1, 20);

    for period in Period::ALL_PERIODS {
        let in_period = filter_by_period(&transactions, period, reference);
        let income: BigDecimal = in_period
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount_or_zero())
            .sum();
        let expenses: BigDecimal = in_period
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount_or_zero())
            .sum();

        assert_eq!(income - expenses, summarize(&in_period).balance, "period {}", period);
    }
}

#[test]
fn test_worked_summary_example() {
    let transactions = vec![
        Transaction::new(
            1,
            date(2024, 1, 15),
            dec("150.00"),
            "Grocery".to_string(),
            Some("Food".to_string()),
            TransactionType::Expense,
        ),
        Transaction::new(
            2,
            date(2024, 1, 14),
            dec("2000.00"),
            "Salary".to_string(),
            Some("Income".to_string()),
            TransactionType::Income,
        ),
    ];

    let summary = summarize(&filter_by_period(&transactions, Period::Month, date(2024, 1, 20)));
    assert_eq!(
        summary,
        Summary {
            income: dec("2000.00"),
            expenses: dec("150.00"),
            balance: dec("1850.00"),
        }
    );
}

#[test]
fn test_malformed_amounts_degrade_instead_of_failing() {
    let transactions = household();
    let january = filter_by_period(&transactions, Period::Month, date(2024, 1, 20));

    // Parking has a non-numeric amount and contributes nothing
    let summary = summarize(&january);
    assert_eq!(summary.expenses, dec("1062.5"));
    assert_eq!(summary.income, dec("2000"));

    let breakdown = category_breakdown(&transactions);
    assert_eq!(breakdown.get("Transportation"), Some(&dec("0")));
    assert_eq!(breakdown.get("Other"), Some(&dec("80")));
}

#[test]
fn test_reconcile_and_discrepancy_examples() {
    let grocery = Transaction::new(
        1,
        date(2024, 1, 15),
        dec("150.00"),
        "Grocery".to_string(),
        Some("Food".to_string()),
        TransactionType::Expense,
    );
    let bank = vec![BankRecord::new(
        date(2024, 1, 15),
        dec("140.00"),
        "Grocery".to_string(),
        TransactionType::Expense,
    )];

    let discrepancies = find_discrepancies(std::slice::from_ref(&grocery), &bank);
    assert_eq!(discrepancies.len(), 1);
    assert_eq!(discrepancies[0].transaction.amount, Some(dec("150.00")));
    assert_eq!(discrepancies[0].bank_amount, Some(dec("140.00")));

    let outcome = reconcile(std::slice::from_ref(&grocery), &bank);
    assert_eq!(outcome.unmatched, vec![grocery.clone()]);
    assert_eq!(outcome.matched_count, 0);

    // Same date, amount and type: matched regardless of the bank's wording
    let bank = vec![BankRecord::new(
        date(2024, 1, 15),
        dec("150"),
        "CARD 1234 FRESH MARKET".to_string(),
        TransactionType::Expense,
    )];
    let outcome = reconcile(std::slice::from_ref(&grocery), &bank);
    assert_eq!(outcome.matched_count, 1);
    assert!(find_discrepancies(&[grocery], &bank).is_empty());
}

#[test]
fn test_bank_records_deserialize_from_parsed_statement() {
    let raw = r#"[
        {"date": "2024-01-14", "amount": "2000.00", "reason": "Salary", "type": "income"},
        {"date": "2024-01-15", "amount": "140.00", "reason": "Grocery", "type": "expense"}
    ]"#;
    let bank: Vec<BankRecord> = serde_json::from_str(raw).unwrap();
    let run = ReconciliationEngine::new().run(&household(), &bank);

    assert_eq!(run.outcome.matched_count, 1);
    assert_eq!(run.discrepancies.len(), 1);
    assert_eq!(run.status.confirmed, 1);
    assert_eq!(run.status.total, 7);
    assert_eq!(run.status.bank_unmatched, 6);
}

#[test]
fn test_reports_are_sequential_with_identical_totals() {
    let generator = ReportGenerator::default();
    let mut log = ReportLog::new();
    let transactions = household();

    let first = log.generate(&generator, &transactions, &[], Period::Month, noon(2024, 1, 20));
    let second = log.generate(&generator, &transactions, &[], Period::Month, noon(2024, 1, 20));

    assert_ne!(first.id, second.id);
    assert_eq!(second.id, first.id + 1);
    assert_eq!(first.income, second.income);
    assert_eq!(first.expenses, second.expenses);
    assert_eq!(first.balance, second.balance);
    assert_eq!(first.top_categories, vec!["Housing", "Food", "Other"]);
}

#[tokio::test]
async fn test_full_reconciliation_workflow() {
    let storage = MemoryStorage::with_transactions(household());
    let mut ledger = Ledger::new(storage).with_clock(Box::new(FixedClock(noon(2024, 1, 20))));

    assert!(ledger.bank_statement().is_none());
    assert_eq!(ledger.reconciliation_status().await.unwrap().bank_unmatched, 7);

    let first_import = ledger
        .import_bank_statement(vec![BankRecord::new(
            date(2024, 1, 15),
            dec("140.00"),
            "Grocery".to_string(),
            TransactionType::Expense,
        )])
        .id;

    let second = ledger.import_bank_statement(vec![
        BankRecord::new(
            date(2024, 1, 15),
            dec("150"),
            "Grocery".to_string(),
            TransactionType::Expense,
        ),
        BankRecord::new(
            date(2024, 1, 2),
            dec("900.00"),
            "STANDING ORDER".to_string(),
            TransactionType::Expense,
        ),
    ]);
    assert_ne!(second.id, first_import);
    assert_eq!(ledger.bank_records().len(), 2);

    let run = ledger.reconcile().await.unwrap();
    assert_eq!(run.outcome.matched_count, 2);
    assert!(run.discrepancies.is_empty());

    // Confirmation is a separate, user-driven state
    let confirmed = ledger.confirm_match(1).await.unwrap();
    assert!(confirmed.matched);
    let status = ledger.reconciliation_status().await.unwrap();
    assert_eq!(status.confirmed, 2);
    assert_eq!(status.unconfirmed, 5);

    assert!(matches!(
        ledger.confirm_match(404).await,
        Err(LedgerError::TransactionNotFound(404))
    ));
}

#[tokio::test]
async fn test_ledger_reports_and_export() {
    let config = EngineConfig::from_toml_str("top_category_count = 2").unwrap();
    let mut ledger = Ledger::new(MemoryStorage::with_transactions(household()))
        .with_clock(Box::new(FixedClock(noon(2024, 1, 20))))
        .with_config(config);

    let first = ledger.generate_report(Period::Month).await.unwrap();
    let second = ledger.generate_report(Period::Year).await.unwrap();
    assert_eq!((first.id, second.id), (1, 2));
    assert_eq!(first.top_categories, vec!["Housing", "Food"]);
    assert_eq!(ledger.list_reports().await.unwrap().len(), 2);

    let export = ledger.export_report(1).await.unwrap();
    assert_eq!(export.file_name, "finance_report_1-20-2024.json");
    assert_eq!(Report::from_json(&export.contents).unwrap(), first);

    assert!(matches!(
        ledger.export_report(3).await,
        Err(LedgerError::ReportNotFound(3))
    ));
}

#[tokio::test]
async fn test_recording_goes_through_validation() {
    let mut ledger = Ledger::with_validator(MemoryStorage::new(), Box::new(EnhancedTransactionValidator))
        .with_clock(Box::new(FixedClock(noon(2024, 1, 20))));

    let id = ledger.next_transaction_id().await.unwrap();
    let coffee = TransactionBuilder::new(id, date(2024, 1, 20), "Coffee".to_string(), TransactionType::Expense)
        .amount(dec("3.80"))
        .category("Food".to_string())
        .build()
        .unwrap();
    ledger.record_transaction(coffee.clone()).await.unwrap();

    assert!(matches!(
        ledger.record_transaction(coffee).await,
        Err(LedgerError::DuplicateTransaction(1))
    ));

    let yacht = TransactionBuilder::new(2, date(2024, 1, 20), "Yacht".to_string(), TransactionType::Expense)
        .amount(dec("1000000"))
        .category("Leisure".to_string())
        .build()
        .unwrap();
    assert!(matches!(
        ledger.record_transaction(yacht).await,
        Err(LedgerError::Validation(_))
    ));

    let today = ledger.summary(Period::Day).await.unwrap();
    assert_eq!(today.expenses, dec("3.80"));

    let found = ledger
        .search(&TransactionQuery::new("coff", TypeFilter::Expense), Period::Week)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_ledger_trend_and_breakdown() {
    let ledger = Ledger::new(MemoryStorage::with_transactions(household()))
        .with_clock(Box::new(FixedClock(noon(2024, 1, 20))));

    let trend = ledger.monthly_trend().await.unwrap();
    let months: Vec<(i32, u32)> = trend.iter().map(|m| (m.year, m.month)).collect();
    assert_eq!(months, vec![(2023, 6), (2023, 12), (2024, 1)]);
    assert_eq!(trend[2].income, dec("2000"));

    let breakdown = ledger.category_breakdown().await.unwrap();
    assert_eq!(breakdown.top(1), vec!["Housing"]);
}
