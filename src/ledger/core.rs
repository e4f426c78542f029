//! Main ledger orchestrator that coordinates transactions, bank data and reports

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::ledger::TransactionManager;
use crate::reconciliation::{ReconciliationEngine, ReconciliationRun, ReconciliationStatus};
use crate::reporting::{
    category_breakdown_with_fallback, filter_by_period, monthly_trend, summarize,
    CategoryBreakdown, MonthlyTotals, ReportGenerator, TransactionQuery,
};
use crate::traits::*;
use crate::types::*;

/// Main ledger system that owns the state around the pure engine
///
/// Transactions and reports live in storage. The bank statement of the last
/// completed import is held for the session and replaced on every import.
pub struct Ledger<S: LedgerStorage> {
    transaction_manager: TransactionManager<S>,
    clock: Box<dyn Clock>,
    generator: ReportGenerator,
    engine: ReconciliationEngine,
    bank_statement: Option<BankStatement>,
}

impl<S: LedgerStorage> Ledger<S> {
    /// Create a new ledger with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            transaction_manager: TransactionManager::new(storage),
            clock: Box::new(SystemClock),
            generator: ReportGenerator::default(),
            engine: ReconciliationEngine::new(),
            bank_statement: None,
        }
    }

    /// Create a new ledger with a custom transaction validator
    pub fn with_validator(storage: S, transaction_validator: Box<dyn TransactionValidator>) -> Self {
        Self {
            transaction_manager: TransactionManager::with_validator(storage, transaction_validator),
            clock: Box::new(SystemClock),
            generator: ReportGenerator::default(),
            engine: ReconciliationEngine::new(),
            bank_statement: None,
        }
    }

    /// Read "now" from the given clock instead of the system clock
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.generator = ReportGenerator::new(config);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        self.generator.config()
    }

    // Transaction operations
    /// Record a new transaction
    pub async fn record_transaction(&mut self, transaction: Transaction) -> LedgerResult<Transaction> {
        self.transaction_manager
            .record_transaction(transaction)
            .await
    }

    /// Next free transaction ID
    pub async fn next_transaction_id(&self) -> LedgerResult<TransactionId> {
        self.transaction_manager.next_transaction_id().await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> LedgerResult<Option<Transaction>> {
        self.transaction_manager
            .get_transaction(transaction_id)
            .await
    }

    /// List all transactions
    pub async fn list_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        self.transaction_manager.list_transactions().await
    }

    /// Mark a transaction as confirmed against the bank
    pub async fn confirm_match(&mut self, transaction_id: TransactionId) -> LedgerResult<Transaction> {
        self.transaction_manager.confirm_match(transaction_id).await
    }

    // Bank statement operations
    /// Replace the session's bank statement with freshly imported records
    pub fn import_bank_statement(&mut self, records: Vec<BankRecord>) -> &BankStatement {
        let statement = BankStatement::new(records, self.clock.now());
        tracing::info!(
            statement_id = %statement.id,
            records = statement.records.len(),
            replaced = self.bank_statement.is_some(),
            "Imported bank statement"
        );
        self.bank_statement.insert(statement)
    }

    /// Bank statement of the last completed import
    pub fn bank_statement(&self) -> Option<&BankStatement> {
        self.bank_statement.as_ref()
    }

    /// Records of the current bank statement; empty before the first import
    pub fn bank_records(&self) -> &[BankRecord] {
        self.bank_statement
            .as_ref()
            .map(|statement| statement.records.as_slice())
            .unwrap_or_default()
    }

    // Reconciliation operations
    /// Run both reconciliation passes against the current bank statement
    pub async fn reconcile(&self) -> LedgerResult<ReconciliationRun> {
        let transactions = self.list_transactions().await?;
        Ok(self.engine.run(&transactions, self.bank_records()))
    }

    /// Dashboard counters for the current ledger and bank statement
    pub async fn reconciliation_status(&self) -> LedgerResult<ReconciliationStatus> {
        Ok(self.reconcile().await?.status)
    }

    // Reporting operations
    /// Income, expense and balance for a period ending today
    pub async fn summary(&self, period: Period) -> LedgerResult<Summary> {
        let transactions = self.list_transactions().await?;
        let in_period = filter_by_period(&transactions, period, self.clock.now().date());
        Ok(summarize(&in_period))
    }

    /// Transactions inside a period
    pub async fn transactions_in_period(&self, period: Period) -> LedgerResult<Vec<Transaction>> {
        let transactions = self.list_transactions().await?;
        Ok(filter_by_period(&transactions, period, self.clock.now().date()))
    }

    /// Search transactions inside a period
    pub async fn search(
        &self,
        query: &TransactionQuery,
        period: Period,
    ) -> LedgerResult<Vec<Transaction>> {
        let in_period = self.transactions_in_period(period).await?;
        Ok(query.apply(&in_period))
    }

    /// Expense totals per category over the whole ledger
    pub async fn category_breakdown(&self) -> LedgerResult<CategoryBreakdown> {
        let transactions = self.list_transactions().await?;
        Ok(category_breakdown_with_fallback(
            &transactions,
            &self.config().fallback_category,
        ))
    }

    /// Per-month income and expense totals over the whole ledger
    pub async fn monthly_trend(&self) -> LedgerResult<Vec<MonthlyTotals>> {
        let transactions = self.list_transactions().await?;
        Ok(monthly_trend(&transactions))
    }

    /// Generate a report for a period and append it to the report log
    pub async fn generate_report(&mut self, period: Period) -> LedgerResult<Report> {
        let transactions = self.list_transactions().await?;
        let existing = self.transaction_manager.storage.list_reports().await?;
        let report = self.generator.generate(
            &transactions,
            self.bank_records(),
            period,
            &existing,
            self.clock.now(),
        );
        self.transaction_manager
            .storage
            .append_report(&report)
            .await?;
        Ok(report)
    }

    /// Reports in generation order
    pub async fn list_reports(&self) -> LedgerResult<Vec<Report>> {
        self.transaction_manager.storage.list_reports().await
    }

    /// File name and JSON body for downloading a report
    pub async fn export_report(&self, report_id: u64) -> LedgerResult<ReportExport> {
        let report = self
            .list_reports()
            .await?
            .into_iter()
            .find(|r| r.id == report_id)
            .ok_or(LedgerError::ReportNotFound(report_id))?;

        Ok(ReportExport {
            file_name: report.export_file_name(&self.config().export_file_prefix),
            contents: report.to_json_pretty()?,
        })
    }
}

/// Serialized report ready to be written by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportExport {
    pub file_name: String,
    pub contents: String,
}
