//! Financial report generation and the append-only report log

use chrono::NaiveDateTime;
use std::fmt::Write;

use crate::config::EngineConfig;
use crate::reconciliation::find_discrepancies;
use crate::reporting::aggregate::{category_breakdown_with_fallback, summarize};
use crate::reporting::period::filter_by_period;
use crate::types::*;

/// Builds reports from ledger snapshots
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: EngineConfig,
}

impl ReportGenerator {
    /// Create a new report generator
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snapshot the ledger into a report
    ///
    /// Totals cover `period` as seen from `generated_at`. Top categories are
    /// ranked over the whole ledger. The ID continues the numbering of
    /// `existing_reports`. Inputs are left untouched.
    pub fn generate(
        &self,
        transactions: &[Transaction],
        bank_records: &[BankRecord],
        period: Period,
        existing_reports: &[Report],
        generated_at: NaiveDateTime,
    ) -> Report {
        let in_period = filter_by_period(transactions, period, generated_at.date());
        let summary = summarize(&in_period);
        let top_categories =
            category_breakdown_with_fallback(transactions, &self.config.fallback_category)
                .top(self.config.top_category_count);
        let discrepancy_count = find_discrepancies(transactions, bank_records).len();

        let report = Report {
            id: existing_reports.len() as u64 + 1,
            date: self.display_date(generated_at),
            generated_at,
            period,
            income: summary.income,
            expenses: summary.expenses,
            balance: summary.balance,
            top_categories,
            discrepancy_count,
        };

        tracing::info!(
            report_id = report.id,
            period = %period,
            transactions = in_period.len(),
            "Generated financial report"
        );

        report
    }

    /// Format with the configured pattern, falling back to ISO dates if the pattern is invalid
    fn display_date(&self, generated_at: NaiveDateTime) -> String {
        let mut text = String::new();
        match write!(text, "{}", generated_at.format(&self.config.report_date_format)) {
            Ok(()) => text,
            Err(_) => {
                tracing::warn!(
                    format = %self.config.report_date_format,
                    "Invalid report date format, using ISO date"
                );
                generated_at.format("%Y-%m-%d").to_string()
            }
        }
    }
}

/// Append-only collection of generated reports
#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    reports: Vec<Report>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a report numbered after the ones already logged, append it and return it
    pub fn generate(
        &mut self,
        generator: &ReportGenerator,
        transactions: &[Transaction],
        bank_records: &[BankRecord],
        period: Period,
        generated_at: NaiveDateTime,
    ) -> Report {
        let report = generator.generate(
            transactions,
            bank_records,
            period,
            &self.reports,
            generated_at,
        );
        self.reports.push(report.clone());
        report
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn latest(&self) -> Option<&Report> {
        self.reports.last()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl Report {
    /// File name for exporting this report, e.g. `finance_report_1-20-2024.json`
    pub fn export_file_name(&self, prefix: &str) -> String {
        format!("{}_{}.json", prefix, self.date.replace('/', "-"))
    }

    /// Pretty-printed JSON for export
    pub fn to_json_pretty(&self) -> LedgerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Read back an exported report
    pub fn from_json(text: &str) -> LedgerResult<Self> {
        serde_json::from_str(text).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}
