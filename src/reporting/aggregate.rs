//! Income/expense aggregation over transaction sets

use bigdecimal::BigDecimal;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::types::{Summary, Transaction, TransactionType};

/// Default label for expenses without a category
pub const FALLBACK_CATEGORY: &str = "Other";

/// Total income, total expenses and their difference
///
/// Missing or non-numeric amounts contribute zero.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut income = BigDecimal::from(0);
    let mut expenses = BigDecimal::from(0);

    for transaction in transactions {
        if transaction.amount.is_none() {
            tracing::debug!(
                transaction_id = transaction.id,
                "Counting transaction without a numeric amount as zero"
            );
        }
        match transaction.transaction_type {
            TransactionType::Income => income += transaction.amount_or_zero(),
            TransactionType::Expense => expenses += transaction.amount_or_zero(),
        }
    }

    let balance = &income - &expenses;
    Summary {
        income,
        expenses,
        balance,
    }
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: BigDecimal,
}

/// Expense totals per category, in the order categories were first seen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    /// Entries in first-encountered order
    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total for a category, if any expense was recorded under it
    pub fn get(&self, category: &str) -> Option<&BigDecimal> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| &e.total)
    }

    /// Sum over all categories
    pub fn total(&self) -> BigDecimal {
        self.entries.iter().map(|e| &e.total).sum()
    }

    /// Entries by total, largest first; equal totals keep first-encountered order
    pub fn sorted_by_total(&self) -> Vec<CategoryTotal> {
        let mut sorted = self.entries.clone();
        // sort_by is stable
        sorted.sort_by(|a, b| b.total.cmp(&a.total));
        sorted
    }

    /// Names of the `limit` largest categories
    pub fn top(&self, limit: usize) -> Vec<String> {
        self.sorted_by_total()
            .into_iter()
            .take(limit)
            .map(|e| e.category)
            .collect()
    }
}

/// Expense totals per category, bucketing uncategorised expenses under "Other"
pub fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    category_breakdown_with_fallback(transactions, FALLBACK_CATEGORY)
}

/// Expense totals per category with a custom label for uncategorised expenses
pub fn category_breakdown_with_fallback(
    transactions: &[Transaction],
    fallback: &str,
) -> CategoryBreakdown {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        let category = match transaction.category.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => fallback,
        };

        match positions.get(category).copied() {
            Some(index) => entries[index].total += transaction.amount_or_zero(),
            None => {
                positions.insert(category.to_string(), entries.len());
                entries.push(CategoryTotal {
                    category: category.to_string(),
                    total: transaction.amount_or_zero(),
                });
            }
        }
    }

    CategoryBreakdown { entries }
}

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub year: i32,
    pub month: u32,
    pub income: BigDecimal,
    pub expenses: BigDecimal,
}

impl MonthlyTotals {
    /// Short label such as "Jan 24"
    pub fn label(&self) -> String {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }

    pub fn net(&self) -> BigDecimal {
        &self.income - &self.expenses
    }
}

/// Per-month income and expense totals, oldest month first
pub fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<(i32, u32), MonthlyTotals> = BTreeMap::new();

    for transaction in transactions {
        let key = (transaction.date.year(), transaction.date.month());
        let totals = months.entry(key).or_insert_with(|| MonthlyTotals {
            year: key.0,
            month: key.1,
            income: BigDecimal::from(0),
            expenses: BigDecimal::from(0),
        });

        match transaction.transaction_type {
            TransactionType::Income => totals.income += transaction.amount_or_zero(),
            TransactionType::Expense => totals.expenses += transaction.amount_or_zero(),
        }
    }

    months.into_values().collect()
}
