//! Engine configuration

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::types::{LedgerError, LedgerResult};

/// Tunables for aggregation and report generation
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Label for expenses without a category
    pub fallback_category: String,
    /// How many categories a report lists
    pub top_category_count: usize,
    /// `chrono` format string for the report's display date
    pub report_date_format: String,
    /// Prefix of exported report file names
    pub export_file_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_category: "Other".to_string(),
            top_category_count: 3,
            report_date_format: "%-m/%-d/%Y".to_string(),
            export_file_prefix: "finance_report".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> LedgerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| LedgerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values make sense together
    pub fn validate(&self) -> LedgerResult<()> {
        if self.fallback_category.trim().is_empty() {
            return Err(LedgerError::Config(
                "fallback_category cannot be empty".to_string(),
            ));
        }

        if self.report_date_format.trim().is_empty() {
            return Err(LedgerError::Config(
                "report_date_format cannot be empty".to_string(),
            ));
        }

        if StrftimeItems::new(&self.report_date_format).any(|item| matches!(item, Item::Error)) {
            return Err(LedgerError::Config(format!(
                "report_date_format '{}' is not a valid date format",
                self.report_date_format
            )));
        }

        if self.export_file_prefix.contains('/') || self.export_file_prefix.contains('\\') {
            return Err(LedgerError::Config(
                "export_file_prefix cannot contain path separators".to_string(),
            ));
        }

        Ok(())
    }
}
