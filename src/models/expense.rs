use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::amount;

/// Label used for expenses whose stored category is missing or blank.
pub(crate) const UNKNOWN_CATEGORY: &str = "Unknown";

/// A single recorded expense. Immutable once created.
///
/// Stored records are read leniently: the amount goes through the numeric
/// normalizer (malformed values read as zero) and missing text fields read
/// as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Expense {
    #[serde(default, deserialize_with = "lenient_text")]
    pub(crate) id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub(crate) category: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub(crate) amount: Decimal,
    #[serde(default, deserialize_with = "lenient_text")]
    pub(crate) details: String,
    /// RFC 3339 creation instant.
    #[serde(default, deserialize_with = "lenient_text")]
    pub(crate) date: String,
}

impl Expense {
    /// New record with a fresh id, stamped with the current instant.
    /// Callers validate category and amount.
    pub(crate) fn new(category: String, amount: Decimal, details: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            amount,
            details,
            date: Utc::now().to_rfc3339(),
        }
    }

    pub(crate) fn category_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            UNKNOWN_CATEGORY
        } else {
            trimmed
        }
    }

    pub(crate) fn detail_text(&self) -> &str {
        self.details.trim()
    }

    pub(crate) fn has_details(&self) -> bool {
        !self.detail_text().is_empty()
    }

    /// Local calendar date of creation, or the raw stored value when it does
    /// not parse.
    pub(crate) fn date_label(&self) -> String {
        DateTime::parse_from_rfc3339(&self.date)
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount::from_json(&value, Decimal::ZERO))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
