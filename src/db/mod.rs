mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;

use crate::models::{amount, Expense, MonthKey};

/// Typed access to the persisted ledger fields, one method per field.
///
/// Reads never fail on malformed stored data: the expense list falls back to
/// empty and scalars fall back to absent. Writes are durable on return.
pub(crate) trait LedgerStore {
    fn expenses(&self, month: MonthKey) -> Result<Vec<Expense>>;
    fn set_expenses(&mut self, month: MonthKey, expenses: &[Expense]) -> Result<()>;

    fn starting_balance(&self, month: MonthKey) -> Result<Option<Decimal>>;
    fn set_starting_balance(&mut self, month: MonthKey, value: Decimal) -> Result<()>;

    fn starting_initial(&self, month: MonthKey) -> Result<Option<Decimal>>;
    fn set_starting_initial(&mut self, month: MonthKey, value: Decimal) -> Result<()>;

    fn rollover_asked(&self, month: MonthKey) -> Result<bool>;
    fn mark_rollover_asked(&mut self, month: MonthKey) -> Result<()>;

    fn is_initialized(&self) -> Result<bool>;
    fn mark_initialized(&mut self) -> Result<()>;
}

/// SQLite file holding a single key-value table.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw key-value access ──────────────────────────────────

    pub(crate) fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("Failed to read '{key}'"))?;
        Ok(value)
    }

    pub(crate) fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, value],
            )
            .with_context(|| format!("Failed to write '{key}'"))?;
        Ok(())
    }

    fn get_decimal(&self, key: &str) -> Result<Option<Decimal>> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        let value = amount::normalize(Some(&raw));
        if value.is_none() {
            tracing::warn!(key, raw = %raw, "ignoring unparseable stored amount");
        }
        Ok(value)
    }

    fn get_flag(&self, key: &str) -> Result<bool> {
        Ok(self.get_raw(key)?.as_deref() == Some(schema::FLAG_SET))
    }

    // ── Export ────────────────────────────────────────────────

    /// Write the month's expenses as CSV. Returns the number of rows written.
    pub(crate) fn export_to_csv(&self, path: &Path, month: MonthKey) -> Result<usize> {
        let expenses = self.expenses(month)?;
        if expenses.is_empty() {
            return Ok(0);
        }

        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        wtr.write_record(["id", "date", "category", "amount", "details"])?;
        for e in &expenses {
            let amount = e.amount.to_string();
            wtr.write_record([
                e.id.as_str(),
                e.date.as_str(),
                e.category_label(),
                amount.as_str(),
                e.detail_text(),
            ])?;
        }
        wtr.flush()?;
        tracing::info!(%month, rows = expenses.len(), path = %path.display(), "exported expenses");
        Ok(expenses.len())
    }
}

impl LedgerStore for Database {
    fn expenses(&self, month: MonthKey) -> Result<Vec<Expense>> {
        let key = schema::expenses_key(month);
        let Some(raw) = self.get_raw(&key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Expense>>(&raw) {
            Ok(list) => Ok(list),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "stored expense list is corrupt; using empty list");
                Ok(Vec::new())
            }
        }
    }

    fn set_expenses(&mut self, month: MonthKey, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string(expenses).context("Failed to serialize expenses")?;
        self.put_raw(&schema::expenses_key(month), &json)
    }

    fn starting_balance(&self, month: MonthKey) -> Result<Option<Decimal>> {
        self.get_decimal(&schema::starting_balance_key(month))
    }

    fn set_starting_balance(&mut self, month: MonthKey, value: Decimal) -> Result<()> {
        self.put_raw(&schema::starting_balance_key(month), &value.to_string())
    }

    fn starting_initial(&self, month: MonthKey) -> Result<Option<Decimal>> {
        self.get_decimal(&schema::starting_initial_key(month))
    }

    fn set_starting_initial(&mut self, month: MonthKey, value: Decimal) -> Result<()> {
        self.put_raw(&schema::starting_initial_key(month), &value.to_string())
    }

    fn rollover_asked(&self, month: MonthKey) -> Result<bool> {
        self.get_flag(&schema::rollover_key(month))
    }

    fn mark_rollover_asked(&mut self, month: MonthKey) -> Result<()> {
        self.put_raw(&schema::rollover_key(month), schema::FLAG_SET)
    }

    fn is_initialized(&self) -> Result<bool> {
        self.get_flag(schema::APP_INITIALIZED)
    }

    fn mark_initialized(&mut self) -> Result<()> {
        self.put_raw(schema::APP_INITIALIZED, schema::FLAG_SET)
    }
}
