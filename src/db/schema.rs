use crate::models::MonthKey;

pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

// ── Key layout ────────────────────────────────────────────────

pub(crate) const APP_INITIALIZED: &str = "appInitialized";

/// Stored value of every boolean flag.
pub(crate) const FLAG_SET: &str = "1";

pub(crate) fn expenses_key(month: MonthKey) -> String {
    format!("expenses_{month}")
}

pub(crate) fn starting_balance_key(month: MonthKey) -> String {
    format!("startingBalance_{month}")
}

pub(crate) fn starting_initial_key(month: MonthKey) -> String {
    format!("startingInitial_{month}")
}

pub(crate) fn rollover_key(month: MonthKey) -> String {
    format!("rollover_done_{month}")
}
