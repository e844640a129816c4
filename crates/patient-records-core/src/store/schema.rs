//! SQLite schema definition.

/// Key-value table backing [`super::SqliteStore`].
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                         -- JSON payload
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
