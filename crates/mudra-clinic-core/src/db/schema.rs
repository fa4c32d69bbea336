//! SQLite schema definition.

/// Schema for the on-disk local storage.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Local Storage (string key/value, one row per key)
-- ============================================================================

CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
