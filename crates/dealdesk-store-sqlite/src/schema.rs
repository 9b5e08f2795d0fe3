//! SQL schema for the Dealdesk SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps ids monotonically increasing and never reused, so a
/// deleted deal's id stays unresolvable forever. Timestamps are ISO 8601 UTC
/// strings; `value` is the exact decimal rendering (two places), never a
/// float.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS deals (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT NOT NULL,
    description         TEXT NOT NULL DEFAULT '',
    status              TEXT NOT NULL DEFAULT 'active',  -- 'active' | 'inactive' | 'archived'
    assigned_to_user_id INTEGER NOT NULL,
    value               TEXT NOT NULL,
    creation_date       TEXT NOT NULL,
    last_updated        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS deals_status_idx   ON deals(status);
CREATE INDEX IF NOT EXISTS deals_assignee_idx ON deals(assigned_to_user_id);

PRAGMA user_version = 1;
";
