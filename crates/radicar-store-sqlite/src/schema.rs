//! SQL schema for the radicar SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per tracked case. Structured sub-records (requester, location,
-- visit) are stored as JSON; rowid order doubles as insertion order.
CREATE TABLE IF NOT EXISTS cases (
    case_id        TEXT PRIMARY KEY,
    tracking_code  TEXT NOT NULL UNIQUE,
    created_at     TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    due_at         TEXT NOT NULL,
    closed_at      TEXT,
    case_type      TEXT NOT NULL,
    department     TEXT,
    status         TEXT NOT NULL,
    technician     TEXT,
    coordinator    TEXT,
    title          TEXT NOT NULL,
    description    TEXT NOT NULL,
    requester      TEXT NOT NULL,   -- JSON
    location       TEXT NOT NULL,   -- JSON
    visit          TEXT             -- JSON; NULL until a visit is recorded
);

-- Named monotonic counters. 'tracking_sequence' numbers tracking codes;
-- values survive restarts and never repeat.
CREATE TABLE IF NOT EXISTS counters (
    name  TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);
INSERT OR IGNORE INTO counters (name, value) VALUES ('tracking_sequence', 0);

CREATE INDEX IF NOT EXISTS cases_department_idx ON cases(department);
CREATE INDEX IF NOT EXISTS cases_status_idx     ON cases(status);

PRAGMA user_version = 1;
";
