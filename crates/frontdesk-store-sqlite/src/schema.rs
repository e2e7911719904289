//! SQL schema for the Frontdesk SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS documents (
    document_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    content     TEXT NOT NULL,    -- data URI payload; immutable after insert
    created_at  TEXT NOT NULL     -- ISO 8601 UTC
);

-- Exactly one row; identity is pinned to 1 and never deleted.
CREATE TABLE IF NOT EXISTS company_settings (
    settings_id INTEGER PRIMARY KEY CHECK (settings_id = 1),
    address     TEXT NOT NULL,
    logo        TEXT,              -- image data URI or NULL
    updated_at  TEXT NOT NULL
);

-- Check-in records are written once and never updated.
-- accepted_documents is a historical snapshot; deleting a document later
-- does not rewrite it.
CREATE TABLE IF NOT EXISTS checkins (
    record_id          TEXT PRIMARY KEY,
    first_name         TEXT NOT NULL,
    last_name          TEXT NOT NULL,
    company            TEXT NOT NULL,
    visit_reason       TEXT NOT NULL DEFAULT '',
    visit_date         TEXT NOT NULL,           -- calendar date, YYYY-MM-DD
    visit_time         TEXT,                    -- bare HH:MM, independent of visit_date
    accepted_documents TEXT NOT NULL DEFAULT '[]',  -- JSON array of document ids
    accepted_rules     INTEGER NOT NULL,
    submitted_at       TEXT NOT NULL,           -- ISO 8601 UTC instant
    timezone           TEXT NOT NULL,           -- IANA zone label
    report_pdf         TEXT                     -- PDF data URI or NULL
);

CREATE INDEX IF NOT EXISTS documents_created_idx  ON documents(created_at);
CREATE INDEX IF NOT EXISTS checkins_submitted_idx ON checkins(submitted_at);

PRAGMA user_version = 1;
";
