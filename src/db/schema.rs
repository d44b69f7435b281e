//! Database schema and migrations for filestash.
//!
//! Migrations are applied in order when the database is opened; the
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          TEXT PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- SHA-1 hex digest
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: file metadata
    r#"
CREATE TABLE files (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    name        TEXT NOT NULL,
    type        TEXT NOT NULL,           -- 'file', 'image', 'folder'
    is_public   INTEGER NOT NULL DEFAULT 0,
    parent_id   TEXT NOT NULL DEFAULT '0',  -- '0' is the storage root
    local_path  TEXT                     -- NULL for folders
);

CREATE INDEX idx_files_user_parent ON files(user_id, parent_id);
"#,
    // v3: sessions (key/value with expiry)
    r#"
CREATE TABLE sessions (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    expires_at  TEXT NOT NULL            -- 'YYYY-MM-DD HH:MM:SS' UTC
);

CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
];
