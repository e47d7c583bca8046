//! `SQLite` schema definitions for clientbook.
//!
//! This module contains the SQL statements for creating the client store.

/// Name of the table holding client records.
pub const CLIENTS_TABLE: &str = "clients";

/// SQL statement to create the clients table.
///
/// `AUTOINCREMENT` keeps ids monotonic across the life of the database: an id
/// freed by a delete is never handed out again.
pub const CREATE_CLIENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    company_code TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_CLIENTS_TABLE, CREATE_METADATA_TABLE];
