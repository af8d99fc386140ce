//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The analytics pipeline reads through the gateway traits, which
//! `AnalyticsStore` implements; it never executes SQL directly.

use crate::{
    config::StoreConfig,
    error::{AnalyticsError, AnalyticsResult},
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::time::Duration;

mod catalog;
mod roster;
mod schedule;
mod seed;

pub struct AnalyticsStore {
    conn: Connection,
}

impl AnalyticsStore {
    pub fn open(path: &str, config: &StoreConfig) -> AnalyticsResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> AnalyticsResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> AnalyticsResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_roster.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_batches.sql"))?;
        Ok(())
    }
}

/// Parse a stored date column. Anything after the first ten characters
/// (a time component) is ignored; only the calendar date matters here.
fn parse_stored_date(
    table: &'static str,
    column: &'static str,
    raw: &str,
) -> AnalyticsResult<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| AnalyticsError::InvalidRecord {
        table,
        column,
        value: raw.to_string(),
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
