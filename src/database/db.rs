//! SQLite storage for the application
//!
//! A single `app_state` key/value table holds the serialized review state, the
//! learner's progress and the simulated current date.

use super::store::KeyValueStore;
use crate::error::{AtlasError, Result};
use crate::models::calendar::{Clock, add_days, format_iso_date, parse_iso_date};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};

const CURRENT_DATE_KEY: &str = "current_date";

/// Opens (or creates) the database file and makes sure the schema exists.
///
/// Sets the simulated current date to today if not already initialized.
pub fn init_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Same as `init_database` but without a backing file.
pub fn init_in_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    let today = format_iso_date(Local::now().date_naive());
    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES (?1, ?2)",
        params![CURRENT_DATE_KEY, today],
    )?;

    Ok(())
}

pub fn get_value(key: &str, conn: &Connection) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set_value(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Retrieves the simulated current date
pub fn get_current_date(conn: &Connection) -> Result<NaiveDate> {
    let value = get_value(CURRENT_DATE_KEY, conn)?
        .ok_or_else(|| AtlasError::InvalidDate(String::new()))?;
    parse_iso_date(&value)
}

/// Advances the simulated date by one day (for trying out scheduling)
pub fn advance_day(conn: &Connection) -> Result<NaiveDate> {
    let next_day = add_days(get_current_date(conn)?, 1);
    set_value(CURRENT_DATE_KEY, &format_iso_date(next_day), conn)?;
    Ok(next_day)
}

/// Shared handle to the database, usable as both store and clock.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_connection(init_database(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(init_in_memory_database()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn current_date(&self) -> Result<NaiveDate> {
        let conn = self.conn.lock().map_err(|_| AtlasError::LockPoisoned)?;
        get_current_date(&conn)
    }

    pub fn advance_day(&self) -> Result<NaiveDate> {
        let conn = self.conn.lock().map_err(|_| AtlasError::LockPoisoned)?;
        advance_day(&conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().map_err(|_| AtlasError::LockPoisoned)?;
        get_value(key, &conn)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| AtlasError::LockPoisoned)?;
        set_value(key, value, &conn)
    }
}

impl Clock for Database {
    fn today(&self) -> NaiveDate {
        self.current_date().unwrap_or_else(|e| {
            log::warn!("Could not read simulated date, using system date: {}", e);
            Local::now().date_naive()
        })
    }
}
