//! Store module
//!
//! Data-access layer over SQLite. Each domain lives in its own file with an
//! `impl Store` block; the dispatch layer depends only on these operation
//! signatures, never on the SQL behind them.
//!
//! There is no pool and no shared connection: every operation acquires its
//! own connection and releases it on drop, on success and error paths alike.

mod animals;
mod customers;
mod employees;
mod entries;
mod locations;
mod moods;
mod schema;

pub use animals::{Animal, AnimalPayload};
pub use customers::{Customer, CustomerPayload};
pub use employees::{Employee, EmployeePayload};
pub use entries::{Entry, EntryPayload};
pub use locations::{Location, LocationPayload};
pub use moods::Mood;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use std::path::Path;

/// Handle to the on-disk store. Cheap to clone; holds connect options only.
#[derive(Debug, Clone)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    /// Point the store at a database file, created on first connect if absent
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            options: SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
        }
    }

    /// Scoped connection for a single operation
    pub(crate) async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// Create tables and seed reference data; run once at startup
    pub async fn bootstrap(&self) -> Result<(), sqlx::Error> {
        schema::ensure(self).await
    }
}
