pub mod db;
pub mod error;
pub mod matcher;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

pub use matcher::BreachMatcher;

/// A single connection to the breach-record database.
///
/// The connection closes when the store is dropped.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens an existing breach database without write access.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    /// Opens or creates a writable database; pair with [`Store::migrate`] to
    /// seed records.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = db::create(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn records(&self) -> repo::RecordsRepo<'_> {
        repo::RecordsRepo::new(&self.conn)
    }

    pub fn matcher(&self) -> BreachMatcher<'_> {
        BreachMatcher::new(self.records())
    }
}
