use crate::error::Result;
use leakscan_core::domain::MatchRecord;
use rusqlite::{params, Connection};

/// A row of the `records` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachRecord {
    pub phone: String,
    pub username: String,
}

pub struct RecordsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> RecordsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns every record whose `phone` column equals `phone` exactly.
    /// A NULL identity is returned as an empty string.
    pub fn find_by_phone(&self, phone: &str) -> Result<Vec<MatchRecord>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT phone, username
             FROM records
             WHERE phone = ?1;",
        )?;
        let rows = stmt.query_map(params![phone], |row| {
            let identity: Option<String> = row.get(1)?;
            Ok(MatchRecord {
                queried_number: row.get(0)?,
                matched_identity: identity.unwrap_or_default(),
            })
        })?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    pub fn insert(&self, record: &BreachRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (phone, username) VALUES (?1, ?2);",
            params![record.phone, record.username],
        )?;
        Ok(())
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM records;", [], |row| row.get(0))?;
        Ok(count)
    }
}
