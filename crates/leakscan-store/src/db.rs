use crate::error::{Result, StoreError};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Opens an existing breach database read-only. A missing file is an error
/// rather than an empty database that would silently match nothing.
pub fn open(path: &Path) -> Result<Connection> {
    if !path.is_file() {
        return Err(StoreError::MissingDatabase(path.to_path_buf()));
    }
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

/// Opens or creates a writable database, used for seeding records.
pub fn create(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "busy_timeout", 2000)?;
    Ok(())
}
