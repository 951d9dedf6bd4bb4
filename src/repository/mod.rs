use std::path::Path;

use rusqlite::{Connection, OpenFlags, Result};

/// opens a new connection to the sqlite database at `location`.
/// Callers are in charge of closing the connection
pub fn open_connection(location: &str) -> Result<Connection> {
    Connection::open_with_flags(Path::new(location), OpenFlags::default())
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<()> {
    let sql = include_str!("../assets/init.sql");
    con.execute_batch(sql)
}

/// makes sure every table the document collection and identity store need exists.
/// Safe to call on an already-initialized database
pub fn initialize_db(location: &str) -> Result<()> {
    let con = open_connection(location)?;
    create_db(&con)?;
    if let Err((_, e)) = con.close() {
        log::warn!("Failed to close connection after initializing {location}: {e:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{cleanup, test_db_location};

    #[test]
    fn initialize_db_is_repeatable() {
        cleanup();
        let location = test_db_location();
        initialize_db(&location).unwrap();
        initialize_db(&location).unwrap();
        let con = open_connection(&location).unwrap();
        let tables: i64 = con
            .query_row(
                "select count(*) from sqlite_master where type = 'table' and name in ('documents', 'identities')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(2, tables);
        con.close().unwrap();
        cleanup();
    }
}
