use std::path::Path;

use diesel::connection::{Connection, SimpleConnection};
use diesel::sqlite::SqliteConnection;
use log::debug;

use crate::errors::{IntoCore, StorageError};
use market_pulse_core::errors::Result;

/// Opens a read-only connection to the analytic store at `db_path`.
///
/// The file must already exist; a missing file is a connection failure, not
/// an empty database. The caller owns the connection and drops it when done.
pub fn open_read_only(db_path: &Path) -> Result<SqliteConnection> {
    let uri = read_only_uri(db_path);
    debug!("Opening analytic store {}", uri);
    let mut conn = SqliteConnection::establish(&uri).into_core()?;
    conn.batch_execute("PRAGMA query_only = ON; PRAGMA busy_timeout = 5000;")
        .map_err(StorageError::from)?;
    Ok(conn)
}

fn read_only_uri(db_path: &Path) -> String {
    let escaped = db_path
        .to_string_lossy()
        .replace('%', "%25")
        .replace('?', "%3f")
        .replace('#', "%23");
    format!("file:{}?mode=ro", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_escapes_query_characters() {
        assert_eq!(
            read_only_uri(Path::new("/data/odd?#%.db")),
            "file:/data/odd%3f%23%25.db?mode=ro"
        );
    }

    #[test]
    fn missing_file_is_a_connection_failure() {
        let dir = tempfile::tempdir().unwrap();
        let Err(err) = open_read_only(&dir.path().join("absent.db")) else {
            panic!("opening a missing store should fail");
        };
        assert!(err.is_unavailable(), "unexpected error: {err}");
        assert!(!dir.path().join("absent.db").exists());
    }

    #[test]
    fn connection_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.db");
        rusqlite::Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (x INTEGER);")
            .unwrap();

        let mut conn = open_read_only(&path).unwrap();
        assert!(conn.batch_execute("INSERT INTO t VALUES (1);").is_err());
    }
}
