use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::error::DbError;
use crate::schema::Table;
use crate::table::ResultTable;

pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open (creating if needed) the database file. Failing here is a failed login.
    pub fn open(path: &Path, settings: &DatabaseConfig) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(settings.busy_timeout_ms))?;
        conn.pragma_update(None, "foreign_keys", settings.foreign_keys)?;

        // Reading the catalog fails fast on files that are not databases.
        let objects: i64 = conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get(0))?;
        info!(path = %path.display(), objects, "database connection established");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run one DDL/DML statement. Outside `begin`/`commit` it commits on its own;
    /// inside an open transaction a failure rolls that transaction back.
    pub fn execute_update<P: Params>(&self, sql: &str, params: P) -> Result<usize, DbError> {
        debug!(sql, "execute");
        match self.conn.execute(sql, params) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                if self.in_transaction() {
                    warn!(sql, error = %e, "statement failed, rolling back");
                    self.rollback()?;
                }
                Err(e.into())
            }
        }
    }

    pub fn query<P: Params>(&self, sql: &str, params: P) -> Result<ResultTable, DbError> {
        debug!(sql, "query");
        query_table(&self.conn, sql, params)
    }

    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    pub fn begin(&self) -> Result<(), DbError> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    /// No-op when no transaction is open.
    pub fn commit(&self) -> Result<(), DbError> {
        if self.in_transaction() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    /// No-op when no transaction is open.
    pub fn rollback(&self) -> Result<(), DbError> {
        if self.in_transaction() {
            self.conn.execute_batch("ROLLBACK")?;
        }
        Ok(())
    }

    /// Run `work` inside one transaction: commit on `Ok`, roll back on `Err`.
    pub fn transaction<T>(
        &self,
        work: impl FnOnce(&Connection) -> Result<T, DbError>,
    ) -> Result<T, DbError> {
        let tx = self.conn.unchecked_transaction()?;
        match work(&tx) {
            Ok(value) => {
                tx.commit()?;
                debug!("transaction committed");
                Ok(value)
            }
            Err(e) => {
                tx.rollback()?;
                warn!(error = %e, "transaction rolled back");
                Err(e)
            }
        }
    }

    /// Execute `statements` in order inside one transaction. The first failure
    /// rolls everything back and names the statement that failed.
    pub fn run_batch(&self, statements: &[&str]) -> Result<usize, DbError> {
        self.transaction(|conn| {
            for (index, sql) in statements.iter().enumerate() {
                execute_step(conn, index, sql)?;
            }
            Ok(statements.len())
        })
    }

    pub fn table_exists(&self, name: &str) -> Result<bool, DbError> {
        table_exists(&self.conn, name)
    }

    /// `MAX(pk) + 1`, or 1 for an empty table.
    pub fn next_id(&self, table: Table) -> Result<i64, DbError> {
        let sql = format!(
            "SELECT COALESCE(MAX({}), 0) + 1 FROM {}",
            table.primary_key(),
            table.name()
        );
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    pub fn ensure_initialized(&self) -> Result<(), DbError> {
        for table in Table::ALL {
            if !self.table_exists(table.name())? {
                return Err(DbError::NotInitialized);
            }
        }
        Ok(())
    }

    pub fn close(self) -> Result<(), DbError> {
        self.conn.close().map_err(|(_, e)| DbError::Sqlite(e))?;
        debug!("database connection closed");
        Ok(())
    }
}

pub(crate) fn execute_step(conn: &Connection, index: usize, sql: &str) -> Result<usize, DbError> {
    debug!(index, sql, "batch statement");
    conn.execute(sql, []).map_err(|source| {
        warn!(index, sql, error = %source, "batch statement failed");
        DbError::Batch {
            index,
            statement: sql.to_string(),
            source,
        }
    })
}

pub(crate) fn query_table<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<ResultTable, DbError> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let rows = stmt
        .query_map(params, |row| {
            (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultTable { columns, rows })
}

pub(crate) fn table_exists(conn: &Connection, name: &str) -> Result<bool, DbError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND LOWER(name) = LOWER(?1)",
            [name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn is_table_empty(conn: &Connection, table: Table) -> Result<bool, DbError> {
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(count == 0)
}
