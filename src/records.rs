use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Row, params_from_iter};

use crate::db::Database;
use crate::error::DbError;
use crate::schema::Table;

/// A typed row of one table, columns in `Table::columns` order.
pub trait Record: Sized {
    const TABLE: Table;

    fn id(&self) -> i64;

    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    fn values(&self) -> Vec<Value>;
}

fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

impl Database {
    pub fn insert<R: Record>(&self, record: &R) -> Result<i64, DbError> {
        let table = R::TABLE;
        let columns = table.columns();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            columns.join(", "),
            placeholders(columns.len())
        );
        self.execute_update(&sql, params_from_iter(record.values()))?;
        Ok(record.id())
    }

    /// Rewrite every non-key column of the row with the record's primary key.
    pub fn update<R: Record>(&self, record: &R) -> Result<(), DbError> {
        let table = R::TABLE;
        let assignments: Vec<String> = table
            .columns()
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?1",
            table.name(),
            assignments.join(", "),
            table.primary_key()
        );
        let rows = self.execute_update(&sql, params_from_iter(record.values()))?;
        if rows == 0 {
            return Err(not_found(table, record.id()));
        }
        Ok(())
    }

    pub fn get<R: Record>(&self, id: i64) -> Result<Option<R>, DbError> {
        let table = R::TABLE;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            table.columns().join(", "),
            table.name(),
            table.primary_key()
        );
        Ok(self.conn().query_row(&sql, [id], R::from_row).optional()?)
    }

    pub fn fetch<R: Record>(&self, id: i64) -> Result<R, DbError> {
        self.get(id)?.ok_or_else(|| not_found(R::TABLE, id))
    }

    /// Records matching a `WHERE` fragment over the table's own columns.
    pub fn list_where<R: Record>(
        &self,
        filter: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<R>, DbError> {
        let table = R::TABLE;
        let sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            table.columns().join(", "),
            table.name(),
            filter,
            table.primary_key()
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params, R::from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete(&self, table: Table, id: i64) -> Result<(), DbError> {
        let sql = format!("DELETE FROM {} WHERE {} = ?1", table.name(), table.primary_key());
        let rows = self.execute_update(&sql, [id])?;
        if rows == 0 {
            return Err(not_found(table, id));
        }
        Ok(())
    }
}

fn not_found(table: Table, id: i64) -> DbError {
    DbError::NotFound {
        table: table.name(),
        key: table.primary_key(),
        id,
    }
}
