use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("statement {index} failed, rolled back: {source}\n  {statement}")]
    Batch {
        index: usize,
        statement: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("No {table} found with {key} = {id}")]
    NotFound {
        table: &'static str,
        key: &'static str,
        id: i64,
    },

    #[error("Logging in as {role} requires --id")]
    MissingIdentity { role: &'static str },

    #[error("Database not initialized. Run 'jobbank init' or 'jobbank admin create' first.")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
