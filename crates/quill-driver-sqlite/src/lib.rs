mod value;
pub(crate) use value::Value;

use quill_core::{
    driver::{Capability, Transaction},
    schema::ColumnSpec,
    stmt::{self, Row},
    Error, Result,
};
use quill_sql::{self as sql, Serializer};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

/// Counter table backing emulated sequences.
const SEQUENCES_TABLE: &str = "__quill_sequences";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    /// Opens a connection. Every in-memory connection is a fresh database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        let sqlite = Self { connection };
        Ok(sqlite)
    }

    fn serializer(&self) -> Serializer {
        Serializer::for_capability(&Capability::SQLITE)
    }

    fn execute_ddl(&mut self, stmt: sql::Statement) -> Result<()> {
        let mut params: Vec<stmt::Value> = vec![];
        let sql = self.serializer().serialize(&stmt, &mut params);
        debug_assert!(params.is_empty());

        tracing::debug!(sql = %sql, "executing DDL");

        self.connection
            .execute(&sql, [])
            .map_err(Error::driver_operation_failed)?;
        Ok(())
    }
}

impl quill_core::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    fn query(&mut self, sql: &str, params: &[stmt::Value]) -> Result<Vec<Row>> {
        let mut stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(Error::driver_operation_failed)?;

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let params = params.iter().cloned().map(Value::from);

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params))
            .map_err(Error::driver_operation_failed)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut record = Row::with_capacity(columns.len());

                    for (index, column) in columns.iter().enumerate() {
                        let value =
                            Value::from_sql(row, index).map_err(Error::driver_operation_failed)?;
                        record.insert(column.clone(), value.into_inner());
                    }

                    ret.push(record);
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(Error::driver_operation_failed(err));
                }
            }
        }

        Ok(ret)
    }

    fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<u64> {
        let mut stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(Error::driver_operation_failed)?;

        let params = params.iter().cloned().map(Value::from);

        let count = stmt
            .execute(rusqlite::params_from_iter(params))
            .map_err(Error::driver_operation_failed)?;

        Ok(count as u64)
    }

    fn query_scalar(&mut self, sql: &str) -> Result<stmt::Value> {
        let value = self
            .connection
            .query_row(sql, [], |row| Value::from_sql(row, 0))
            .map_err(Error::driver_operation_failed)?;

        Ok(value.into_inner())
    }

    fn next_sequence_value(&mut self, sequence: &str) -> Result<i64> {
        self.connection
            .execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {SEQUENCES_TABLE} (
                name TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            )"
                ),
                [],
            )
            .map_err(Error::driver_operation_failed)?;

        let value: i64 = self
            .connection
            .query_row(
                &format!(
                    "INSERT INTO {SEQUENCES_TABLE} (name, value) VALUES (?1, 1) \
                     ON CONFLICT (name) DO UPDATE SET value = value + 1 \
                     RETURNING value"
                ),
                [sequence],
                |row| row.get(0),
            )
            .map_err(Error::driver_operation_failed)?;

        tracing::trace!(sequence, value, "sequence advanced");
        Ok(value)
    }

    fn transaction(&mut self, op: Transaction) -> Result<()> {
        let sql = self.serializer().serialize_transaction(op);

        tracing::debug!(sql = %sql, "transaction");

        self.connection
            .execute(&sql, [])
            .map_err(Error::driver_operation_failed)?;
        Ok(())
    }

    fn create_table(&mut self, table: &str, columns: &ColumnSpec) -> Result<()> {
        self.execute_ddl(sql::Statement::create_table(table, columns.clone()))
    }

    fn drop_table(&mut self, table: &str) -> Result<()> {
        self.execute_ddl(sql::Statement::drop_table_if_exists(table))
    }
}
