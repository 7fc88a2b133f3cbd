mod capability;
pub use capability::{Capability, Flavor};

use crate::{
    schema::ColumnSpec,
    stmt::{Row, Value},
    Result,
};

use std::fmt::Debug;

/// Transaction control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}

/// The database primitive consumed by the mapping engine.
///
/// Statements arrive fully serialized with positional parameters. Calls are
/// blocking and a connection serializes its own access.
pub trait Connection: Debug + Send {
    /// Describes the dialect the connection speaks.
    fn capability(&self) -> &'static Capability;

    /// Executes a statement that returns rows.
    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Executes a statement, returning the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64>;

    /// Executes a statement returning a single value, e.g. `COUNT(*)`.
    fn query_scalar(&mut self, sql: &str) -> Result<Value>;

    /// Returns the next value of the named sequence, creating it on first use.
    fn next_sequence_value(&mut self, sequence: &str) -> Result<i64>;

    fn transaction(&mut self, op: Transaction) -> Result<()>;

    /// Creates a table from its column spec.
    fn create_table(&mut self, table: &str, columns: &ColumnSpec) -> Result<()>;

    fn drop_table(&mut self, table: &str) -> Result<()>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn capability(&self) -> &'static Capability {
        (**self).capability()
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).query(sql, params)
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64> {
        (**self).execute(sql, params)
    }

    fn query_scalar(&mut self, sql: &str) -> Result<Value> {
        (**self).query_scalar(sql)
    }

    fn next_sequence_value(&mut self, sequence: &str) -> Result<i64> {
        (**self).next_sequence_value(sequence)
    }

    fn transaction(&mut self, op: Transaction) -> Result<()> {
        (**self).transaction(op)
    }

    fn create_table(&mut self, table: &str, columns: &ColumnSpec) -> Result<()> {
        (**self).create_table(table, columns)
    }

    fn drop_table(&mut self, table: &str) -> Result<()> {
        (**self).drop_table(table)
    }
}
