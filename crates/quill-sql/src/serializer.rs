#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod filter;
mod statement;
mod ty;

use crate::stmt::{Filter, Statement};

use quill_core::driver::{Capability, Flavor, Transaction};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// Features of the target database. The flavor handles the differences
    /// between SQL dialects.
    capability: &'static Capability,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Serialize only the predicate of a filter, without the `WHERE` keyword.
    ///
    /// An empty filter serializes to an empty string.
    pub fn serialize_filter(&self, filter: &Filter, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        filter::Conjunction(filter).to_sql(&mut fmt);
        ret
    }

    /// Serialize a transaction control operation to a SQL string.
    pub fn serialize_transaction(&self, op: Transaction) -> String {
        match op {
            Transaction::Start => match self.flavor() {
                Flavor::Mysql => "START TRANSACTION".to_string(),
                Flavor::Postgresql | Flavor::Sqlite => "BEGIN".to_string(),
            },
            Transaction::Commit => "COMMIT".to_string(),
            Transaction::Rollback => "ROLLBACK".to_string(),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.capability.flavor
    }
}
