//! Notifications sent to an external search index after writes.

use quill_core::{
    schema::Model,
    stmt::{Record, Value},
    Result,
};

use std::fmt::Debug;

/// Receives writes to models flagged as indexable.
///
/// Calls are best effort: a returned error is logged and never undoes the
/// write that triggered it.
pub trait IndexHook: Debug + Send + Sync {
    /// A row was inserted. `record` is the row as re-read from the database.
    fn on_insert(&self, module: &str, record: &Record) -> Result<()>;

    /// A row was updated. `record` is the row as re-read from the database.
    fn on_update(&self, module: &str, record: &Record) -> Result<()>;

    fn on_delete(&self, module: &str, model: &Model, id: &Value) -> Result<()>;
}
