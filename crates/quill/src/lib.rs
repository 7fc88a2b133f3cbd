pub mod cache;
pub use cache::{CacheKey, MemoryCache, QueryCache};

mod config;
pub use config::{BatchMode, Config};

pub mod db;
pub use db::Db;

mod engine;
pub use engine::Violation;

pub mod index;
pub use index::IndexHook;

pub use quill_core::{
    bail, err, schema, stmt, Connection, Error, Model, Registry, Result,
};

#[cfg(feature = "sqlite")]
pub use quill_driver_sqlite as sqlite;
