//! Memoization of read queries.
//!
//! Entries are keyed by the exact SQL text and bound parameters. The key also
//! records the table read so that writers can drop every entry of a table.

use quill_core::stmt::{Record, Value};

use parking_lot::RwLock;
use std::{collections::HashMap, fmt::Debug};

/// Identifies one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Table the query reads
    pub table: String,
    pub sql: String,
    pub params: Vec<Value>,
}

/// A store of query results shared by every caller of a [`Db`](crate::Db).
///
/// Implementations are called from any thread and synchronize internally.
///
/// Each table carries a generation that moves forward whenever its entries
/// are dropped. A reader takes the generation before querying and hands it to
/// [`store`](QueryCache::store); results read before an invalidation are then
/// discarded instead of cached.
pub trait QueryCache: Debug + Send + Sync {
    /// Returns the records stored under `key`, if any.
    fn lookup(&self, key: &CacheKey) -> Option<Vec<Record>>;

    /// Current generation of `table`.
    fn generation(&self, table: &str) -> u64;

    /// Stores `records` unless the table's generation moved past `generation`.
    fn store(&self, key: CacheKey, generation: u64, records: Vec<Record>);

    /// Drops every entry that reads `table`.
    fn invalidate(&self, table: &str);

    fn clear(&self);
}

/// Process-lifetime cache in a hash map behind a read-write lock.
///
/// There is no eviction.
#[derive(Debug, Default)]
pub struct MemoryCache {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<CacheKey, Vec<Record>>,

    /// Last generation handed out, by table
    tables: HashMap<String, u64>,

    /// Generation of the last `clear`, which covers every table
    cleared: u64,

    /// Source of generations
    counter: u64,
}

impl State {
    fn generation(&self, table: &str) -> u64 {
        self.tables
            .get(table)
            .copied()
            .unwrap_or_default()
            .max(self.cleared)
    }

    fn advance(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

impl MemoryCache {
    pub fn new() -> MemoryCache {
        MemoryCache::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }
}

impl QueryCache for MemoryCache {
    fn lookup(&self, key: &CacheKey) -> Option<Vec<Record>> {
        self.state.read().entries.get(key).cloned()
    }

    fn generation(&self, table: &str) -> u64 {
        self.state.read().generation(table)
    }

    fn store(&self, key: CacheKey, generation: u64, records: Vec<Record>) {
        let mut state = self.state.write();

        if state.generation(&key.table) != generation {
            return;
        }
        state.entries.insert(key, records);
    }

    fn invalidate(&self, table: &str) {
        let mut state = self.state.write();
        let generation = state.advance();
        state.tables.insert(table.to_string(), generation);
        state.entries.retain(|key, _| key.table != table);
    }

    fn clear(&self) {
        let mut state = self.state.write();
        state.cleared = state.advance();
        state.entries.clear();
    }
}
