//! Engine configuration.

/// How multi-row inserts and updates treat a failing row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// Each row is its own statement. Rows before a failing row stay written.
    #[default]
    PerRow,

    /// The whole batch runs in one transaction and is rolled back on the first
    /// failing row.
    Atomic,
}

/// Configuration for a [`Db`](crate::Db).
#[derive(Debug, Clone)]
pub struct Config {
    /// Deepest relationship path a deep search follows before failing.
    pub max_search_depth: usize,

    /// Whether every write drops the cached queries of the table it touched.
    pub invalidate_cache_on_write: bool,

    pub batch_mode: BatchMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_search_depth: 16,
            invalidate_cache_on_write: true,
            batch_mode: BatchMode::PerRow,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum deep search depth.
    #[must_use]
    pub const fn max_search_depth(mut self, depth: usize) -> Self {
        self.max_search_depth = depth;
        self
    }

    /// Sets whether writes invalidate cached queries.
    #[must_use]
    pub const fn invalidate_cache_on_write(mut self, value: bool) -> Self {
        self.invalidate_cache_on_write = value;
        self
    }

    #[must_use]
    pub const fn batch_mode(mut self, mode: BatchMode) -> Self {
        self.batch_mode = mode;
        self
    }
}
