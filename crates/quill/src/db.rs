mod builder;
pub use builder::Builder;

use crate::{Config, IndexHook, QueryCache, Result};

use quill_core::{
    err,
    schema::{ColumnSpec, Model, Registry},
    Connection,
};
use quill_sql::Serializer;

use std::sync::Arc;

/// A database handle: one connection plus the registered models.
///
/// Every operation is blocking and runs on the caller's thread. Models are
/// addressed by name, resolved case-insensitively through the registry.
#[derive(Debug)]
pub struct Db {
    pub(crate) conn: Box<dyn Connection>,

    /// Serializes statements in the connection's dialect
    pub(crate) serializer: Serializer,

    pub(crate) registry: Arc<Registry>,

    /// Result cache shared with other handles, if caching is enabled
    pub(crate) cache: Option<Arc<dyn QueryCache>>,

    pub(crate) index: Option<Arc<dyn IndexHook>>,

    pub(crate) config: Config,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> Option<&Arc<dyn QueryCache>> {
        self.cache.as_ref()
    }

    /// Resolves a registered model by name.
    pub fn model(&self, name: &str) -> Result<Arc<Model>> {
        self.registry.resolve(name).cloned()
    }

    /// Creates the table of every registered model.
    pub fn push_schema(&mut self) -> Result<()> {
        let registry = self.registry.clone();

        for model in registry.models() {
            let columns = ColumnSpec::from_model(model);
            tracing::debug!(model = model.name(), columns = %columns, "creating table");
            self.conn
                .create_table(model.table(), &columns)
                .map_err(|err| err.context(err!("create table `{}`", model.table())))?;
        }

        Ok(())
    }

    /// Drops the table of every registered model, if it exists.
    pub fn drop_schema(&mut self) -> Result<()> {
        let registry = self.registry.clone();

        for model in registry.models() {
            self.conn
                .drop_table(model.table())
                .map_err(|err| err.context(err!("drop table `{}`", model.table())))?;
        }

        if let Some(cache) = &self.cache {
            cache.clear();
        }

        Ok(())
    }
}
