use super::Db;
use crate::{Config, IndexHook, MemoryCache, QueryCache, Result};

use quill_core::{
    schema::{Model, Registry, RegistryBuilder},
    Connection,
};
use quill_sql::Serializer;

use std::sync::Arc;

#[derive(Debug)]
pub struct Builder {
    registry: RegistryBuilder,

    /// `None` disables caching
    cache: Option<Arc<dyn QueryCache>>,

    index: Option<Arc<dyn IndexHook>>,

    config: Config,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            registry: Registry::builder(),
            cache: Some(Arc::new(MemoryCache::new())),
            index: None,
            config: Config::default(),
        }
    }
}

impl Builder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.registry.register(model);
        self
    }

    /// Replaces the default in-memory cache, e.g. to share one cache between
    /// several handles.
    pub fn cache(&mut self, cache: Arc<dyn QueryCache>) -> &mut Self {
        self.cache = Some(cache);
        self
    }

    pub fn no_cache(&mut self) -> &mut Self {
        self.cache = None;
        self
    }

    pub fn index_hook(&mut self, hook: Arc<dyn IndexHook>) -> &mut Self {
        self.index = Some(hook);
        self
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Validates the registered models and binds them to `connection`.
    pub fn build(&mut self, connection: impl Connection + 'static) -> Result<Db> {
        let registry = self.registry.build()?;
        let conn: Box<dyn Connection> = Box::new(connection);
        let serializer = Serializer::for_capability(conn.capability());

        Ok(Db {
            conn,
            serializer,
            registry: Arc::new(registry),
            cache: self.cache.clone(),
            index: self.index.clone(),
            config: self.config.clone(),
        })
    }
}
