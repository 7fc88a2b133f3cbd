use super::{Key, Model};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Maps model names to their descriptors.
///
/// Relationship traversal and integrity checks discover their targets here.
/// Names are resolved case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    models: IndexMap<String, Arc<Model>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolves a model by name.
    pub fn resolve(&self, name: &str) -> Result<&Arc<Model>> {
        self.models
            .get(&name.to_lowercase())
            .ok_or_else(|| Error::model_not_registered(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(&name.to_lowercase())
    }

    /// All registered models, in registration order.
    pub fn models(&self) -> impl Iterator<Item = &Arc<Model>> {
        self.models.values()
    }

    /// Models owned by the given host module.
    pub fn models_in<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Arc<Model>> + 'a {
        self.models().filter(move |model| model.module() == module)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    models: Vec<Model>,
}

impl RegistryBuilder {
    pub fn register(&mut self, model: Model) -> &mut Self {
        self.models.push(model);
        self
    }

    /// Builds the registry, checking that every key target resolves.
    pub fn build(&mut self) -> Result<Registry> {
        let mut models = IndexMap::with_capacity(self.models.len());

        for model in self.models.drain(..) {
            let key = model.name().to_lowercase();
            if models.contains_key(&key) {
                return Err(Error::invalid_schema(format!(
                    "model `{}` is registered more than once",
                    model.name()
                )));
            }
            models.insert(key, Arc::new(model));
        }

        let registry = Registry { models };
        registry.verify()?;
        Ok(registry)
    }
}

impl Registry {
    fn verify(&self) -> Result<()> {
        for model in self.models() {
            for field in model.fields() {
                let Some(target) = field.key_target() else {
                    continue;
                };

                let context = || {
                    Error::invalid_schema(format!(
                        "field `{}.{}` references `{target}`",
                        model.name(),
                        field.name()
                    ))
                };

                let target_model = self
                    .resolve(target.model())
                    .map_err(|err| err.context(context()))?;

                if target_model.field(target.field()).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "model `{}` has no field `{}`",
                        target_model.name(),
                        target.field()
                    ))
                    .context(context()));
                }

                if matches!(field.key(), Some(Key::Associative(_)))
                    && !target_model.is_association()
                {
                    return Err(Error::invalid_schema(format!(
                        "`{}` is not an association",
                        target_model.name()
                    ))
                    .context(context()));
                }
            }
        }

        Ok(())
    }
}
