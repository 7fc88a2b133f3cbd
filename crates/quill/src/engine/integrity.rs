use super::exec::equals;
use crate::{Db, Result};

use quill_core::stmt::Value;
use quill_sql::stmt::Filter;

use std::fmt;

/// A row that still references the row about to be deleted.
///
/// Returned, not raised: callers decide whether the delete proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The referencing model
    pub model: String,

    /// The foreign key field holding the reference
    pub field: String,

    /// Key of the referenced row
    pub id: Value,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is still referenced by `{}.{}`",
            self.id, self.model, self.field
        )
    }
}

impl Db {
    /// Looks for a row referencing `id` of `model` through a foreign key.
    ///
    /// Every non-association model of the same module is scanned, one query
    /// per referencing field, stopping at the first hit.
    pub fn verify_integrity(
        &mut self,
        model: &str,
        id: impl Into<Value>,
    ) -> Result<Option<Violation>> {
        let target = self.model(model)?;
        let id = id.into();
        let registry = self.registry.clone();

        for candidate in registry.models_in(target.module()) {
            if candidate.is_association() {
                continue;
            }

            for field in candidate.columns() {
                let references = field
                    .key_target()
                    .is_some_and(|key| key.targets(target.name()));

                if !references {
                    continue;
                }

                let filter = Filter::from(equals(field, &id)?);

                if !self.fetch(candidate, filter, false)?.is_empty() {
                    return Ok(Some(Violation {
                        model: candidate.name().to_string(),
                        field: field.name().to_string(),
                        id,
                    }));
                }
            }
        }

        Ok(None)
    }

    /// Deletes `ids` only if none of them is referenced.
    ///
    /// On the first violation nothing is deleted and the violation is
    /// returned.
    pub fn delete_unreferenced<V: Into<Value>>(
        &mut self,
        model: &str,
        ids: impl IntoIterator<Item = V>,
    ) -> Result<Option<Violation>> {
        let target = self.model(model)?;
        let ids: Vec<Value> = ids.into_iter().map(Into::into).collect();

        for id in &ids {
            if let Some(violation) = self.verify_integrity(target.name(), id.clone())? {
                return Ok(Some(violation));
            }
        }

        self.delete_model(&target, &ids)?;
        Ok(None)
    }
}
