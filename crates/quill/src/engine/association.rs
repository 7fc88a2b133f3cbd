use super::exec::equals;
use crate::{Db, Result};

use quill_core::{
    schema::{Field, Model},
    stmt::{Record, Value},
    Error,
};
use quill_sql::stmt::Filter;

use indexmap::IndexSet;
use std::sync::Arc;

/// The resolved shape of an associative field `A.f -> Assoc.far`.
struct Link {
    association: Arc<Model>,

    /// Association field pointing back at `A`
    near: String,

    /// Association field pointing at the far model
    far: String,

    far_model: Arc<Model>,
}

impl Db {
    /// Returns the far-side records linked to row `id` of `model` through
    /// the associative field `field`.
    pub fn linked(
        &mut self,
        model: &str,
        field: &str,
        id: impl Into<Value>,
    ) -> Result<Vec<Record>> {
        let link = self.link(model, field)?;
        let ids = self.linked_ids(&link, &id.into())?;
        let ids: Vec<Value> = ids.into_iter().collect();
        self.select_model_by_ids(&link.far_model, &ids)
    }

    /// Returns the far-side records not yet linked to row `id` of `model`
    /// through `field`: every far record minus [`linked`](Db::linked).
    pub fn associable(
        &mut self,
        model: &str,
        field: &str,
        id: impl Into<Value>,
    ) -> Result<Vec<Record>> {
        let link = self.link(model, field)?;
        let linked = self.linked_ids(&link, &id.into())?;

        let all = self.fetch(&link.far_model, Filter::all(), true)?;

        Ok(all
            .into_iter()
            .filter(|record| record.id().is_some_and(|id| !linked.contains(id)))
            .collect())
    }

    fn link(&self, model: &str, field: &str) -> Result<Link> {
        let model = self.model(model)?;
        let field = model.field_or_err(field)?;

        let Some(target) = field.key_target().filter(|_| field.is_associative()) else {
            return Err(Error::invalid_schema(format!(
                "field `{}.{}` is not an associative key",
                model.name(),
                field.name()
            )));
        };

        let association = self.model(target.model())?;
        let far = association.field_or_err(target.field())?;
        let near = other_foreign_key(&association, far)?;

        let far_model = match far.key_target() {
            Some(far_target) => self.model(far_target.model())?,
            None => {
                return Err(Error::invalid_schema(format!(
                    "association field `{}.{}` is not a foreign key",
                    association.name(),
                    far.name()
                )))
            }
        };

        Ok(Link {
            near: near.name().to_string(),
            far: far.name().to_string(),
            far_model,
            association,
        })
    }

    /// Far-side keys of the association rows whose near key equals `id`.
    fn linked_ids(&mut self, link: &Link, id: &Value) -> Result<IndexSet<Value>> {
        let near = link.association.field_or_err(&link.near)?;
        let filter = Filter::from(equals(near, id)?);

        let rows = self.fetch(&link.association, filter, false)?;

        Ok(rows
            .iter()
            .filter_map(|row| row.get(&link.far))
            .filter(|value| !value.is_null())
            .cloned()
            .collect())
    }
}

fn other_foreign_key<'a>(association: &'a Model, far: &Field) -> Result<&'a Field> {
    association
        .fields()
        .find(|field| field.is_foreign_key() && field.name() != far.name())
        .ok_or_else(|| {
            Error::invalid_schema(format!(
                "association `{}` has no foreign key besides `{}`",
                association.name(),
                far.name()
            ))
        })
}
