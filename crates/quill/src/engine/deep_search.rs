//! Multi-hop relationship traversal.
//!
//! A path `Root.hop.hop.field` is consumed left to right. Each hop follows a
//! foreign or associative key to the next model; an associative hop also
//! consumes the segment after it, which names the association. The last
//! segment is matched against the search values. Results are then projected
//! back one hop at a time, issuing one query per hop on the whole id set.

use super::exec::any_of;
use crate::{Db, Result};

use quill_core::{
    schema::Model,
    stmt::{Record, Value},
    Error,
};
use quill_sql::stmt::Filter;

use indexmap::IndexSet;
use std::sync::Arc;

impl Db {
    /// Returns the root model records whose traversal of `path` ends on a
    /// field equal to one of `values`.
    pub fn deep_search<V: Into<Value>>(
        &mut self,
        path: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Vec<Record>> {
        let segments: Vec<&str> = path.split('.').collect();

        if let Some(empty) = segments.iter().position(|segment| segment.is_empty()) {
            return Err(Error::invalid_path(
                path,
                format!("segment {} is empty", empty + 1),
            ));
        }

        let [root, rest @ ..] = &segments[..] else {
            return Err(Error::invalid_path(path, "path is empty"));
        };

        if rest.is_empty() {
            return Err(Error::invalid_path(
                path,
                "expected a model name followed by at least one field",
            ));
        }

        let model = self.model(root)?;
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if values.is_empty() {
            return Ok(vec![]);
        }

        self.search(&model, rest, &values, 0)
    }

    fn search(
        &mut self,
        model: &Arc<Model>,
        segments: &[&str],
        values: &[Value],
        depth: usize,
    ) -> Result<Vec<Record>> {
        let Some((&name, rest)) = segments.split_first() else {
            return Err(Error::invalid_path(model.name(), "path ends without a field"));
        };

        let segment = format!("{}.{name}", model.name());

        if depth > self.config.max_search_depth {
            return Err(Error::search_depth_exceeded(
                self.config.max_search_depth,
                segment,
            ));
        }

        let field = model.field(name).ok_or_else(|| {
            Error::invalid_path(&segment, format!("`{}` has no such field", model.name()))
        })?;

        if rest.is_empty() {
            if field.is_associative() {
                return Err(Error::invalid_path(
                    &segment,
                    "an associative field cannot be matched directly",
                ));
            }

            tracing::trace!(segment = %segment, values = values.len(), "deep search match");
            let filter = Filter::from(any_of(field, values)?);
            return self.fetch(model, filter, false);
        }

        let Some(target) = field.key_target() else {
            return Err(Error::invalid_path(
                &segment,
                "only foreign and associative keys can be traversed",
            ));
        };

        let next = self
            .registry
            .resolve(target.model())
            .map_err(|err| err.context(Error::invalid_path(&segment, "unknown key target")))?
            .clone();

        // An associative hop passes through the association's own segment.
        let rest = if field.is_associative() {
            match rest {
                [_association, rest @ ..] if !rest.is_empty() => rest,
                _ => {
                    return Err(Error::invalid_path(
                        &segment,
                        "an associative hop must be followed by the association and one of its fields",
                    ))
                }
            }
        } else {
            rest
        };

        tracing::trace!(segment = %segment, next = next.name(), depth, "deep search hop");

        let matches = self.search(&next, rest, values, depth + 1)?;

        if matches.is_empty() {
            return Ok(vec![]);
        }

        let (column, ids) = if next.is_association() {
            // The association row links back through its other foreign key.
            let followed = rest[0];
            let back = next
                .fields()
                .find(|other| other.is_foreign_key() && other.name() != followed)
                .ok_or_else(|| {
                    Error::invalid_path(
                        &segment,
                        format!("`{}` has no foreign key besides `{followed}`", next.name()),
                    )
                })?;

            let ids = collect_ids(matches.iter().filter_map(|record| record.get(back.name())));
            (model.primary_key_or_err()?, ids)
        } else {
            let ids = collect_ids(matches.iter().filter_map(Record::id));
            (field, ids)
        };

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let filter = Filter::from(any_of(column, &ids)?);
        self.fetch(model, filter, false)
    }
}

/// Distinct non-null values, in first-seen order.
fn collect_ids<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<Value> {
    values
        .filter(|value| !value.is_null())
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
