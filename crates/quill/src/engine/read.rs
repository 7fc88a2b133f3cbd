use super::exec::any_of;
use crate::{Db, Result};

use quill_core::{
    err,
    schema::Model,
    stmt::{Example, Record, Value},
    Error,
};
use quill_sql::{compile, stmt::Filter, Statement};

use std::sync::Arc;

impl Db {
    /// Counts the rows of a model's table.
    pub fn count_all(&mut self, model: &str) -> Result<u64> {
        let model = self.model(model)?;

        let mut params: Vec<Value> = vec![];
        let sql = self
            .serializer
            .serialize(&Statement::count(model.table()), &mut params);

        tracing::debug!(sql = %sql, "query scalar");
        let value = self
            .conn
            .query_scalar(&sql)
            .map_err(|err| err.context(err!("count rows of `{}`", model.table())))?;

        value
            .as_i64()
            .and_then(|count| u64::try_from(count).ok())
            .ok_or_else(|| Error::type_conversion(value, "u64"))
    }

    /// Returns every row of a model's table. Cached.
    pub fn select_all(&mut self, model: &str) -> Result<Vec<Record>> {
        let model = self.model(model)?;
        self.fetch(&model, Filter::all(), true)
    }

    /// Returns the rows whose primary key is one of `ids`. Cached.
    ///
    /// An empty id list returns nothing without querying.
    pub fn select_by_ids<V: Into<Value>>(
        &mut self,
        model: &str,
        ids: impl IntoIterator<Item = V>,
    ) -> Result<Vec<Record>> {
        let model = self.model(model)?;
        let ids: Vec<Value> = ids.into_iter().map(Into::into).collect();
        self.select_model_by_ids(&model, &ids)
    }

    pub fn select_by_id(&mut self, model: &str, id: impl Into<Value>) -> Result<Option<Record>> {
        let records = self.select_by_ids(model, [id.into()])?;
        Ok(records.into_iter().next())
    }

    /// Returns the rows matching every criterion of `example`. Never cached.
    pub fn select_by_example(&mut self, model: &str, example: &Example) -> Result<Vec<Record>> {
        let model = self.model(model)?;
        self.select_model_by_example(&model, example)
    }

    /// Deletes the rows matching every criterion of `example`, returning the
    /// number of rows deleted.
    ///
    /// No integrity check is made.
    pub fn delete_by_example(&mut self, model: &str, example: &Example) -> Result<u64> {
        let model = self.model(model)?;
        let filter = compile(&model, example)?;

        // The index hook needs the keys of the rows about to go.
        let doomed: Vec<Value> = if self.indexes(&model) && model.primary_key().is_some() {
            self.fetch(&model, filter.clone(), false)?
                .iter()
                .filter_map(|record| record.id().cloned())
                .collect()
        } else {
            vec![]
        };

        let count = self.execute(Statement::delete(model.table(), filter))?;

        for id in &doomed {
            self.notify_delete(&model, id);
        }

        Ok(count)
    }

    pub(crate) fn select_model_by_ids(
        &mut self,
        model: &Arc<Model>,
        ids: &[Value],
    ) -> Result<Vec<Record>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let pk = model.primary_key_or_err()?;
        let filter = Filter::from(any_of(pk, ids)?);
        self.fetch(model, filter, true)
    }

    pub(crate) fn select_model_by_example(
        &mut self,
        model: &Arc<Model>,
        example: &Example,
    ) -> Result<Vec<Record>> {
        let filter = compile(model, example)?;
        self.fetch(model, filter, false)
    }
}
