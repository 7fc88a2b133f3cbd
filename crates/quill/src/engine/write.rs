use super::exec::{any_of, equals};
use crate::{BatchMode, Db, Result};

use quill_core::{
    codec,
    driver::Transaction,
    err,
    schema::Model,
    stmt::{Record, Row, Value},
    Error,
};
use quill_sql::{stmt::Filter, Statement};

use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
enum WriteOp {
    Insert,
    Update,
}

impl Db {
    /// Inserts rows, one statement per row.
    ///
    /// Every non-nullable, non-key column needs a non-empty value; `0` counts
    /// as a value, an empty string does not. A missing primary key is drawn
    /// from the model's sequence. Returns the key of each row in order, or
    /// null for association rows.
    pub fn insert(&mut self, model: &str, rows: impl IntoIterator<Item = Row>) -> Result<Vec<Value>> {
        let model = self.model(model)?;
        let track = self.indexes(&model) && model.primary_key().is_some();

        let mut ids = vec![];
        let mut pending = vec![];

        let result = self.batch(|db| {
            for (index, row) in rows.into_iter().enumerate() {
                let id = db.insert_row(&model, row).map_err(|err| {
                    err.context(err!("insert row {index} into `{}`", model.name()))
                })?;

                if track {
                    pending.push(id.clone());
                }
                ids.push(id);
            }
            Ok(())
        });

        self.settle(&model, result, &pending, WriteOp::Insert)?;
        Ok(ids)
    }

    /// Applies partial rows, one statement per row.
    ///
    /// Each row must carry the primary key. Fields the row leaves out are left
    /// untouched and fields the model does not declare are ignored. Returns
    /// the number of rows changed.
    pub fn update(&mut self, model: &str, rows: impl IntoIterator<Item = Row>) -> Result<u64> {
        let model = self.model(model)?;
        let track = self.indexes(&model);

        let mut total = 0;
        let mut pending = vec![];

        let result = self.batch(|db| {
            for (index, row) in rows.into_iter().enumerate() {
                let (count, id) = db.update_row(&model, row).map_err(|err| {
                    err.context(err!("update row {index} of `{}`", model.name()))
                })?;

                if track && count > 0 {
                    pending.push(id);
                }
                total += count;
            }
            Ok(())
        });

        self.settle(&model, result, &pending, WriteOp::Update)?;
        Ok(total)
    }

    /// Deletes rows by primary key in a single statement.
    ///
    /// References to the rows are not checked; see
    /// [`delete_unreferenced`](Db::delete_unreferenced).
    pub fn delete<V: Into<Value>>(
        &mut self,
        model: &str,
        ids: impl IntoIterator<Item = V>,
    ) -> Result<u64> {
        let model = self.model(model)?;
        let ids: Vec<Value> = ids.into_iter().map(Into::into).collect();
        self.delete_model(&model, &ids)
    }

    pub(crate) fn delete_model(&mut self, model: &Arc<Model>, ids: &[Value]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let pk = model.primary_key_or_err()?;
        let count = self.execute(Statement::delete(model.table(), any_of(pk, ids)?))?;

        for id in ids {
            self.notify_delete(model, id);
        }

        Ok(count)
    }

    fn insert_row(&mut self, model: &Arc<Model>, mut row: Row) -> Result<Value> {
        row.retain(|name, _| model.field(name).is_some_and(|field| field.has_column()));

        for field in model.columns() {
            if let Some(default) = field.default_value() {
                if row.get(field.name()).map_or(true, Value::is_empty) {
                    row.insert(field.name(), default.clone());
                }
            }
        }

        for field in model.columns() {
            if field.nullable() || field.is_primary_key() {
                continue;
            }

            if row.get(field.name()).map_or(true, Value::is_empty) {
                return Err(Error::invalid_record(format!(
                    "field `{}` requires a value",
                    field.name()
                )));
            }
        }

        let id = match model.primary_key() {
            Some(pk) => match row.get(pk.name()) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => {
                    let sequence = model.sequence();
                    let next = self.conn.next_sequence_value(&sequence).map_err(|err| {
                        err.context(err!("advance sequence `{sequence}`"))
                    })?;
                    let id = Value::I64(next);
                    row.insert(pk.name(), id.clone());
                    id
                }
            },
            None => Value::Null,
        };

        let values = model
            .columns()
            .map(|field| {
                let value = row.remove(field.name()).unwrap_or_default();
                Ok((field.name().to_string(), codec::encode(&value, field.cast())?))
            })
            .collect::<Result<Vec<_>>>()?;

        self.execute(Statement::insert(model.table(), values))?;
        Ok(id)
    }

    fn update_row(&mut self, model: &Arc<Model>, row: Row) -> Result<(u64, Value)> {
        let pk = model.primary_key_or_err()?;

        let id = match row.get(pk.name()) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => {
                return Err(Error::invalid_record(format!(
                    "missing primary key `{}`",
                    pk.name()
                )))
            }
        };

        let assignments = row
            .iter()
            .filter_map(|(name, value)| {
                let field = model.field(name)?;
                (!field.is_primary_key() && !field.is_associative()).then_some((field, value))
            })
            .map(|(field, value)| {
                Ok((field.name().to_string(), codec::encode(value, field.cast())?))
            })
            .collect::<Result<Vec<_>>>()?;

        if assignments.is_empty() {
            return Ok((0, id));
        }

        let filter = equals(pk, &id)?;
        let count = self.execute(Statement::update(model.table(), assignments, filter))?;
        Ok((count, id))
    }

    /// Runs a multi-row write according to the configured batch mode.
    fn batch(&mut self, f: impl FnOnce(&mut Db) -> Result<()>) -> Result<()> {
        match self.config.batch_mode {
            BatchMode::PerRow => f(self),
            BatchMode::Atomic => {
                self.conn.transaction(Transaction::Start)?;

                match f(self) {
                    Ok(()) => self.conn.transaction(Transaction::Commit),
                    Err(err) => {
                        if let Err(rollback) = self.conn.transaction(Transaction::Rollback) {
                            tracing::warn!(error = %rollback, "batch rollback failed");
                        }
                        Err(err)
                    }
                }
            }
        }
    }

    /// Sends index notifications for the rows a batch left written, then
    /// reports the batch result.
    fn settle(
        &mut self,
        model: &Arc<Model>,
        result: Result<()>,
        written: &[Value],
        op: WriteOp,
    ) -> Result<()> {
        let committed = result.is_ok() || self.config.batch_mode == BatchMode::PerRow;

        if committed {
            for id in written {
                self.notify_write(model, id, op);
            }
        }

        result
    }

    pub(crate) fn indexes(&self, model: &Model) -> bool {
        self.index.is_some() && model.is_indexable()
    }

    fn notify_write(&mut self, model: &Arc<Model>, id: &Value, op: WriteOp) {
        let Some(hook) = self.index.clone() else {
            return;
        };

        let result = self.reread(model, id).and_then(|record| match record {
            Some(record) => match op {
                WriteOp::Insert => hook.on_insert(model.module(), &record),
                WriteOp::Update => hook.on_update(model.module(), &record),
            },
            None => Ok(()),
        });

        if let Err(err) = result {
            tracing::warn!(model = model.name(), id = %id, op = ?op, error = %err, "index hook failed");
        }
    }

    pub(crate) fn notify_delete(&self, model: &Model, id: &Value) {
        let Some(hook) = &self.index else {
            return;
        };

        if !model.is_indexable() {
            return;
        }

        if let Err(err) = hook.on_delete(model.module(), model, id) {
            tracing::warn!(model = model.name(), id = %id, error = %err, "index hook failed");
        }
    }

    /// Reads a row back by key, bypassing the cache.
    fn reread(&mut self, model: &Arc<Model>, id: &Value) -> Result<Option<Record>> {
        let pk = model.primary_key_or_err()?;
        let records = self.fetch(model, Filter::from(equals(pk, id)?), false)?;
        Ok(records.into_iter().next())
    }
}
