use crate::{CacheKey, Db, Result};

use quill_core::{
    codec, err,
    schema::{Field, Model},
    stmt::{Record, Value},
};
use quill_sql::{
    stmt::{Filter, Predicate},
    Statement,
};

use std::sync::Arc;

impl Db {
    /// Selects every column of the rows matching `filter`, hydrated into
    /// records. When `cached`, the result is served from and stored into the
    /// query cache.
    pub(crate) fn fetch(
        &mut self,
        model: &Arc<Model>,
        filter: Filter,
        cached: bool,
    ) -> Result<Vec<Record>> {
        let columns = model.columns().map(|field| field.name().to_string());
        let stmt = Statement::select(model.table(), columns, filter);

        let mut params: Vec<Value> = vec![];
        let sql = self.serializer.serialize(&stmt, &mut params);

        let cache = if cached { self.cache.clone() } else { None };

        let key = CacheKey {
            table: model.table().to_string(),
            sql,
            params,
        };

        // Taken before querying so a write landing mid-read discards the result.
        let mut generation = 0;

        if let Some(cache) = &cache {
            if let Some(records) = cache.lookup(&key) {
                tracing::trace!(table = %key.table, sql = %key.sql, "cache hit");
                return Ok(records);
            }
            tracing::trace!(table = %key.table, sql = %key.sql, "cache miss");
            generation = cache.generation(&key.table);
        }

        tracing::debug!(sql = %key.sql, params = key.params.len(), "query");
        let rows = self
            .conn
            .query(&key.sql, &key.params)
            .map_err(|err| err.context(err!("select from `{}`", key.table)))?;

        let records = rows
            .into_iter()
            .map(|row| codec::hydrate(model, row))
            .collect::<Result<Vec<_>>>()?;

        if let Some(cache) = cache {
            cache.store(key, generation, records.clone());
        }

        Ok(records)
    }

    /// Executes a write, returning the number of affected rows.
    pub(crate) fn execute(&mut self, stmt: Statement) -> Result<u64> {
        let mut params: Vec<Value> = vec![];
        let sql = self.serializer.serialize(&stmt, &mut params);

        tracing::debug!(sql = %sql, params = params.len(), "execute");
        let count = self
            .conn
            .execute(&sql, &params)
            .map_err(|err| err.context(err!("{}", describe(&stmt))))?;

        if self.config.invalidate_cache_on_write && stmt.is_write() {
            if let Some(cache) = &self.cache {
                tracing::trace!(table = stmt.table(), "invalidating cached queries");
                cache.invalidate(stmt.table());
            }
        }

        Ok(count)
    }
}

/// Names the operation a statement performs, for error context.
fn describe(stmt: &Statement) -> String {
    match stmt {
        Statement::CreateTable(_) => format!("create table `{}`", stmt.table()),
        Statement::DropTable(_) => format!("drop table `{}`", stmt.table()),
        Statement::Delete(_) => format!("delete from `{}`", stmt.table()),
        Statement::Insert(_) => format!("insert into `{}`", stmt.table()),
        Statement::Select(_) => format!("select from `{}`", stmt.table()),
        Statement::Update(_) => format!("update `{}`", stmt.table()),
    }
}

/// `field = value`, with the value encoded for the field's cast.
pub(crate) fn equals(field: &Field, value: &Value) -> Result<Predicate> {
    Ok(Predicate::eq(field.name(), codec::encode(value, field.cast())?))
}

/// `field` equals any of `values`, each encoded for the field's cast.
pub(crate) fn any_of<'a>(
    field: &Field,
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<Predicate> {
    let values = values
        .into_iter()
        .map(|value| codec::encode(value, field.cast()))
        .collect::<Result<Vec<_>>>()?;

    Ok(Predicate::any_eq(field.name(), values))
}
