use super::{Row, Value};
use crate::schema::Model;
use indexmap::IndexMap;
use std::sync::Arc;

/// One hydrated row, bound to the model it was read from.
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<Model>,
    values: IndexMap<String, Value>,
}

impl Record {
    pub(crate) fn new(model: Arc<Model>, values: IndexMap<String, Value>) -> Record {
        Record { model, values }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Returns the value of a field, `None` if the model has no such column.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the primary key value, if the model has one.
    pub fn id(&self) -> Option<&Value> {
        let pk = self.model.primary_key()?;
        self.values.get(pk.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Converts the record back into an unbound row, e.g. to feed `update`.
    pub fn to_row(&self) -> Row {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.model.name() == other.model.name() && self.values == other.values
    }
}
