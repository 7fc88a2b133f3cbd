use super::{Field, KeyRole};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::borrow::Cow;

/// Whether a model maps an ordinary table or a pure join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Entity,

    /// Realizes a many-to-many relationship with two foreign keys and no
    /// primary key of its own.
    Association,
}

/// Describes one mapped table: its name, fields and keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Logical name, used by key targets and deep search paths
    name: String,

    /// Physical table name
    table: String,

    /// Host module owning the model. Scopes integrity checks and indexing.
    module: String,

    /// Sequence used to generate primary keys
    sequence: Option<String>,

    /// Fields in declaration order
    fields: IndexMap<String, Field>,

    /// True if writes must notify the index hook
    indexable: bool,

    kind: ModelKind,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            table: None,
            module: None,
            sequence: None,
            fields: vec![],
            indexable: false,
            kind: ModelKind::Entity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Name of the sequence generating primary keys, `<table>_seq` unless configured.
    pub fn sequence(&self) -> Cow<'_, str> {
        match &self.sequence {
            Some(sequence) => Cow::Borrowed(sequence),
            None => Cow::Owned(format!("{}_seq", self.table)),
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn is_association(&self) -> bool {
        self.kind == ModelKind::Association
    }

    pub fn is_indexable(&self) -> bool {
        self.indexable
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the named field or an invalid schema error naming the model.
    pub fn field_or_err(&self, name: &str) -> Result<&Field> {
        self.field(name).ok_or_else(|| {
            Error::invalid_schema(format!("model `{}` has no field `{name}`", self.name))
        })
    }

    pub fn primary_key(&self) -> Option<&Field> {
        self.fields().find(|field| field.is_primary_key())
    }

    pub fn primary_key_or_err(&self) -> Result<&Field> {
        self.primary_key().ok_or_else(|| {
            Error::invalid_schema(format!("model `{}` has no primary key", self.name))
        })
    }

    /// Fields that map to a physical column, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Field> {
        self.fields().filter(|field| field.has_column())
    }
}

#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    table: Option<String>,
    module: Option<String>,
    sequence: Option<String>,
    fields: Vec<Field>,
    indexable: bool,
    kind: ModelKind,
}

impl ModelBuilder {
    /// Sets the physical table name. Defaults to the lowercased model name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn sequence(mut self, sequence: impl Into<String>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn indexable(mut self) -> Self {
        self.indexable = true;
        self
    }

    pub fn association(mut self) -> Self {
        self.kind = ModelKind::Association;
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Model> {
        let name = self.name;

        if name.is_empty() || name.contains('.') {
            return Err(Error::invalid_schema(format!(
                "model name `{name}` must be non-empty and must not contain `.`"
            )));
        }

        let mut fields = IndexMap::with_capacity(self.fields.len());

        for field in self.fields {
            if fields.contains_key(field.name()) {
                return Err(Error::invalid_schema(format!(
                    "model `{name}` declares field `{}` more than once",
                    field.name()
                )));
            }
            fields.insert(field.name().to_string(), field);
        }

        let count = |role: KeyRole| {
            fields
                .values()
                .filter(|field| field.key_role() == Some(role))
                .count()
        };

        match self.kind {
            ModelKind::Entity => {
                if count(KeyRole::Primary) > 1 {
                    return Err(Error::invalid_schema(format!(
                        "model `{name}` declares more than one primary key"
                    )));
                }
            }
            ModelKind::Association => {
                if count(KeyRole::Primary) > 0 || count(KeyRole::Associative) > 0 {
                    return Err(Error::invalid_schema(format!(
                        "association `{name}` may only declare foreign keys"
                    )));
                }
                if count(KeyRole::Foreign) != 2 {
                    return Err(Error::invalid_schema(format!(
                        "association `{name}` must declare exactly two foreign keys"
                    )));
                }
            }
        }

        Ok(Model {
            table: self.table.unwrap_or_else(|| name.to_lowercase()),
            module: self.module.unwrap_or_else(|| "default".to_string()),
            sequence: self.sequence,
            fields,
            indexable: self.indexable,
            kind: self.kind,
            name,
        })
    }
}
