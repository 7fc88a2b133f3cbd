use super::{Cast, Key, KeyRole, KeyTarget};
use crate::{stmt::Value, Error, Result};

/// One column descriptor of a [`Model`](super::Model).
///
/// Fields are validated once, when built, and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The field name, unique within its model. Also the column name.
    name: String,

    /// Logical value type
    cast: Cast,

    /// Declared size, only meaningful for STRING, INTEGER and NUMERIC
    size: Option<u32>,

    /// True if the column accepts NULL
    nullable: bool,

    /// Key role and target, if any
    key: Option<Key>,

    /// Value used on insert when the row does not supply one
    default: Option<Value>,
}

impl Field {
    pub fn builder(name: impl Into<String>, cast: Cast) -> FieldBuilder {
        FieldBuilder {
            name: name.into(),
            cast,
            size: None,
            nullable: false,
            role: None,
            target: None,
            default: None,
            conflict: None,
        }
    }

    /// Creates a field from its raw parts, checking every invariant.
    ///
    /// `target` must be present exactly when `role` is foreign or associative.
    pub fn from_parts(
        name: impl Into<String>,
        cast: Cast,
        size: Option<u32>,
        nullable: bool,
        role: Option<KeyRole>,
        target: Option<&str>,
    ) -> Result<Field> {
        let name = name.into();

        if name.is_empty() {
            return Err(Error::invalid_schema("field name must not be empty"));
        }

        if size.is_some() && !cast.accepts_size() {
            return Err(Error::invalid_schema(format!(
                "field `{name}` of type {cast} must not declare a size"
            )));
        }

        let key = match (role, target) {
            (None, None) => None,
            (None, Some(_)) | (Some(KeyRole::Primary), Some(_)) => {
                return Err(Error::invalid_schema(format!(
                    "field `{name}` can only declare a key target with a foreign or associative key"
                )));
            }
            (Some(KeyRole::Foreign | KeyRole::Associative), None) => {
                return Err(Error::invalid_schema(format!(
                    "foreign and associative key field `{name}` needs a key target"
                )));
            }
            (Some(KeyRole::Primary), None) => Some(Key::Primary),
            (Some(KeyRole::Foreign), Some(target)) => Some(Key::Foreign(
                KeyTarget::parse(target).map_err(|err| err.context(field_context(&name)))?,
            )),
            (Some(KeyRole::Associative), Some(target)) => Some(Key::Associative(
                KeyTarget::parse(target).map_err(|err| err.context(field_context(&name)))?,
            )),
        };

        Ok(Field {
            name,
            cast,
            size,
            nullable,
            key,
            default: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cast(&self) -> Cast {
        self.cast
    }

    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn key_role(&self) -> Option<KeyRole> {
        self.key.as_ref().map(Key::role)
    }

    pub fn key_target(&self) -> Option<&KeyTarget> {
        self.key.as_ref().and_then(Key::target)
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self.key, Some(Key::Primary))
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self.key, Some(Key::Foreign(_)))
    }

    pub fn is_associative(&self) -> bool {
        matches!(self.key, Some(Key::Associative(_)))
    }

    /// Associative fields exist only as relationship metadata.
    pub fn has_column(&self) -> bool {
        !self.is_associative()
    }
}

fn field_context(name: &str) -> Error {
    crate::err!("field `{name}`")
}

/// Builds a [`Field`], reporting invalid combinations from [`build`](FieldBuilder::build).
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    cast: Cast,
    size: Option<u32>,
    nullable: bool,
    role: Option<KeyRole>,
    target: Option<String>,
    default: Option<Value>,
    conflict: Option<KeyRole>,
}

impl FieldBuilder {
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(self) -> Self {
        self.role(KeyRole::Primary, None)
    }

    /// Marks the field as referencing `Model.field`.
    pub fn foreign_key(self, target: impl Into<String>) -> Self {
        self.role(KeyRole::Foreign, Some(target.into()))
    }

    /// Marks the field as a many-to-many link through `Association.far_field`.
    pub fn associative_key(self, target: impl Into<String>) -> Self {
        self.role(KeyRole::Associative, Some(target.into()))
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn role(mut self, role: KeyRole, target: Option<String>) -> Self {
        if self.role.is_some() {
            self.conflict = Some(role);
        }
        self.role = Some(role);
        self.target = target;
        self
    }

    pub fn build(self) -> Result<Field> {
        if let Some(role) = self.conflict {
            return Err(Error::invalid_schema(format!(
                "field `{}` declares more than one key role ({role:?} was added last)",
                self.name
            )));
        }

        let mut field = Field::from_parts(
            self.name,
            self.cast,
            self.size,
            self.nullable,
            self.role,
            self.target.as_deref(),
        )?;

        if let Some(default) = self.default {
            if !field.cast.accepts_default() {
                return Err(Error::invalid_schema(format!(
                    "field `{}` of type {} can't have a default value",
                    field.name, field.cast
                )));
            }
            field.default = Some(default);
        }

        Ok(field)
    }
}
