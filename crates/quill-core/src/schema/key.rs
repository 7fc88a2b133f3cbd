use crate::{Error, Result};

/// Key role of a field, without its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Primary,
    Foreign,
    Associative,
}

/// Key role of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Identifies the row. Generated from the model's sequence when absent on insert.
    Primary,

    /// References another model's row.
    Foreign(KeyTarget),

    /// Many-to-many relationship realized through an association model. The
    /// field has no physical column.
    Associative(KeyTarget),
}

impl Key {
    pub fn role(&self) -> KeyRole {
        match self {
            Key::Primary => KeyRole::Primary,
            Key::Foreign(_) => KeyRole::Foreign,
            Key::Associative(_) => KeyRole::Associative,
        }
    }

    pub fn target(&self) -> Option<&KeyTarget> {
        match self {
            Key::Primary => None,
            Key::Foreign(target) | Key::Associative(target) => Some(target),
        }
    }
}

/// A `Model.field` reference carried by foreign and associative keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyTarget {
    model: String,
    field: String,
}

impl KeyTarget {
    pub fn new(model: impl Into<String>, field: impl Into<String>) -> KeyTarget {
        KeyTarget {
            model: model.into(),
            field: field.into(),
        }
    }

    /// Parses a dotted `Model.field` reference.
    pub fn parse(src: &str) -> Result<KeyTarget> {
        match src.split_once('.') {
            Some((model, field))
                if !model.is_empty() && !field.is_empty() && !field.contains('.') =>
            {
                Ok(KeyTarget::new(model, field))
            }
            _ => Err(Error::invalid_schema(format!(
                "key target `{src}` must have the form `Model.field`"
            ))),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// True if the target points at the named model, compared case-insensitively.
    pub fn targets(&self, model: &str) -> bool {
        self.model.eq_ignore_ascii_case(model)
    }
}

impl core::fmt::Display for KeyTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}.{}", self.model, self.field)
    }
}
