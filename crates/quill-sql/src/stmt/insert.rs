use super::{Statement, Value};

/// Inserts a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    /// Column names paired with the values bound for them.
    pub values: Vec<(String, Value)>,
}

impl Statement {
    pub fn insert(table: impl Into<String>, values: Vec<(String, Value)>) -> Statement {
        Insert {
            table: table.into(),
            values,
        }
        .into()
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
