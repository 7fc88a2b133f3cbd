use super::{Filter, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub filter: Filter,
}

impl Statement {
    pub fn delete(table: impl Into<String>, filter: impl Into<Filter>) -> Statement {
        Delete {
            table: table.into(),
            filter: filter.into(),
        }
        .into()
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
