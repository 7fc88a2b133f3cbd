use super::{Filter, Statement, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,

    /// `SET` assignments, in order
    pub assignments: Vec<(String, Value)>,

    pub filter: Filter,
}

impl Statement {
    pub fn update(
        table: impl Into<String>,
        assignments: Vec<(String, Value)>,
        filter: impl Into<Filter>,
    ) -> Statement {
        Update {
            table: table.into(),
            assignments,
            filter: filter.into(),
        }
        .into()
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
