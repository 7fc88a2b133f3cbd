use super::{Filter, Statement};

/// What a `SELECT` returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The listed columns, in order.
    Columns(Vec<String>),

    /// `COUNT(*)`
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub projection: Projection,
    pub filter: Filter,
}

impl Statement {
    /// Selects `columns` of the rows matching `filter`.
    pub fn select(
        table: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
        filter: impl Into<Filter>,
    ) -> Statement {
        Select {
            table: table.into(),
            projection: Projection::Columns(columns.into_iter().map(Into::into).collect()),
            filter: filter.into(),
        }
        .into()
    }

    /// Counts every row of the table.
    pub fn count(table: impl Into<String>) -> Statement {
        Select {
            table: table.into(),
            projection: Projection::Count,
            filter: Filter::all(),
        }
        .into()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
