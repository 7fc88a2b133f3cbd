use super::Statement;

use quill_core::schema::ColumnSpec;

/// A statement to create a SQL table from a model's column spec.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub table: String,
    pub columns: ColumnSpec,

    /// Whether or not to add an `IF NOT EXISTS` clause.
    pub if_not_exists: bool,
}

impl Statement {
    pub fn create_table(table: impl Into<String>, columns: ColumnSpec) -> Statement {
        CreateTable {
            table: table.into(),
            columns,
            if_not_exists: false,
        }
        .into()
    }

    /// Creates a table unless one with the same name exists.
    pub fn create_table_if_not_exists(table: impl Into<String>, columns: ColumnSpec) -> Statement {
        CreateTable {
            table: table.into(),
            columns,
            if_not_exists: true,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
