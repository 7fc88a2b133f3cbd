use super::Statement;

/// A statement to drop a SQL table.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    /// Name of the table.
    pub table: String,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// Drops a table.
    ///
    /// This function _does not_ add an `IF EXISTS` clause.
    pub fn drop_table(table: impl Into<String>) -> Self {
        DropTable {
            table: table.into(),
            if_exists: false,
        }
        .into()
    }

    /// Drops a table if it exists.
    pub fn drop_table_if_exists(table: impl Into<String>) -> Self {
        DropTable {
            table: table.into(),
            if_exists: true,
        }
        .into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
