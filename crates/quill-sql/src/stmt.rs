mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_table;
pub use drop_table::DropTable;

mod filter;
pub use filter::{BinaryOp, Filter, Predicate};

mod insert;
pub use insert::Insert;

mod select;
pub use select::{Projection, Select};

mod update;
pub use update::Update;

pub use quill_core::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    DropTable(DropTable),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    /// Name of the table the statement reads or writes.
    pub fn table(&self) -> &str {
        match self {
            Statement::CreateTable(stmt) => &stmt.table,
            Statement::DropTable(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Select(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
        }
    }

    /// True if executing the statement may change table contents.
    pub fn is_write(&self) -> bool {
        !matches!(self, Statement::Select(_))
    }
}
