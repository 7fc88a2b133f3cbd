use super::{ty::ColumnType, Comma, Formatter, Ident, Params, ToSql};

use crate::stmt::{self, Projection, Statement};

use quill_core::schema::ColumnDef;

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

struct ColumnsWithConstraints<'a>(&'a stmt::CreateTable);

impl ToSql for ColumnsWithConstraints<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let columns = &self.0.columns.columns;

        for (index, column) in columns.iter().enumerate() {
            fmt!(f, "\n    " column);
            if index < columns.len() - 1 {
                fmt!(f, ",");
            }
        }

        match self.0.columns.primary_key() {
            Some(pk) => fmt!(f, ",\n    PRIMARY KEY (" Ident(&pk.name) ")\n"),
            None => fmt!(f, "\n"),
        }
    }
}

impl ToSql for &ColumnDef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let not_null = if self.nullable && !self.primary_key {
            ""
        } else {
            " NOT NULL"
        };

        fmt!(f, Ident(&self.name) " " ColumnType(self) not_null);
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let columns = ColumnsWithConstraints(self);

        fmt!(f, "CREATE TABLE " if_not_exists Ident(&self.table) " (" columns ")");
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        fmt!(f, "DROP TABLE " if_exists Ident(&self.table));
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let filter = &self.filter;

        fmt!(f, "DELETE FROM " Ident(&self.table) filter);
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        if self.values.is_empty() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
            return;
        }

        let columns = Comma(self.values.iter().map(|(column, _)| Ident(column)));
        let values = Comma(self.values.iter().map(|(_, value)| value));

        fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")");
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let projection = &self.projection;
        let filter = &self.filter;

        fmt!(f, "SELECT " projection " FROM " Ident(&self.table) filter);
    }
}

impl ToSql for &Projection {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Projection::Columns(columns) => fmt!(f, Comma(columns.iter().map(Ident))),
            Projection::Count => fmt!(f, "COUNT(*)"),
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let assignments = Comma(
            self.assignments
                .iter()
                .map(|(column, value)| (Ident(column), (" = ", value))),
        );
        let filter = &self.filter;

        fmt!(f, "UPDATE " Ident(&self.table) " SET " assignments filter);
    }
}
