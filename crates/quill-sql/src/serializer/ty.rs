use super::{Formatter, Params, ToSql};

use quill_core::{
    driver::Flavor,
    schema::{ColumnDef, TypeCode},
};

/// Database type of a column, derived from its type code.
pub(super) struct ColumnType<'a>(pub(super) &'a ColumnDef);

impl ToSql for ColumnType<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        let flavor = f.serializer.flavor();
        let varchar = f.serializer.capability.varchar;
        let size = self.0.size;

        // Writing to a `String` never fails.
        let _ = match (self.0.code, flavor) {
            (TypeCode::String, Flavor::Sqlite) => write!(f.dst, "TEXT"),
            (TypeCode::String, _) => match (size, varchar) {
                (Some(size), Some(max)) if size <= max => write!(f.dst, "VARCHAR({size})"),
                _ => write!(f.dst, "TEXT"),
            },
            (TypeCode::Integer, Flavor::Sqlite) => write!(f.dst, "INTEGER"),
            (TypeCode::Integer, _) => write!(f.dst, "BIGINT"),
            (TypeCode::Numeric, _) => match size {
                Some(size) => write!(f.dst, "NUMERIC({size})"),
                None => write!(f.dst, "NUMERIC"),
            },
            (TypeCode::Binary, Flavor::Postgresql) => write!(f.dst, "BYTEA"),
            (TypeCode::Binary, Flavor::Mysql) => write!(f.dst, "LONGBLOB"),
            (TypeCode::Binary, Flavor::Sqlite) => write!(f.dst, "BLOB"),
            (TypeCode::Date, _) => write!(f.dst, "DATE"),
            (TypeCode::Time, Flavor::Postgresql) => write!(f.dst, "TIMESTAMP"),
            (TypeCode::Time, _) => write!(f.dst, "DATETIME"),
        };
    }
}
