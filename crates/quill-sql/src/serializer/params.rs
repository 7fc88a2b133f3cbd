use super::{Formatter, ToSql};

use quill_core::{driver::Flavor, stmt::Value};

pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// One-based position of a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        // Writing to a `String` never fails.
        let _ = match f.serializer.flavor() {
            Flavor::Mysql => write!(f.dst, "?"),
            Flavor::Postgresql => write!(f.dst, "${}", self.0),
            Flavor::Sqlite => write!(f.dst, "?{}", self.0),
        };
    }
}

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}
