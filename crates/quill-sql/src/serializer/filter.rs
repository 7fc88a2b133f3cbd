use super::{Delimited, Formatter, Ident, Params, ToSql};

use crate::stmt::{BinaryOp, Filter, Predicate};

/// The predicates of a filter joined by `AND`, without the `WHERE` keyword.
pub(super) struct Conjunction<'a>(pub(super) &'a Filter);

impl ToSql for Conjunction<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Delimited(&self.0.predicates, " AND "));
    }
}

impl ToSql for &Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if !self.is_empty() {
            fmt!(f, " WHERE " Conjunction(self));
        }
    }
}

impl ToSql for &Predicate {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Predicate::Compare { column, op, value } => {
                fmt!(f, Ident(column) " " op " " value);
            }
            Predicate::Between { column, low, high } => {
                fmt!(f, Ident(column) " BETWEEN " low " AND " high);
            }
            Predicate::IsNull { column, negate } => {
                let test = if *negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, Ident(column) test);
            }
            Predicate::Like {
                column,
                pattern,
                negate,
            } => {
                let op = if *negate { " NOT LIKE " } else { " LIKE " };
                fmt!(f, Ident(column) op pattern);
            }
            Predicate::AnyEq {
                column,
                values,
                negate,
            } => {
                let not = if *negate { "NOT " } else { "" };
                let tests = values.iter().map(|value| (Ident(column), (" = ", value)));
                fmt!(f, not "(" Delimited(tests, " OR ") ")");
            }
            Predicate::Empty { column, negate } => {
                if *negate {
                    fmt!(f, "(" Ident(column) " IS NOT NULL AND " Ident(column) " <> '')");
                } else {
                    fmt!(f, "(" Ident(column) " IS NULL OR " Ident(column) " = '')");
                }
            }
        }
    }
}

impl ToSql for &BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            match self {
                BinaryOp::Eq => "=",
                BinaryOp::Ne => "<>",
                BinaryOp::Gt => ">",
                BinaryOp::Ge => ">=",
                BinaryOp::Lt => "<",
                BinaryOp::Le => "<=",
            }
        );
    }
}
