use super::Value;

/// Comparison operators with a direct SQL spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

/// One typed condition over a single column.
///
/// Operand values are always bound as parameters, never written into the SQL
/// text.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column <op> ?`
    Compare {
        column: String,
        op: BinaryOp,
        value: Value,
    },

    /// `column BETWEEN ? AND ?`
    Between {
        column: String,
        low: Value,
        high: Value,
    },

    /// `column IS [NOT] NULL`
    IsNull { column: String, negate: bool },

    /// `column [NOT] LIKE ?`
    Like {
        column: String,
        pattern: Value,
        negate: bool,
    },

    /// `(column = ? OR column = ? ...)`, wrapped in `NOT` when negated.
    AnyEq {
        column: String,
        values: Vec<Value>,
        negate: bool,
    },

    /// `(column IS NULL OR column = '')` or its negation
    /// `(column IS NOT NULL AND column <> '')`.
    Empty { column: String, negate: bool },
}

impl Predicate {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Predicate {
        Predicate::Compare {
            column: column.into(),
            op: BinaryOp::Eq,
            value: value.into(),
        }
    }

    /// Matches rows whose column equals any of `values`.
    pub fn any_eq(column: impl Into<String>, values: Vec<Value>) -> Predicate {
        Predicate::AnyEq {
            column: column.into(),
            values,
            negate: false,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Predicate::Compare { column, .. }
            | Predicate::Between { column, .. }
            | Predicate::IsNull { column, .. }
            | Predicate::Like { column, .. }
            | Predicate::AnyEq { column, .. }
            | Predicate::Empty { column, .. } => column,
        }
    }

    /// Number of parameters the predicate binds.
    pub fn param_count(&self) -> usize {
        match self {
            Predicate::Compare { .. } | Predicate::Like { .. } => 1,
            Predicate::Between { .. } => 2,
            Predicate::AnyEq { values, .. } => values.len(),
            Predicate::IsNull { .. } | Predicate::Empty { .. } => 0,
        }
    }
}

/// A `WHERE` clause: predicates ANDed in order. Empty matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub predicates: Vec<Predicate>,
}

impl Filter {
    /// Matches every row; serializes to no `WHERE` clause at all.
    pub fn all() -> Filter {
        Filter::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Filter {
        self.predicates.push(predicate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn param_count(&self) -> usize {
        self.predicates.iter().map(Predicate::param_count).sum()
    }
}

impl From<Predicate> for Filter {
    fn from(value: Predicate) -> Self {
        Filter {
            predicates: vec![value],
        }
    }
}
