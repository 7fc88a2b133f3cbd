use super::Value;
use crate::{Error, Result};

/// Comparison operator of a [`Criterion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Before,
    After,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
    Between,
    In,
    NotIn,
    Empty,
    NotEmpty,
}

/// Number of operands an operator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Zero,
    One,
    Two,
    /// One or more
    Many,
}

impl Operator {
    pub fn arity(self) -> Arity {
        use Operator::*;

        match self {
            Eq | Neq | Gt | Gte | Lt | Lte | Before | After | Like | NotLike => Arity::One,
            IsNull | IsNotNull | Empty | NotEmpty => Arity::Zero,
            Between => Arity::Two,
            In | NotIn => Arity::Many,
        }
    }

    pub fn as_str(self) -> &'static str {
        use Operator::*;

        match self {
            Eq => "EQ",
            Neq => "NEQ",
            Gt => "GT",
            Gte => "GTE",
            Lt => "LT",
            Lte => "LTE",
            Before => "BEFORE",
            After => "AFTER",
            Like => "LIKE",
            NotLike => "NOT_LIKE",
            IsNull => "ISNULL",
            IsNotNull => "ISNOTNULL",
            Between => "BETWEEN",
            In => "IN",
            NotIn => "NOT_IN",
            Empty => "EMPTY",
            NotEmpty => "NOT_EMPTY",
        }
    }
}

impl core::fmt::Display for Operator {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter condition: `field operator operands`.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    field: String,
    operator: Operator,
    operands: Vec<Value>,
}

impl Criterion {
    /// Creates a criterion, checking the operand count against the operator.
    ///
    /// `IN` and `NOT_IN` require at least one operand; an empty list has no
    /// agreed meaning and is rejected.
    pub fn new(field: impl Into<String>, operator: Operator, operands: Vec<Value>) -> Result<Self> {
        let field = field.into();

        let ok = match operator.arity() {
            Arity::Zero => operands.is_empty(),
            Arity::One => operands.len() == 1,
            Arity::Two => operands.len() == 2,
            Arity::Many => !operands.is_empty(),
        };

        if !ok {
            return Err(Error::invalid_criterion(format!(
                "{operator} on field `{field}` expects {} operand(s), got {}",
                match operator.arity() {
                    Arity::Zero => "0",
                    Arity::One => "1",
                    Arity::Two => "2",
                    Arity::Many => "1 or more",
                },
                operands.len()
            )));
        }

        Ok(Criterion {
            field,
            operator,
            operands,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    fn fixed(field: impl Into<String>, operator: Operator, operands: Vec<Value>) -> Self {
        debug_assert!(!matches!(operator.arity(), Arity::Many));

        Criterion {
            field: field.into(),
            operator,
            operands,
        }
    }
}

/// An ordered list of criteria, ANDed together when compiled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example {
    criteria: Vec<Criterion>,
}

macro_rules! one_operand {
    ($( $(#[$attr:meta])* $name:ident => $op:ident; )*) => {
        $(
            $(#[$attr])*
            pub fn $name(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
                self.push(Criterion::fixed(field, Operator::$op, vec![value.into()]))
            }
        )*
    };
}

macro_rules! no_operand {
    ($( $(#[$attr:meta])* $name:ident => $op:ident; )*) => {
        $(
            $(#[$attr])*
            pub fn $name(self, field: impl Into<String>) -> Self {
                self.push(Criterion::fixed(field, Operator::$op, vec![]))
            }
        )*
    };
}

impl Example {
    pub fn new() -> Example {
        Example::default()
    }

    /// Adds a criterion built from raw parts.
    pub fn add(
        &mut self,
        field: impl Into<String>,
        operator: Operator,
        operands: Vec<Value>,
    ) -> Result<&mut Self> {
        self.criteria.push(Criterion::new(field, operator, operands)?);
        Ok(self)
    }

    pub fn push(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    one_operand! {
        eq => Eq;
        neq => Neq;
        gt => Gt;
        gte => Gte;
        lt => Lt;
        lte => Lte;
        before => Before;
        after => After;
        /// Prefix match: the value is followed by any suffix.
        like => Like;
        not_like => NotLike;
    }

    no_operand! {
        is_null => IsNull;
        is_not_null => IsNotNull;
        /// Null or the empty string.
        empty => Empty;
        not_empty => NotEmpty;
    }

    pub fn between(
        self,
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.push(Criterion::fixed(
            field,
            Operator::Between,
            vec![low.into(), high.into()],
        ))
    }

    pub fn in_list<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let values = values.into_iter().map(Into::into).collect();
        Ok(self.push(Criterion::new(field, Operator::In, values)?))
    }

    pub fn not_in_list<V: Into<Value>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let values = values.into_iter().map(Into::into).collect();
        Ok(self.push(Criterion::new(field, Operator::NotIn, values)?))
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
