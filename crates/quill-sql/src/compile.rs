//! Compiles an [`Example`] against a [`Model`] into a typed [`Filter`].
//!
//! Criteria are ANDed in declaration order. Operand values are encoded
//! through the codec and bound as parameters; only column names taken from
//! the model reach the SQL text.

use crate::stmt::{BinaryOp, Filter, Predicate};

use quill_core::{
    codec,
    schema::{Cast, Field, Model},
    stmt::{Criterion, Example, Operator, Value},
    Error, Result,
};

pub fn compile(model: &Model, example: &Example) -> Result<Filter> {
    let mut filter = Filter::all();

    for criterion in example.criteria() {
        filter = filter.and(predicate(model, criterion)?);
    }

    Ok(filter)
}

fn predicate(model: &Model, criterion: &Criterion) -> Result<Predicate> {
    let operator = criterion.operator();

    let field = model.field(criterion.field()).ok_or_else(|| {
        Error::invalid_criterion(format!(
            "model `{}` has no field `{}`",
            model.name(),
            criterion.field()
        ))
    })?;

    if field.is_associative() {
        return Err(Error::unsupported_criterion(operator, field.name()));
    }

    let column = field.name().to_string();

    let predicate = match operator {
        Operator::Eq => compare(column, BinaryOp::Eq, field, criterion)?,
        Operator::Neq => compare(column, BinaryOp::Ne, field, criterion)?,
        Operator::Gt | Operator::After => compare(column, BinaryOp::Gt, field, criterion)?,
        Operator::Gte => compare(column, BinaryOp::Ge, field, criterion)?,
        Operator::Lt | Operator::Before => compare(column, BinaryOp::Lt, field, criterion)?,
        Operator::Lte => compare(column, BinaryOp::Le, field, criterion)?,
        Operator::Like | Operator::NotLike => {
            if field.cast() == Cast::Binary {
                return Err(Error::unsupported_criterion(operator, field.name()));
            }

            let pattern = match codec::encode(single(criterion)?, field.cast())? {
                Value::Null => {
                    return Err(Error::invalid_criterion(format!(
                        "{operator} on field `{}` needs a non-null pattern",
                        field.name()
                    )))
                }
                value => Value::String(format!("{value}%")),
            };

            Predicate::Like {
                column,
                pattern,
                negate: operator == Operator::NotLike,
            }
        }
        Operator::IsNull | Operator::IsNotNull => Predicate::IsNull {
            column,
            negate: operator == Operator::IsNotNull,
        },
        Operator::Between => match criterion.operands() {
            [low, high] => Predicate::Between {
                column,
                low: codec::encode(low, field.cast())?,
                high: codec::encode(high, field.cast())?,
            },
            operands => return Err(arity_mismatch(criterion, operands.len())),
        },
        Operator::In | Operator::NotIn => {
            if criterion.operands().is_empty() {
                return Err(arity_mismatch(criterion, 0));
            }

            let values = criterion
                .operands()
                .iter()
                .map(|value| codec::encode(value, field.cast()))
                .collect::<Result<Vec<_>>>()?;

            Predicate::AnyEq {
                column,
                values,
                negate: operator == Operator::NotIn,
            }
        }
        Operator::Empty | Operator::NotEmpty => Predicate::Empty {
            column,
            negate: operator == Operator::NotEmpty,
        },
    };

    Ok(predicate)
}

fn compare(
    column: String,
    op: BinaryOp,
    field: &Field,
    criterion: &Criterion,
) -> Result<Predicate> {
    Ok(Predicate::Compare {
        column,
        op,
        value: codec::encode(single(criterion)?, field.cast())?,
    })
}

fn single(criterion: &Criterion) -> Result<&Value> {
    match criterion.operands() {
        [value] => Ok(value),
        operands => Err(arity_mismatch(criterion, operands.len())),
    }
}

fn arity_mismatch(criterion: &Criterion, got: usize) -> Error {
    Error::invalid_criterion(format!(
        "{} on field `{}` got {got} operand(s)",
        criterion.operator(),
        criterion.field()
    ))
}
