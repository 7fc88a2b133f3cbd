use super::Error;
use crate::stmt::Operator;

#[derive(Debug)]
pub(super) enum InvalidCriterion {
    /// The criterion is malformed (wrong operand count, unknown field).
    Malformed { message: Box<str> },

    /// The operator cannot be applied to the field.
    Unsupported { operator: Operator, field: Box<str> },
}

impl std::error::Error for InvalidCriterion {}

impl core::fmt::Display for InvalidCriterion {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            InvalidCriterion::Malformed { message } => write!(f, "invalid criterion: {message}"),
            InvalidCriterion::Unsupported { operator, field } => {
                write!(f, "unsupported criterion: {operator} on field `{field}`")
            }
        }
    }
}

impl Error {
    /// Creates an error for a malformed criterion.
    pub fn invalid_criterion(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidCriterion(
            InvalidCriterion::Malformed {
                message: message.into().into(),
            },
        ))
    }

    /// Creates an error for an operator that cannot be compiled against a field.
    pub fn unsupported_criterion(operator: Operator, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidCriterion(
            InvalidCriterion::Unsupported {
                operator,
                field: field.into().into(),
            },
        ))
    }

    /// Returns `true` if this error, or any error it wraps, is a criterion error.
    pub fn is_invalid_criterion(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidCriterion(_)))
    }

    /// Returns `true` if the error names an operator the field cannot support.
    pub fn is_unsupported_criterion(&self) -> bool {
        self.any_kind(|kind| {
            matches!(
                kind,
                super::ErrorKind::InvalidCriterion(InvalidCriterion::Unsupported { .. })
            )
        })
    }
}
