use super::Error;

/// Error when a row handed to a write operation is incomplete.
///
/// Raised when a required field has no value on insert, or when an update row
/// does not carry its primary key.
#[derive(Debug)]
pub(super) struct InvalidRecord {
    message: Box<str>,
}

impl std::error::Error for InvalidRecord {}

impl core::fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid record: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidRecord(InvalidRecord {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid record error.
    pub fn is_invalid_record(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidRecord(_)))
    }
}
