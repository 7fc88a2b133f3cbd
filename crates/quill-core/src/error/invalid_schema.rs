use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - A field combines incompatible options (a size on a DATE field, a key
///   target on a primary key, a default on a BINARY field)
/// - A model declares duplicate field names or more than one primary key
/// - A key target names a model or field that is not registered
///
/// These errors are raised while models are being defined, before any
/// statement reaches the database.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidSchema(_)))
    }
}
