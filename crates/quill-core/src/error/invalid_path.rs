use super::Error;

/// Error when a deep search path cannot be followed.
#[derive(Debug)]
pub(super) struct InvalidPath {
    segment: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidPath {}

impl core::fmt::Display for InvalidPath {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid search path at `{}`: {}",
            self.segment, self.reason
        )
    }
}

impl Error {
    /// Creates an invalid path error naming the offending segment.
    pub fn invalid_path(segment: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidPath(InvalidPath {
            segment: segment.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid path error.
    pub fn is_invalid_path(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidPath(_)))
    }
}
