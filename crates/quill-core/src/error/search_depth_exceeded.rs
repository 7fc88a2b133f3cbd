use super::Error;

/// Error when a deep search recurses past the configured maximum depth.
///
/// Relationship graphs may contain cycles; a path that keeps hopping through
/// them is stopped here instead of recursing until the stack overflows.
#[derive(Debug)]
pub(super) struct SearchDepthExceeded {
    max_depth: usize,
    segment: Box<str>,
}

impl std::error::Error for SearchDepthExceeded {}

impl core::fmt::Display for SearchDepthExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "deep search exceeded the maximum depth of {} at `{}`",
            self.max_depth, self.segment
        )
    }
}

impl Error {
    pub fn search_depth_exceeded(max_depth: usize, segment: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SearchDepthExceeded(SearchDepthExceeded {
            max_depth,
            segment: segment.into().into(),
        }))
    }

    pub fn is_search_depth_exceeded(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::SearchDepthExceeded(_)))
    }
}
