use super::Error;

/// Error when the `BaseResultMap` exists but cannot be used.
///
/// This occurs when:
/// - A mapping child lacks its `column` or `property` attribute
/// - The result map declares more than one `<id>` mapping
/// - A key-based statement is rendered but no `<id>` mapping exists
#[derive(Debug)]
pub(super) struct InvalidResultMapError {
    message: Box<str>,
}

impl std::error::Error for InvalidResultMapError {}

impl core::fmt::Display for InvalidResultMapError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid `BaseResultMap`: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid result map error.
    pub fn invalid_result_map(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResultMap(InvalidResultMapError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid result map error.
    pub fn is_invalid_result_map(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidResultMap(_)))
    }
}
