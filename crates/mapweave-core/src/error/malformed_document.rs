use super::Error;

/// Error when the input is not well-formed markup.
///
/// This covers invalid UTF-8, unclosed or mismatched tags, more than one
/// root element, and non-whitespace text outside of the root element.
#[derive(Debug)]
pub(super) struct MalformedDocumentError {
    message: Box<str>,
}

impl std::error::Error for MalformedDocumentError {}

impl core::fmt::Display for MalformedDocumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed mapping document: {}", self.message)
    }
}

impl Error {
    /// Creates a malformed document error.
    pub fn malformed_document(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MalformedDocument(MalformedDocumentError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a malformed document error.
    pub fn is_malformed_document(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MalformedDocument(_)))
    }
}
