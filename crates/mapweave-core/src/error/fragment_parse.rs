use super::Error;

/// Error when a template renders a fragment that cannot be spliced into the
/// document.
#[derive(Debug)]
pub(super) struct FragmentParseError {
    operation: Box<str>,
    message: Box<str>,
}

impl std::error::Error for FragmentParseError {}

impl core::fmt::Display for FragmentParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "generated fragment for `{}` is not well-formed: {}",
            self.operation, self.message
        )
    }
}

impl Error {
    /// Creates a fragment parse error for the given operation.
    pub fn fragment_parse(operation: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FragmentParse(FragmentParseError {
            operation: operation.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a fragment parse error.
    pub fn is_fragment_parse(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::FragmentParse(_)))
    }
}
