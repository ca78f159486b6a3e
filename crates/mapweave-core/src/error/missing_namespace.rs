use super::Error;

/// Error when the root element has no `namespace` attribute.
#[derive(Debug)]
pub(super) struct MissingNamespaceError {
    root: Box<str>,
}

impl std::error::Error for MissingNamespaceError {}

impl core::fmt::Display for MissingNamespaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "root element <{}> has no `namespace` attribute",
            self.root
        )
    }
}

impl Error {
    /// Creates a missing namespace error for the given root element name.
    pub fn missing_namespace(root: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingNamespace(MissingNamespaceError {
            root: root.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing namespace error.
    pub fn is_missing_namespace(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingNamespace(_)))
    }
}
