use super::Error;

/// Error when a capability contract declares an operation that the
/// template provider cannot render.
///
/// This is a configuration mismatch between contracts and templates and is
/// never recovered from.
#[derive(Debug)]
pub(super) struct UnknownOperationError {
    operation: Box<str>,
}

impl std::error::Error for UnknownOperationError {}

impl core::fmt::Display for UnknownOperationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "no statement template for operation `{}`",
            self.operation
        )
    }
}

impl Error {
    /// Creates an unknown operation error.
    pub fn unknown_operation(operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownOperation(UnknownOperationError {
            operation: operation.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown operation error.
    pub fn is_unknown_operation(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::UnknownOperation(_)))
    }
}
