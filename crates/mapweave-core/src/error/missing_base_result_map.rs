use super::Error;

/// Error when a document bound to a table has no `BaseResultMap`.
///
/// Column mappings are read from that result map, so nothing can be
/// synthesized without it.
#[derive(Debug)]
pub(super) struct MissingBaseResultMapError {
    namespace: Box<str>,
}

impl std::error::Error for MissingBaseResultMapError {}

impl core::fmt::Display for MissingBaseResultMapError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "mapper `{}` does not define a `BaseResultMap` result map",
            self.namespace
        )
    }
}

impl Error {
    /// Creates a missing `BaseResultMap` error.
    pub fn missing_base_result_map(namespace: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingBaseResultMap(
            MissingBaseResultMapError {
                namespace: namespace.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a missing `BaseResultMap` error.
    pub fn is_missing_base_result_map(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingBaseResultMap(_)))
    }
}
