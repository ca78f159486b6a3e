mod adhoc;
mod fragment_parse;
mod invalid_result_map;
mod malformed_document;
mod missing_base_result_map;
mod missing_namespace;
mod unknown_operation;

use adhoc::AdhocError;
use fragment_parse::FragmentParseError;
use invalid_result_map::InvalidResultMapError;
use malformed_document::MalformedDocumentError;
use missing_base_result_map::MissingBaseResultMapError;
use missing_namespace::MissingNamespaceError;
use std::sync::Arc;
use unknown_operation::UnknownOperationError;

/// Creates an ad-hoc [`Error`](crate::Error) from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while merging a mapping document.
///
/// Every error is fatal to the merge in which it occurs. The batch driver
/// decides whether a failed document aborts the run.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    debug_assert!(
                        inner.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    inner.kind
                }
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Creates an ad-hoc error from pre-formatted arguments. Used by the
    /// [`err!`] macro.
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(args.to_string())))
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    /// True if any error in the context chain matches `f`.
    fn any_kind(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(err.kind()))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    MalformedDocument(MalformedDocumentError),
    MissingNamespace(MissingNamespaceError),
    MissingBaseResultMap(MissingBaseResultMapError),
    InvalidResultMap(InvalidResultMapError),
    UnknownOperation(UnknownOperationError),
    FragmentParse(FragmentParseError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            MalformedDocument(err) => core::fmt::Display::fmt(err, f),
            MissingNamespace(err) => core::fmt::Display::fmt(err, f),
            MissingBaseResultMap(err) => core::fmt::Display::fmt(err, f),
            InvalidResultMap(err) => core::fmt::Display::fmt(err, f),
            UnknownOperation(err) => core::fmt::Display::fmt(err, f),
            FragmentParse(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown mapweave error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = err!("root cause");
        let chained = root.context(err!("middle context")).context(err!("top context"));
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
    }

    #[test]
    fn predicates_see_through_context() {
        let err = Error::missing_base_result_map("com.acme.UserMapper")
            .context(err!("failed to merge mapper"));

        assert!(err.is_missing_base_result_map());
        assert!(!err.is_missing_namespace());
        assert_eq!(
            err.to_string(),
            "failed to merge mapper: mapper `com.acme.UserMapper` does not define a `BaseResultMap` result map"
        );
    }

    #[test]
    fn std_error_bridge() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let our_err: Error = io_err.into();
        assert!(our_err.to_string().contains("file not found"));
    }

    #[test]
    fn malformed_document_display() {
        let err = Error::malformed_document("unexpected end of input");
        assert!(err.is_malformed_document());
        assert_eq!(
            err.to_string(),
            "malformed mapping document: unexpected end of input"
        );
    }

    #[test]
    fn unknown_operation_display() {
        let err = Error::unknown_operation("selectByExample");
        assert!(err.is_unknown_operation());
        assert_eq!(
            err.to_string(),
            "no statement template for operation `selectByExample`"
        );
    }

    #[test]
    fn fragment_parse_display() {
        let err = Error::fragment_parse("insert", "missing closing tag");
        assert!(err.is_fragment_parse());
        assert_eq!(
            err.to_string(),
            "generated fragment for `insert` is not well-formed: missing closing tag"
        );
    }
}
