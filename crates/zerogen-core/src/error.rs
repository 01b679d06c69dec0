use std::sync::Arc;

/// Creates an ad-hoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while generating a schema.
///
/// Everything here is a configuration error in one form or another:
/// generation is all-or-nothing, so the first error aborts the run.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    /// The source schema document is malformed (duplicate columns, dangling
    /// relation endpoints, missing primary keys, ...).
    InvalidSchema(String),

    /// The generator configuration does not match the source schema
    /// (unknown columns in an allow-list, ambiguous junctions, ...).
    InvalidConfig(String),

    /// Ad-hoc error message.
    Adhoc(String),

    /// Bridged error from `anyhow` (I/O, deserialization, ...).
    Anyhow(anyhow::Error),
}

impl Error {
    /// Creates an error describing a malformed source schema.
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        Self::from(ErrorKind::InvalidSchema(msg.into()))
    }

    /// Creates an error describing a configuration that does not match the
    /// source schema.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::from(ErrorKind::InvalidConfig(msg.into()))
    }

    #[doc(hidden)]
    pub fn from_args(args: std::fmt::Arguments<'_>) -> Self {
        Self::from(ErrorKind::Adhoc(args.to_string()))
    }

    /// Returns true if this is a source schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(*self.inner, ErrorKind::InvalidSchema(_))
    }

    /// Returns true if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(*self.inner, ErrorKind::InvalidConfig(_))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &*self.inner {
            ErrorKind::InvalidSchema(msg) => write!(f, "invalid schema: {msg}"),
            ErrorKind::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            ErrorKind::Adhoc(msg) => f.write_str(msg),
            ErrorKind::Anyhow(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Error").field("kind", &self.inner).finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::from(anyhow::Error::from(err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::from(anyhow::Error::from(err))
    }
}
