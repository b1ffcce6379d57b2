use std::io;

/// Stable code carried by request-class errors returned from the RMS API
/// client and the fragment parser.
pub const ERR_REQUEST_CODE: u16 = 1000;

#[derive(Debug)]
pub enum Error {
    /// Setter input rejected: URL, token, output path, or cluster ID.
    Validation(String),
    /// RMS API failure: request construction, transport, status, or decode.
    Request { code: u16, message: String },
    /// A kubeconfig fragment failed to parse; the message names the cluster.
    Parse { code: u16, message: String },
    /// The config file could not be created or written.
    Filesystem { message: String, source: io::Error },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn request(message: impl Into<String>) -> Self {
        Error::Request {
            code: ERR_REQUEST_CODE,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            code: ERR_REQUEST_CODE,
            message: message.into(),
        }
    }

    pub fn filesystem(message: impl Into<String>, source: io::Error) -> Self {
        Error::Filesystem {
            message: message.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True for request-class failures, including fragment parse failures.
    pub fn is_request(&self) -> bool {
        matches!(self, Error::Request { .. } | Error::Parse { .. })
    }

    pub fn is_filesystem(&self) -> bool {
        matches!(self, Error::Filesystem { .. })
    }

    /// The stable code for request-class errors, None otherwise.
    pub fn code(&self) -> Option<u16> {
        match self {
            Error::Request { code, .. } | Error::Parse { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(message) => write!(f, "validation error: {}", message),
            Error::Request { code, message } | Error::Parse { code, message } => {
                write!(f, "code: {}, message: {}", code, message)
            }
            Error::Filesystem { message, source } => write!(f, "{}: {}", message, source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Filesystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Filesystem {
            message: "filesystem error".to_string(),
            source: error,
        }
    }
}
