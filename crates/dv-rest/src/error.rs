//! Error types for dataverse-rest.
//!
//! Every failure surfaces as a distinct, typed condition so calling code can
//! branch on failure kind. There is no automatic retry of any kind.

/// Result type alias for dataverse-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for dataverse-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error is an authentication or authorization
    /// rejection (HTTP 401/403, or a failed token acquisition).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Auth { .. } | ErrorKind::TokenAcquisition(_)
        )
    }

    /// Returns true if this error is a 404 for a specific entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Auth { status, .. } => Some(*status),
            ErrorKind::Api { status, .. } => Some(*status),
            ErrorKind::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Authentication or authorization rejected (HTTP 401/403).
    #[error("Authentication error: HTTP {status}: {message}")]
    Auth { status: u16, message: String },

    /// Entry not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx API response, with the original body preserved.
    #[error("Dataverse API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Connection, DNS, or timeout failure before an HTTP status existed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON decoding of a response body failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration (bad base URL, client construction failure).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token acquisition failed while connecting.
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Transport(format!("request timed out: {err}"))
        } else if err.is_connect() {
            ErrorKind::Transport(format!("connection failed: {err}"))
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

impl From<dataverse_auth::Error> for Error {
    fn from(err: dataverse_auth::Error) -> Self {
        let kind = if err.is_config_error() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::TokenAcquisition(err.to_string())
        };
        Error::with_source(kind, err)
    }
}
