use thiserror::Error;

/// Monitoring API client error types
#[derive(Error, Debug)]
pub enum IsMonError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Login failed: {0}")]
    LoginFailed(#[source] Box<IsMonError>),

    #[error("HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("API errors: {}", .0.join("; "))]
    ApiErrors(Vec<String>),

    #[error("Unhandled response: {0}")]
    UnhandledResponse(serde_json::Value),
}

/// Result type for monitoring API operations
pub type IsMonResult<T> = Result<T, IsMonError>;

/// Coarse failure category, for callers that branch on the cause of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, or a body that could not be read or decoded
    Transport,
    /// The server answered with a status other than 200
    HttpStatus,
    /// A well-formed API error payload (`statusCode` or `errors`)
    ApiError,
    /// A 200 response whose body matched no known shape
    UnrecognizedResponse,
    /// Login was rejected or its response was unusable
    Authentication,
}

impl IsMonError {
    /// Create an HTTP status error
    pub fn status_error(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create an API error from a status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::Json(_) | Self::Url(_) => ErrorKind::Transport,
            Self::Auth(_) | Self::LoginFailed(_) => ErrorKind::Authentication,
            Self::Status { .. } => ErrorKind::HttpStatus,
            Self::Api { .. } | Self::ApiErrors(_) => ErrorKind::ApiError,
            Self::UnhandledResponse(_) => ErrorKind::UnrecognizedResponse,
        }
    }

    /// True when the server rejected the session (HTTP 401). The client never
    /// re-logs in on its own; callers may `logout` and retry.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. } | Self::Api { status: 401, .. })
    }
}
