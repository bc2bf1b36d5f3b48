use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    Network,
    Http,
    Parse,
    Validation,
}

/// Every way a random request can fail, from input checks to body decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request never produced a response: connect, DNS, timeout, bad URL.
    #[error("network error: {0}")]
    Network(String),
    #[error("service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Parse(String),
    /// Rejected before dispatch.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl RequestError {
    pub fn kind(&self) -> RequestErrorKind {
        match self {
            Self::Network(_) => RequestErrorKind::Network,
            Self::Http { .. } => RequestErrorKind::Http,
            Self::Parse(_) => RequestErrorKind::Parse,
            Self::Validation(_) => RequestErrorKind::Validation,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Parse(value.to_string());
        }
        Self::Network(value.to_string())
    }
}
