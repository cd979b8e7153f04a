use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("No API credential configured")]
    MissingCredential,

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Service returned an empty response")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GenAiError {
    /// Whether a second attempt has a reasonable chance of succeeding
    pub fn is_transient(&self) -> bool {
        match self {
            GenAiError::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            GenAiError::Status { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            GenAiError::EmptyResponse | GenAiError::Timeout => true,
            GenAiError::MissingCredential
            | GenAiError::InvalidResponse(_)
            | GenAiError::InvalidConfig(_) => false,
        }
    }
}

pub type GenAiResult<T> = Result<T, GenAiError>;
