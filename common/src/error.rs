use thiserror::Error;

/// All possible error types that may occur while preparing or decoding portal API payloads
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Invalid request. {reason}\nRequest: {request}")]
    InvalidRequest { request: String, reason: String },
    #[error("JSON error\n{0}")]
    Json(#[from] serde_json::Error),
    #[error("Generic error\n{0}")]
    Generic(String),
}

impl PortalError {
    /// Short message describing the error that is suitable to show an end user. Validation errors
    /// only show the reason, never the request contents.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest { reason, .. } => reason.clone(),
            Self::Json(_) => "Could not read the response from the server".to_owned(),
            Self::Generic(message) => message.clone(),
        }
    }
}

impl From<&str> for PortalError {
    fn from(value: &str) -> Self {
        Self::Generic(value.to_owned())
    }
}

impl From<String> for PortalError {
    fn from(value: String) -> Self {
        Self::Generic(value)
    }
}

/// Generic [Result][std::result::Result] type where the error is always [PortalError]
pub type PortalResult<T> = std::result::Result<T, PortalError>;
