use reqwest::StatusCode;

/// Every failure the console can surface.
///
/// The variants follow the three failure classes of the dashboard: input rejected
/// before any request is sent (`Validation`), the backend or network refusing the
/// request (`Api`, `Network`, `Unauthorized`), and local trouble reading what came back
/// or what is stored on disk.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Validation(String),

    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("session expired or rejected, log in again")]
    Unauthorized,

    #[error("this action needs an administrator account")]
    Forbidden,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid session token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }

    /// The text a user sees for this failure: validation text as written, the
    /// backend's own `message` when it sent one, and `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ConsoleError::Validation(message) => message.clone(),
            ConsoleError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ConsoleError::Unauthorized | ConsoleError::Forbidden | ConsoleError::NotLoggedIn => {
                self.to_string()
            }
            _ => fallback.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }
}
