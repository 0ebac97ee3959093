use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
    /// The backend rejected the stored token. Callers should drop the session.
    SessionExpired,
}

/// The outcome of a user action, as it would appear in a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Turns a failed action into its notice, using `fallback` when the backend
    /// gave no message of its own.
    pub fn from_error(err: &crate::error::ConsoleError, fallback: &str) -> Self {
        let kind = match err {
            crate::error::ConsoleError::Unauthorized => NoticeKind::SessionExpired,
            _ => NoticeKind::Error,
        };
        Self {
            kind,
            message: err.user_message(fallback),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
            NoticeKind::SessionExpired => "expired",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}
