use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    Validation,
    Internal,
    /// Any other client-side rejection (auth, rate limiting, ...).
    Rejected,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            400 | 409 | 422 => Self::Validation,
            400..=499 => Self::Rejected,
            _ => Self::Internal,
        }
    }
}

/// A non-success response from the fulfillment service.
///
/// The service answers failures with a plain-text body; that body (trimmed)
/// is the message shown to the user. An empty body falls back to
/// `Error: <status>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, status: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            status,
            message: message.into(),
        }
    }

    pub fn from_response(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("Error: {status}")
        } else {
            body.to_string()
        };
        Self::new(ErrorCode::from_status(status), status, message)
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
