//! Error type for calls against the fulfillment service.

use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Connection, timeout or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid server url `{url}`: {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("{0}")]
    Unavailable(String),
}

impl ClientError {
    /// Text shown inline next to the control that triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(err) => err.message.clone(),
            other => other.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
