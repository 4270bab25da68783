//! UI/backend events and error modeling for the fulfillment client.

use client_core::ClientError;
use shared::{
    domain::{PackSize, Product, ProductId},
    error::ErrorCode,
    protocol::FulfillmentResult,
};

use crate::controller::state::RequestTicket;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    CatalogLoaded(Vec<Product>),
    CatalogLoadFailed(UiError),
    PackSizesLoaded {
        ticket: RequestTicket,
        product_id: ProductId,
        packs: Vec<PackSize>,
    },
    PackSizesLoadFailed {
        ticket: RequestTicket,
        product_id: ProductId,
        error: UiError,
    },
    PackSizesSaved {
        ticket: RequestTicket,
        product_id: ProductId,
        packs: Vec<PackSize>,
    },
    PackSizesSaveFailed {
        ticket: RequestTicket,
        product_id: ProductId,
        error: UiError,
    },
    FulfillmentComputed {
        ticket: RequestTicket,
        result: FulfillmentResult,
    },
    FulfillmentFailed {
        ticket: RequestTicket,
        error: UiError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    NotFound,
    Transport,
    Server,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CatalogLoad,
    PackSetLoad,
    PackSetSave,
    Fulfillment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Api(api) => match api.code {
                ErrorCode::Validation => UiErrorCategory::Validation,
                ErrorCode::NotFound => UiErrorCategory::NotFound,
                ErrorCode::Internal => UiErrorCategory::Server,
                ErrorCode::Rejected => UiErrorCategory::Unknown,
            },
            ClientError::Http(_) => UiErrorCategory::Transport,
            ClientError::InvalidServerUrl { .. } | ClientError::Unavailable(_) => {
                UiErrorCategory::Configuration
            }
        };

        Self {
            category,
            context,
            message: err.user_message(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("server url")
            || message_lower.contains("scheme")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Load failures are logged only; saves, fulfillment requests and
    /// startup problems are shown to the user.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::BackendStartup
                | UiErrorContext::PackSetSave
                | UiErrorContext::Fulfillment
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
