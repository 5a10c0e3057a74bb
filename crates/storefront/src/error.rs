//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server errors are captured to
//! Sentry before responding; clients never see internal details.
//!
//! Only critical-path failures become an `AppError`. Secondary fetches settle
//! into a failed deferred state and render inline instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prier_core::variant::ResolveError;
use thiserror::Error;

use crate::shopify::ShopifyError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(ShopifyError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A route was reached without the path parameter it is registered with.
    #[error("Missing route parameter: {0}")]
    MissingRouteParameter(&'static str),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ShopifyError> for AppError {
    fn from(error: ShopifyError) -> Self {
        match error {
            ShopifyError::NotFound(what) => Self::NotFound(what),
            other => Self::Shopify(other),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(error: ResolveError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(error: tower_sessions::session::Error) -> Self {
        Self::Internal(format!("session: {error}"))
    }
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(ShopifyError::RateLimited(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Shopify(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingRouteParameter(_) | Self::Render(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::MissingRouteParameter(_) | Self::Render(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Shopify(_) => "External service error".to_string(),
            Self::NotFound(what) => what.clone(),
            Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
