use crate::app::{ItemError, ShopError};
use crate::transport::http::types::{ApiResponse, MessageResponse};
use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::any::Any;
use tracing::{error, warn};

/// Maps an item outcome to status + body. `not_found` is the message the
/// calling endpoint reports for a missing id.
pub fn item_error_response(err: ItemError, not_found: &str) -> Response {
    let (status, body) = match &err {
        ItemError::Validation(e) => (StatusCode::BAD_REQUEST, ApiResponse::error(e.message.clone())),
        ItemError::EmptyStore => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiResponse::message(err.to_string()),
        ),
        ItemError::NotFound(_) => (StatusCode::BAD_REQUEST, ApiResponse::message(not_found)),
        ItemError::DuplicateId(_) | ItemError::IdChangeForbidden { .. } => {
            (StatusCode::BAD_REQUEST, ApiResponse::message(err.to_string()))
        }
    };
    warn!(error = ?err, status = status.as_u16(), "item request rejected");
    (status, Json(body)).into_response()
}

/// Path ids are compared as integers; anything that does not parse cannot match.
pub fn parse_item_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

impl ShopError {
    pub fn status(&self) -> StatusCode {
        match self {
            ShopError::InvalidRole(_) | ShopError::InvalidProduct(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ShopError::EmailTaken | ShopError::RegistrationFailed(_) => StatusCode::BAD_REQUEST,
            ShopError::UnknownEmail(_) | ShopError::ProductNotFound => StatusCode::NOT_FOUND,
            ShopError::InvalidCredentials | ShopError::MissingToken | ShopError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            ShopError::Forbidden(_) => StatusCode::FORBIDDEN,
            ShopError::Storage(_) | ShopError::Crypto(_) | ShopError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "shop request failed");
        } else if let ShopError::RegistrationFailed(reason) = &self {
            warn!(%reason, "registration failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "shop request rejected");
        }
        (
            status,
            Json(MessageResponse {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Fallback for unknown paths and unsupported methods.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::message("Route not found").with_path(uri.to_string())),
    )
}

/// Turns a handler panic into a 500 carrying the panic text.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal server error".to_string()
    };
    error!(%message, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse { message }),
    )
        .into_response()
}
