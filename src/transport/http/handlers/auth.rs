use crate::transport::http::types::{json_422, LoginResponse, RegisterResponse, ShopState, UserDetail};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = RegisterResponse),
        (status = 400, description = "Email taken or user could not be created", body = MessageResponse),
        (status = 422, description = "Role is not admin or customer", body = MessageResponse)
    )
)]
pub async fn register_handler(
    State(state): State<ShopState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e).into_response(),
    };
    match state.shop_service.register(&body).await {
        Ok(user) => (
            StatusCode::OK,
            Json(RegisterResponse {
                message: format!("New {} added successfully", user.role),
                new_user: user,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed token issued", body = LoginResponse),
        (status = 401, description = "Wrong password", body = MessageResponse),
        (status = 404, description = "No user with this email", body = MessageResponse)
    )
)]
pub async fn login_handler(
    State(state): State<ShopState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e).into_response(),
    };
    match state.shop_service.login(&body).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(LoginResponse {
                message: "Login successful".to_string(),
                token: outcome.token,
                user_detail: UserDetail {
                    full_name: outcome.user.full_name,
                    role: outcome.user.role,
                },
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
