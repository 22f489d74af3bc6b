use crate::app::{ItemService, ShopService};
use crate::domain::shop::{Product, Role, User};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::sync::Mutex;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct ItemsState {
    /// One lock around the whole service: each request runs its lookup and
    /// write without interleaving with another request.
    pub item_service: Arc<Mutex<ItemService>>,
}

#[derive(Clone)]
pub struct ShopState {
    pub shop_service: Arc<ShopService>,
}

/// Envelope used by every JSON response of the items API.
#[derive(Serialize, Debug, Default, ToSchema)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Only set on route-not-found responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Documented shape of an item body. Handlers take raw JSON so that unknown
/// fields pass through and validation messages come from the item schema.
#[derive(Debug, ToSchema)]
pub struct ItemRequest {
    pub id: i64,
    /// 1 to 30 characters.
    pub name: String,
    pub description: String,
}

/// `{ "message": ... }` body used by the shop API for every failure.
#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub new_user: User,
}

#[derive(Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub full_name: String,
    pub role: Role,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user_detail: UserDetail,
}

#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    pub cost: f64,
    pub product_images: Vec<String>,
    pub description: Option<String>,
    pub stock_status: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResponse {
    pub message: String,
    pub new_product: Product,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DeleteProductResponse {
    pub message: String,
    pub deleted: Product,
}

/// Malformed or non-JSON request bodies.
pub fn json_422(err: JsonRejection) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::error(format!("Invalid JSON body: {}", err))),
    )
}
