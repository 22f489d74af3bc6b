use crate::app::ShopError;
use crate::crypto::Claims;
use crate::transport::http::types::{json_422, CreateProductResponse, DeleteProductResponse, ShopState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

fn caller(state: &ShopState, headers: &HeaderMap) -> Result<Claims, ShopError> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    state.shop_service.authenticate(authorization)
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products, or the text `No products available`", body = [Product]),
        (status = 500, description = "Store failure", body = MessageResponse)
    )
)]
pub async fn list_products_handler(State(state): State<ShopState>) -> impl IntoResponse {
    match state.shop_service.list_products().await {
        Ok(products) if products.is_empty() => {
            (StatusCode::OK, "No products available").into_response()
        }
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Product created", body = CreateProductResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse),
        (status = 422, description = "Invalid product", body = MessageResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<ShopState>,
    headers: HeaderMap,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let claims = match caller(&state, &headers) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };
    let Json(body) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e).into_response(),
    };
    match state.shop_service.add_product(&claims, &body).await {
        Ok(product) => (
            StatusCode::CREATED,
            Json(CreateProductResponse {
                message: "Product created".to_string(),
                new_product: product,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id (UUID)")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Product deleted", body = DeleteProductResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<ShopState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let claims = match caller(&state, &headers) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };
    match state.shop_service.delete_product(&claims, &id).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(DeleteProductResponse {
                message: "Product deleted".to_string(),
                deleted,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
