use crate::domain::item::Item;
use crate::transport::http::handlers::common::{item_error_response, parse_item_id};
use crate::transport::http::types::{json_422, ApiResponse, ItemsState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

const NO_ITEM_WITH_ID: &str = "No item with ID found";
const ITEM_NOT_FOUND: &str = "item not found";

fn ok(message: &str, data: Option<JsonValue>) -> axum::response::Response {
    let body = match data {
        Some(data) => ApiResponse::message(message).with_data(data),
        None => ApiResponse::message(message),
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All items in insertion order", body = ApiResponse),
        (status = 500, description = "Store is empty", body = ApiResponse)
    )
)]
pub async fn list_items_handler(State(state): State<ItemsState>) -> impl IntoResponse {
    let service = state.item_service.lock().await;
    match service.list_all() {
        Ok(items) => {
            let data = JsonValue::Array(items.iter().map(Item::to_json).collect());
            ok("success", Some(data))
        }
        Err(e) => item_error_response(e, NO_ITEM_WITH_ID),
    }
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item found", body = ApiResponse),
        (status = 400, description = "No item with this id", body = ApiResponse)
    )
)]
pub async fn get_item_handler(
    State(state): State<ItemsState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_item_id(&id) else {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::message(NO_ITEM_WITH_ID))).into_response();
    };
    let service = state.item_service.lock().await;
    match service.get_one(id) {
        Ok(item) => ok("item found", Some(item.to_json())),
        Err(e) => item_error_response(e, NO_ITEM_WITH_ID),
    }
}

#[utoipa::path(
    post,
    path = "/items",
    request_body(content = ItemRequest, description = "Extra fields are stored and returned unchanged"),
    responses(
        (status = 200, description = "Item added", body = ApiResponse),
        (status = 400, description = "Validation failure or duplicate id", body = ApiResponse),
        (status = 422, description = "Body is not valid JSON", body = ApiResponse)
    )
)]
pub async fn add_item_handler(
    State(state): State<ItemsState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e).into_response(),
    };
    let mut service = state.item_service.lock().await;
    match service.add(&body) {
        Ok(item) => ok("item successfully added", Some(item.to_json())),
        Err(e) => item_error_response(e, NO_ITEM_WITH_ID),
    }
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = i64, Path, description = "Item id; must equal the id in the body")),
    request_body(content = ItemRequest, description = "Replacement item"),
    responses(
        (status = 200, description = "Item replaced", body = ApiResponse),
        (status = 400, description = "Not found, validation failure, or id change", body = ApiResponse),
        (status = 422, description = "Body is not valid JSON", body = ApiResponse)
    )
)]
pub async fn update_item_handler(
    State(state): State<ItemsState>,
    Path(id): Path<String>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Some(id) = parse_item_id(&id) else {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::message(ITEM_NOT_FOUND))).into_response();
    };
    let Json(body) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e).into_response(),
    };
    let mut service = state.item_service.lock().await;
    match service.update(id, &body) {
        Ok(item) => ok("update successful", Some(item.to_json())),
        Err(e) => item_error_response(e, ITEM_NOT_FOUND),
    }
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item deleted", body = ApiResponse),
        (status = 400, description = "No item with this id", body = ApiResponse)
    )
)]
pub async fn delete_item_handler(
    State(state): State<ItemsState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_item_id(&id) else {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::message(ITEM_NOT_FOUND))).into_response();
    };
    let mut service = state.item_service.lock().await;
    match service.delete(id) {
        Ok(_) => ok("delete successful", None),
        Err(e) => item_error_response(e, ITEM_NOT_FOUND),
    }
}

pub async fn root_handler() -> &'static str {
    "Hello, World!"
}
