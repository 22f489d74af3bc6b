use crate::transport::http::handlers::common::{panic_response, route_not_found};
use crate::transport::http::handlers::{auth, health, items, products};
use crate::transport::http::types::{
    ApiResponse, CreateProductRequest, CreateProductResponse, DeleteProductResponse,
    ItemRequest, ItemsState, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    ShopState, UserDetail,
};
use crate::domain::shop::{Product, Role, User};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::items_healthcheck_handler,
        items::list_items_handler,
        items::get_item_handler,
        items::add_item_handler,
        items::update_item_handler,
        items::delete_item_handler
    ),
    components(schemas(ApiResponse, ItemRequest))
)]
pub struct ItemsApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::shop_healthcheck_handler,
        auth::register_handler,
        auth::login_handler,
        products::list_products_handler,
        products::create_product_handler,
        products::delete_product_handler
    ),
    components(schemas(
        MessageResponse,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        UserDetail,
        CreateProductRequest,
        CreateProductResponse,
        DeleteProductResponse,
        Product,
        User,
        Role
    )),
    modifiers(&BearerAuth)
)]
pub struct ShopApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Unknown paths and unsupported methods both answer with the JSON 404.
pub fn create_items_router(state: ItemsState) -> Router {
    Router::new()
        .route("/", get(items::root_handler).fallback(route_not_found))
        .route(
            "/health",
            get(health::items_healthcheck_handler).fallback(route_not_found),
        )
        .route(
            "/items",
            get(items::list_items_handler)
                .post(items::add_item_handler)
                .fallback(route_not_found),
        )
        .route(
            "/items/:id",
            get(items::get_item_handler)
                .put(items::update_item_handler)
                .delete(items::delete_item_handler)
                .fallback(route_not_found),
        )
        .with_state(state)
}

pub fn create_shop_router(state: ShopState) -> Router {
    Router::new()
        .route(
            "/health",
            get(health::shop_healthcheck_handler).fallback(route_not_found),
        )
        .route(
            "/auth/register",
            post(auth::register_handler).fallback(route_not_found),
        )
        .route("/auth/login", post(auth::login_handler).fallback(route_not_found))
        .route(
            "/products",
            get(products::list_products_handler)
                .post(products::create_product_handler)
                .fallback(route_not_found),
        )
        .route(
            "/products/:id",
            axum::routing::delete(products::delete_product_handler).fallback(route_not_found),
        )
        .with_state(state)
}

/// Layers shared by both servers: request tracing, panic-to-500, JSON 404 fallback.
/// Apply after merging any extra routes (e.g. Swagger UI) so the fallback covers them.
pub fn with_common_layers(router: Router) -> Router {
    router
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}
