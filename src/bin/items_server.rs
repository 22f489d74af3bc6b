// src/bin/items_server.rs

use item_shop_api::infra::{config::ItemsConfig, logging};
use item_shop_api::transport;
use item_shop_api::ItemService;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = ItemsConfig::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        empty_list_policy = ?config.empty_list_policy,
        "items configuration loaded"
    );

    // The store lives exactly as long as this process.
    let app_state = transport::http::ItemsState {
        item_service: Arc::new(Mutex::new(ItemService::new(config.empty_list_policy))),
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_items_router(app_state).merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", transport::http::ItemsApiDoc::openapi()),
    );
    let app = transport::http::with_common_layers(app).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("items API listening on http://{}", listener.local_addr()?);
    info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received; in-memory items are discarded");
        }
    }

    Ok(())
}
