// src/bin/shop_server.rs

use item_shop_api::crypto::TokenIssuer;
use item_shop_api::infra::{config::ShopConfig, logging};
use item_shop_api::transport;
use item_shop_api::{MemoryShopRepository, PgShopRepository, ShopRepository, ShopService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = ShopConfig::from_env()?;

    // --- Store ---
    let repo: Arc<dyn ShopRepository> = match &config.database_url {
        Some(url) => {
            let repo = PgShopRepository::connect(url).await?;
            info!("connected to the db");
            Arc::new(repo)
        }
        None => {
            warn!("DB_URL not set; users and products are kept in memory");
            Arc::new(MemoryShopRepository::new())
        }
    };

    let tokens = TokenIssuer::new(&config.jwt_key, config.jwt_ttl);
    let app_state = transport::http::ShopState {
        shop_service: Arc::new(ShopService::new(repo, tokens)),
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_shop_router(app_state).merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", transport::http::ShopApiDoc::openapi()),
    );
    let app = transport::http::with_common_layers(app).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("shop API listening on http://{}", listener.local_addr()?);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
