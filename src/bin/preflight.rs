use item_shop_api::infra::config::ShopConfig;
use item_shop_api::infra::logging;
use item_shop_api::{PgShopRepository, ShopRepository};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Checks the shop server configuration.\n\
         Requires env vars:\n\
           JWT_KEY\n\
         Optional:\n\
           PORT, DB_URL, JWT_TTL_MINUTES\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = ShopConfig::from_env()?;

    println!("> Preflight:");
    println!("  PORT={}", config.port);
    println!("  JWT_KEY=<{} bytes>", config.jwt_key.len());
    println!("  JWT_TTL_MINUTES={}", config.jwt_ttl.num_minutes());
    if config.jwt_key.len() < 32 {
        eprintln!("  Warning: JWT_KEY is shorter than 32 bytes.");
    }

    match &config.database_url {
        Some(url) => {
            let repo = PgShopRepository::connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to DB_URL: {}", e))?;
            repo.ping().await?;
            let products = repo.list_products().await?;
            println!("  Database reachable; shop tables ready ({} products).", products.len());
        }
        None => {
            println!("  DB_URL not set: the server will keep data in memory.");
        }
    }

    println!("> Preflight OK.");
    Ok(())
}
