//! End-to-end tests for the shop API over the in-memory repository.

use chrono::Duration;
use item_shop_api::crypto::TokenIssuer;
use item_shop_api::{transport, MemoryShopRepository, ShopService};
use serde_json::{json, Value};
use std::sync::Arc;

async fn spawn_shop_api() -> Result<String, Box<dyn std::error::Error>> {
    let service = ShopService::new(
        Arc::new(MemoryShopRepository::new()),
        TokenIssuer::new("integration-secret", Duration::minutes(30)),
    );
    let state = transport::http::ShopState {
        shop_service: Arc::new(service),
    };
    let router = transport::http::with_common_layers(transport::http::create_shop_router(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

async fn send(
    req: reqwest::RequestBuilder,
) -> Result<(u16, Value), Box<dyn std::error::Error>> {
    let resp = req.send().await?;
    let status = resp.status().as_u16();
    Ok((status, resp.json::<Value>().await?))
}

async fn register_and_login(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    role: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let (status, _) = send(client.post(format!("{}/auth/register", base_url)).json(&json!({
        "fullName": "Test User",
        "email": email,
        "password": "correct horse",
        "role": role
    })))
    .await?;
    assert_eq!(status, 200);

    let (status, body) = send(client.post(format!("{}/auth/login", base_url)).json(&json!({
        "email": email,
        "password": "correct horse"
    })))
    .await?;
    assert_eq!(status, 200);
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn registration_and_login() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_shop_api().await?;
    let client = reqwest::Client::new();
    let register_url = format!("{}/auth/register", base_url);

    let (status, body) = send(client.post(&register_url).json(&json!({
        "fullName": "Ada", "email": "ada@example.com", "password": "pw", "role": "superuser"
    })))
    .await?;
    assert_eq!(status, 422);
    assert_eq!(body["message"], "\"value\" must be one of [admin, customer]");

    let (status, body) = send(client.post(&register_url).json(&json!({
        "fullName": "Ada", "email": "ada@example.com", "password": "pw", "role": "customer"
    })))
    .await?;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "New customer added successfully");
    assert_eq!(body["newUser"]["email"], "ada@example.com");
    assert_eq!(body["newUser"]["role"], "customer");
    assert!(body["newUser"].get("passwordHash").is_none());

    let (status, body) = send(client.post(&register_url).json(&json!({
        "fullName": "Ada 2", "email": "ada@example.com", "password": "pw", "role": "admin"
    })))
    .await?;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "message": "email already exists" }));

    let (status, body) = send(client.post(&register_url).json(&json!({ "role": "admin" }))).await?;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "message": "Unable to create User" }));

    let login_url = format!("{}/auth/login", base_url);
    let (status, body) = send(
        client
            .post(&login_url)
            .json(&json!({ "email": "nobody@example.com", "password": "pw" })),
    )
    .await?;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "No registered user with email: nobody@example.com");

    let (status, body) = send(
        client
            .post(&login_url)
            .json(&json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await?;
    assert_eq!(status, 401);
    assert_eq!(body["message"], "invalid credentials");

    let (status, body) = send(
        client
            .post(&login_url)
            .json(&json!({ "email": "ada@example.com", "password": "pw" })),
    )
    .await?;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["userDetail"], json!({ "fullName": "Ada", "role": "customer" }));
    assert!(body["token"].as_str().map(|t| t.split('.').count() == 3).unwrap_or(false));

    Ok(())
}

#[tokio::test]
async fn product_writes_require_admin() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_shop_api().await?;
    let client = reqwest::Client::new();
    let products_url = format!("{}/products", base_url);

    let resp = client.get(&products_url).send().await?;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await?, "No products available");

    let mug = json!({ "productName": "Mug", "cost": 12.5, "productImages": ["mug.png"] });

    let (status, body) = send(client.post(&products_url).json(&mug)).await?;
    assert_eq!(status, 401);
    assert_eq!(body["message"], "Access denied. No token provided");

    let (status, body) = send(client.post(&products_url).bearer_auth("garbage").json(&mug)).await?;
    assert_eq!(status, 401);
    assert_eq!(body["message"], "Invalid token");

    let customer = register_and_login(&client, &base_url, "c@example.com", "customer").await?;
    let (status, body) = send(client.post(&products_url).bearer_auth(&customer).json(&mug)).await?;
    assert_eq!(status, 403);
    assert_eq!(body["message"], "Only admins can add products");

    let admin = register_and_login(&client, &base_url, "a@example.com", "admin").await?;
    let (status, body) = send(
        client
            .post(&products_url)
            .bearer_auth(&admin)
            .json(&json!({ "cost": 3 })),
    )
    .await?;
    assert_eq!(status, 422);
    assert_eq!(body["message"], "\"productName\" is required");

    let (status, body) = send(client.post(&products_url).bearer_auth(&admin).json(&mug)).await?;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Product created");
    assert_eq!(body["newProduct"]["productName"], "Mug");
    assert_eq!(body["newProduct"]["productImages"], json!(["mug.png"]));
    let product_id = body["newProduct"]["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(client.get(&products_url)).await?;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));

    let item_url = format!("{}/products/{}", base_url, product_id);
    let (status, body) = send(client.delete(&item_url).bearer_auth(&customer)).await?;
    assert_eq!(status, 403);
    assert_eq!(body["message"], "Only admins can delete products");

    let (status, body) = send(client.delete(&item_url).bearer_auth(&admin)).await?;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Product deleted");
    assert_eq!(body["deleted"]["id"], product_id.as_str());

    let (status, body) = send(client.delete(&item_url).bearer_auth(&admin)).await?;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Product not found");

    Ok(())
}

#[tokio::test]
async fn health_and_unknown_routes() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = spawn_shop_api().await?;
    let client = reqwest::Client::new();

    let (status, body) = send(client.get(format!("{}/health", base_url))).await?;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(client.get(format!("{}/orders", base_url))).await?;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "message": "Route not found", "path": "/orders" }));
    Ok(())
}
