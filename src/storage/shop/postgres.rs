//! PostgreSQL-backed shop repository.

use super::{ShopRepository, StorageError};
use crate::domain::shop::{NewUser, Product, Role, User};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const CREATE_USERS_SQL: &str = "CREATE TABLE IF NOT EXISTS shop_users (
    id UUID PRIMARY KEY,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)";

const CREATE_PRODUCTS_SQL: &str = "CREATE TABLE IF NOT EXISTS shop_products (
    id UUID PRIMARY KEY,
    product_name TEXT NOT NULL,
    cost DOUBLE PRECISION NOT NULL,
    product_images TEXT[] NOT NULL DEFAULT '{}',
    description TEXT,
    stock_status TEXT,
    owner_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)";

const PRODUCT_COLUMNS: &str =
    "id, product_name, cost, product_images, description, stock_status, owner_id, created_at";

#[derive(Clone)]
pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    /// Connects and makes sure the shop tables exist.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> Result<Self, StorageError> {
        sqlx::query(CREATE_USERS_SQL).execute(&pool).await?;
        sqlx::query(CREATE_PRODUCTS_SQL).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn user_from_row(row: &PgRow) -> Result<User, StorageError> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: role.parse::<Role>().map_err(StorageError::Corrupt)?,
        created_at: row.try_get("created_at")?,
    })
}

fn product_from_row(row: &PgRow) -> Result<Product, StorageError> {
    Ok(Product {
        id: row.try_get("id")?,
        product_name: row.try_get("product_name")?,
        cost: row.try_get("cost")?,
        product_images: row.try_get("product_images")?,
        description: row.try_get("description")?,
        stock_status: row.try_get("stock_status")?,
        owner_id: row.try_get("owner_id")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ShopRepository for PgShopRepository {
    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            "SELECT id, full_name, email, password_hash, role, created_at
             FROM shop_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let user = user.into_user();
        let result = sqlx::query(
            "INSERT INTO shop_users (id, full_name, email, password_hash, role, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            // The UNIQUE constraint on email makes the check-and-insert atomic.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StorageError::DuplicateEmail(user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        let sql = format!(
            "SELECT {} FROM shop_products ORDER BY created_at, id",
            PRODUCT_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(product_from_row).collect()
    }

    async fn create_product(&self, product: Product) -> Result<Product, StorageError> {
        sqlx::query(
            "INSERT INTO shop_products
                (id, product_name, cost, product_images, description, stock_status, owner_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(product.id)
        .bind(&product.product_name)
        .bind(product.cost)
        .bind(&product.product_images)
        .bind(&product.description)
        .bind(&product.stock_status)
        .bind(product.owner_id)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;
        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, StorageError> {
        let sql = format!(
            "DELETE FROM shop_products WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose()
    }
}
