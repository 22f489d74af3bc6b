//! Document storage for shop users and products.

use crate::domain::shop::{NewUser, Product, User};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryShopRepository;
pub use postgres::PgShopRepository;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// The operations the shop service needs from its backing store.
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), StorageError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Inserts the user unless the email is already taken. The check and the
    /// insert happen atomically.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    async fn list_products(&self) -> Result<Vec<Product>, StorageError>;

    async fn create_product(&self, product: Product) -> Result<Product, StorageError>;

    /// Removes and returns the product, or `None` if no product has this id.
    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, StorageError>;
}
