use super::{ShopRepository, StorageError};
use crate::domain::shop::{NewUser, Product, User};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process repository used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryShopRepository {
    users: RwLock<Vec<User>>,
    products: RwLock<Vec<Product>>,
}

impl MemoryShopRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShopRepository for MemoryShopRepository {
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StorageError::DuplicateEmail(user.email));
        }
        let user = user.into_user();
        users.push(user.clone());
        Ok(user)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.products.read().await.clone())
    }

    async fn create_product(&self, product: Product) -> Result<Product, StorageError> {
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<Option<Product>, StorageError> {
        let mut products = self.products.write().await;
        let index = products.iter().position(|p| p.id == id);
        Ok(index.map(|idx| products.remove(idx)))
    }
}
