//! Registration, login and product management for the shop API.

use crate::app::error::ShopError;
use crate::crypto::{hash_password, verify_password, Claims, TokenIssuer};
use crate::domain::schema::FieldRule;
use crate::domain::shop::{NewProduct, NewUser, Product, Role, User};
use crate::storage::shop::{ShopRepository, StorageError};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

pub struct ShopService {
    repo: Arc<dyn ShopRepository>,
    tokens: TokenIssuer,
}

impl ShopService {
    pub fn new(repo: Arc<dyn ShopRepository>, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }

    pub fn repository(&self) -> &Arc<dyn ShopRepository> {
        &self.repo
    }

    pub async fn register(&self, body: &JsonValue) -> Result<User, ShopError> {
        // Role is checked on its own and first; an absent role fails later with
        // the generic registration error.
        let role = match body.get("role").filter(|v| !v.is_null()) {
            Some(value) => {
                FieldRule::one_of("value", Role::ALLOWED)
                    .check(value)
                    .map_err(ShopError::InvalidRole)?;
                value.as_str().and_then(|s| s.parse::<Role>().ok())
            }
            None => None,
        };

        let full_name = non_empty_str(body, "fullName");
        let email = non_empty_str(body, "email");
        let password = non_empty_str(body, "password");
        let (Some(role), Some(full_name), Some(email), Some(password)) =
            (role, full_name, email, password)
        else {
            return Err(ShopError::RegistrationFailed(
                "fullName, email, password and role are required".to_string(),
            ));
        };

        if self.repo.find_user_by_email(&email).await?.is_some() {
            return Err(ShopError::EmailTaken);
        }

        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ShopError::Internal(e.to_string()))??;

        let user = self
            .repo
            .create_user(NewUser {
                full_name,
                email,
                password_hash,
                role,
            })
            .await
            .map_err(|e| match e {
                StorageError::DuplicateEmail(_) => ShopError::EmailTaken,
                other => ShopError::RegistrationFailed(other.to_string()),
            })?;

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    pub async fn login(&self, body: &JsonValue) -> Result<LoginOutcome, ShopError> {
        let email = body.get("email").and_then(|v| v.as_str()).unwrap_or_default();
        let password = body
            .get("password")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let Some(user) = self.repo.find_user_by_email(email).await? else {
            return Err(ShopError::UnknownEmail(email.to_string()));
        };

        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| ShopError::Internal(e.to_string()))??;
        if !matches {
            warn!(user_id = %user.id, "login rejected: bad password");
            return Err(ShopError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, "login successful");
        Ok(LoginOutcome { token, user })
    }

    /// Resolves the caller from an `Authorization` header value (`Bearer <token>`).
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Claims, ShopError> {
        let header = authorization
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ShopError::MissingToken)?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ShopError::MissingToken)?;
        self.tokens.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ShopError::InvalidToken
        })
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ShopError> {
        Ok(self.repo.list_products().await?)
    }

    pub async fn add_product(
        &self,
        caller: &Claims,
        body: &JsonValue,
    ) -> Result<Product, ShopError> {
        if !caller.role.can_write_products() {
            return Err(ShopError::Forbidden("Only admins can add products"));
        }
        let product = NewProduct::parse(body)
            .map_err(ShopError::InvalidProduct)?
            .into_product(caller.user_id);
        let product = self.repo.create_product(product).await?;
        info!(product_id = %product.id, owner_id = %caller.user_id, "product created");
        Ok(product)
    }

    pub async fn delete_product(&self, caller: &Claims, id: &str) -> Result<Product, ShopError> {
        if !caller.role.can_write_products() {
            return Err(ShopError::Forbidden("Only admins can delete products"));
        }
        // An id that is not a UUID cannot name a stored product.
        let id = Uuid::parse_str(id).map_err(|_| ShopError::ProductNotFound)?;
        let deleted = self
            .repo
            .delete_product(id)
            .await?
            .ok_or(ShopError::ProductNotFound)?;
        info!(product_id = %id, "product deleted");
        Ok(deleted)
    }
}

fn non_empty_str(body: &JsonValue, key: &str) -> Option<String> {
    body.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
