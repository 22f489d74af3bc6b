use crate::crypto::CryptoError;
use crate::domain::schema::ValidationError;
use crate::storage::shop::StorageError;
use thiserror::Error;

/// Outcomes of item operations other than success.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("No item existing")]
    EmptyStore,
    #[error("item {0} not found")]
    NotFound(i64),
    #[error("item with id already exists")]
    DuplicateId(i64),
    #[error("you are not allowed to change the id")]
    IdChangeForbidden { path_id: i64, body_id: i64 },
}

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("{0}")]
    InvalidRole(ValidationError),
    #[error("email already exists")]
    EmailTaken,
    #[error("Unable to create User")]
    RegistrationFailed(String),
    #[error("No registered user with email: {0}")]
    UnknownEmail(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("Access denied. No token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    InvalidProduct(ValidationError),
    #[error("Product not found")]
    ProductNotFound,
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Crypto(#[from] CryptoError),
    #[error("{0}")]
    Internal(String),
}
