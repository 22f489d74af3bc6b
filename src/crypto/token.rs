//! Signed session tokens (HS256 JWT).

use super::CryptoError;
use crate::domain::shop::{Role, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, CryptoError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| CryptoError::Token("token lifetime out of range".to_string()))?;
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CryptoError::Token(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, CryptoError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| CryptoError::Token(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shop::NewUser;

    fn admin() -> User {
        NewUser {
            full_name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Admin,
        }
        .into_user()
    }

    #[test]
    fn issued_token_verifies() {
        let issuer = TokenIssuer::new("secret", Duration::minutes(5));
        let user = admin();
        let claims = issuer.verify(&issuer.issue(&user).unwrap()).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.email, "root@example.com");
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = TokenIssuer::new("a", Duration::minutes(5))
            .issue(&admin())
            .unwrap();
        assert!(TokenIssuer::new("b", Duration::minutes(5)).verify(&token).is_err());
    }

    #[test]
    fn oversized_lifetime_is_an_error() {
        let issuer = TokenIssuer::new("secret", Duration::try_days(200_000_000).unwrap());
        assert!(matches!(issuer.issue(&admin()), Err(CryptoError::Token(_))));
    }

    #[test]
    fn expired_token_rejected() {
        // Past the default 60s leeway.
        let issuer = TokenIssuer::new("secret", Duration::minutes(-5));
        let token = issuer.issue(&admin()).unwrap();
        assert!(issuer.verify(&token).is_err());
    }
}
