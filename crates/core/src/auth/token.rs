//! HS256 bearer tokens.
//!
//! Tokens carry the user id and role with an expiry fixed at issuance.
//! There is no refresh flow: an expired token means logging in again.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Role;

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub role: Role,
    /// Issued-at (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration (UTC Unix timestamp).
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token.")]
    Invalid,
    #[error("Token expired.")]
    Expired,
    #[error("token encoding failed: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// Issue a token for the given account.
pub fn issue_token(user_id: Uuid, role: Role, config: &TokenConfig) -> Result<String, TokenError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        user_id,
        role,
        iat: now,
        exp: now + config.expiry_hours * 3600,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

/// Verify signature and expiry, telling expiry apart from every other
/// failure.
pub fn verify_token(token: &str, config: &TokenConfig) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        }
    }

    #[test]
    fn issue_and_verify() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, Role::Editor, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, Role::Editor);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        // Well past the default 60-second leeway.
        let claims = Claims {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let token = issue_token(Uuid::new_v4(), Role::Admin, &test_config()).unwrap();
        let other = TokenConfig {
            secret: "a-different-secret".to_string(),
            expiry_hours: 24,
        };
        assert!(matches!(
            verify_token(&token, &other),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            verify_token("not.a.jwt", &test_config()),
            Err(TokenError::Invalid)
        ));
    }
}
