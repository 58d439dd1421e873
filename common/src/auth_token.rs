use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server_config::AuthConfig;

pub const KIND_ACCESS: &str = "access";
pub const KIND_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
    pub token_kind: String,
    // Role claim embedded in the session token
    pub user_type: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Wrong token kind: expected {expected}, got {got}")]
    WrongKind { expected: &'static str, got: String },
}

fn issue(
    cfg: &AuthConfig,
    account_id: i64,
    username: &str,
    user_type: &str,
    kind: &str,
    ttl_minutes: i64,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        iss: cfg.issuer.clone(),
        sub: account_id.to_string(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp() as usize,
        iat: now.timestamp() as usize,
        jti: Uuid::new_v4().simple().to_string(),
        token_kind: kind.to_string(),
        user_type: user_type.to_string(),
        username: username.to_string(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Issue the access/refresh pair handed out at login.
pub fn issue_tokens(
    cfg: &AuthConfig,
    account_id: i64,
    username: &str,
    user_type: &str,
) -> Result<TokenPair, TokenError> {
    Ok(TokenPair {
        access: issue(
            cfg,
            account_id,
            username,
            user_type,
            KIND_ACCESS,
            cfg.access_ttl_minutes,
        )?,
        refresh: issue(
            cfg,
            account_id,
            username,
            user_type,
            KIND_REFRESH,
            cfg.refresh_ttl_minutes,
        )?,
    })
}

/// Validate a bearer token and return its claims. Refresh tokens are not
/// accepted on the API surface.
pub fn decode_access(cfg: &AuthConfig, token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )?;
    if data.claims.token_kind != KIND_ACCESS {
        return Err(TokenError::WrongKind {
            expected: KIND_ACCESS,
            got: data.claims.token_kind,
        });
    }
    Ok(data.claims)
}

/// One-time account activation token, consumed on first use.
pub fn generate_activation_token() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "unit-test-secret".to_string(),
            issuer: "hms-server".to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_minutes: 1440,
        }
    }

    #[test]
    fn issue_and_decode_roundtrip() {
        let cfg = test_config();
        let pair = issue_tokens(&cfg, 42, "jdoe", "patient").unwrap();
        let claims = decode_access(&cfg, &pair.access).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "jdoe");
        assert_eq!(claims.user_type, "patient");
        assert_eq!(claims.iss, "hms-server");
    }

    #[test]
    fn refresh_token_rejected_on_api() {
        let cfg = test_config();
        let pair = issue_tokens(&cfg, 42, "jdoe", "doctor").unwrap();
        let err = decode_access(&cfg, &pair.refresh).unwrap_err();
        assert!(matches!(err, TokenError::WrongKind { .. }));
    }

    #[test]
    fn wrong_secret_rejected() {
        let cfg = test_config();
        let pair = issue_tokens(&cfg, 42, "jdoe", "doctor").unwrap();
        let mut other = test_config();
        other.secret = "another-secret".to_string();
        assert!(decode_access(&other, &pair.access).is_err());
    }

    #[test]
    fn wrong_issuer_rejected() {
        let cfg = test_config();
        let pair = issue_tokens(&cfg, 7, "jdoe", "doctor").unwrap();
        let mut other = test_config();
        other.issuer = "someone-else".to_string();
        assert!(decode_access(&other, &pair.access).is_err());
    }

    #[test]
    fn activation_tokens_are_unique() {
        assert_ne!(generate_activation_token(), generate_activation_token());
        assert_eq!(generate_activation_token().len(), 32);
    }
}
