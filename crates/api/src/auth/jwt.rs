//! Signed bearer-token codec.
//!
//! Access and refresh tokens share one wire format: a JWT whose only
//! payload is an opaque subject (the access- or refresh-token UUID) and an
//! expiry. Decoding checks signature and embedded expiry, nothing else --
//! application-level revocation is layered on by the access cache and the
//! session store's soft-delete flag.

use std::str::FromStr;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims: an opaque subject identifier and an expiry timestamp.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- an access-token or refresh-token UUID, as a string.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing/verification secret.
    pub secret: String,
    /// Signing algorithm (HMAC family).
    pub algorithm: Algorithm,
    /// Access token lifetime in minutes (default: 15). Refresh token
    /// lifetimes come from per-user settings instead.
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ALGORITHM`          | no       | `HS256` |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing/empty or `JWT_ALGORITHM` is not a
    /// known algorithm name.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let algorithm = Algorithm::from_str(
            &std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".into()),
        )
        .expect("JWT_ALGORITHM must be a valid algorithm name");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            algorithm,
            access_token_expiry_mins,
        }
    }
}

/// Sign a token carrying `subject`, expiring `expires_in_mins` from now.
pub fn encode_token(
    subject: Uuid,
    expires_in_mins: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = chrono::Utc::now().timestamp() + expires_in_mins * 60;
    let claims = Claims {
        sub: subject.to_string(),
        exp,
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the embedded [`Claims`].
pub fn decode_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(config.algorithm),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn test_encode_and_decode_round_trip() {
        let config = test_config();
        let subject = Uuid::new_v4();

        let token = encode_token(subject, 15, &config).expect("encoding should succeed");
        let claims = decode_token(&token, &config).expect("decoding should succeed");

        assert_eq!(claims.sub, subject.to_string());
        assert!(claims.exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: chrono::Utc::now().timestamp() - 300,
        };
        let token = encode(
            &Header::new(config.algorithm),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(
            decode_token(&token, &config).is_err(),
            "expired token must fail validation"
        );
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };

        let token = encode_token(Uuid::new_v4(), 15, &config_a).expect("encoding should succeed");

        assert!(
            decode_token(&token, &config_b).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        let config = test_config();
        assert!(decode_token("not-a-jwt", &config).is_err());
        assert!(decode_token("", &config).is_err());
    }
}
