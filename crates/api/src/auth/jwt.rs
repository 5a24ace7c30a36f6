//! Session token generation and validation.
//!
//! Session tokens are HS256-signed JWTs carrying a [`Claims`] payload with a
//! fixed validity window. The signing secret is loaded from the environment
//! and never baked into the binary; an optional previous secret is accepted
//! during rotation windows so live sessions survive a secret change.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use extranet_core::types::DbId;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The username, bound into the token so handlers can attribute actions
    /// without a user lookup.
    pub username: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign new tokens and verify incoming ones.
    pub secret: String,
    /// Retired secret still accepted for verification during a rotation
    /// window. Tokens are never signed with it.
    pub previous_secret: Option<String>,
    /// Token lifetime in minutes (default: 60).
    pub token_expiry_mins: i64,
}

/// Default token expiry in minutes.
const DEFAULT_TOKEN_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `JWT_SECRET`          | **yes**  | --      |
    /// | `JWT_SECRET_PREVIOUS` | no       | unset   |
    /// | `JWT_EXPIRY_MINS`     | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let previous_secret = std::env::var("JWT_SECRET_PREVIOUS")
            .ok()
            .filter(|s| !s.is_empty());

        let token_expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            previous_secret,
            token_expiry_mins,
        }
    }
}

/// Generate an HS256 session token for the given user.
pub fn generate_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.token_expiry_mins * 60;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        iat: now,
        exp,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Verifies signature and expiration under the current secret, falling back
/// to the previous secret when one is configured. On failure the error from
/// the primary secret is returned; callers collapse all failures into a
/// single generic "invalid token" response and keep the cause for internal
/// diagnostics only.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::default(); // HS256, validates exp
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims),
        Err(primary_err) => {
            if let Some(previous) = &config.previous_secret {
                if let Ok(data) = decode::<Claims>(
                    token,
                    &DecodingKey::from_secret(previous.as_bytes()),
                    &validation,
                ) {
                    return Ok(data.claims);
                }
            }
            Err(primary_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use jsonwebtoken::errors::ErrorKind;

    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            previous_secret: None,
            token_expiry_mins: 60,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token =
            generate_token(42, "alice", &config).expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            username: "alice".to_string(),
            iat: now - 7200,
            exp: now - 300, // expired 5 minutes ago (well past leeway)
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        // The cause stays distinguishable internally even though callers
        // collapse it for the client.
        let err = validate_token(&token, &config).expect_err("expired token must fail");
        assert_matches!(err.kind(), ErrorKind::ExpiredSignature);
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };

        let token =
            generate_token(1, "bob", &config_a).expect("token generation should succeed");

        let result = validate_token(&token, &config_b);
        assert!(
            result.is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_previous_secret_accepted_during_rotation() {
        let old_config = test_config();
        let token =
            generate_token(7, "carol", &old_config).expect("token generation should succeed");

        // Rotate: new primary secret, old secret kept as previous.
        let rotated = JwtConfig {
            secret: "the-new-primary-secret".to_string(),
            previous_secret: Some(old_config.secret.clone()),
            token_expiry_mins: 60,
        };

        let claims =
            validate_token(&token, &rotated).expect("token under previous secret should verify");
        assert_eq!(claims.sub, 7);

        // Once the previous secret is dropped, the token stops verifying.
        let rotated_out = JwtConfig {
            previous_secret: None,
            ..rotated
        };
        assert!(validate_token(&token, &rotated_out).is_err());
    }

    #[test]
    fn test_expired_token_fails_under_previous_secret_too() {
        let old_config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 2,
            username: "dave".to_string(),
            iat: now - 7200,
            exp: now - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(old_config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        let rotated = JwtConfig {
            secret: "the-new-primary-secret".to_string(),
            previous_secret: Some(old_config.secret),
            token_expiry_mins: 60,
        };
        assert!(
            validate_token(&token, &rotated).is_err(),
            "rotation must not resurrect expired tokens"
        );
    }
}
