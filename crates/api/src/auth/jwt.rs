//! Access tokens for signed-in users.
//!
//! HS256 JWTs carrying the user id in `sub`. Tokens are not refreshable; a
//! client logs in again once `exp` passes.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use scout_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_EXPIRY_MINS: i64 = 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: DbId,
    pub exp: i64,
    pub iat: i64,
    /// Random token id, logged on issue so a token can be traced.
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY_MINS` (default one day).
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or empty, or the expiry is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    pub fn expires_in_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// A freshly signed token together with the values clients and logs need.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub jti: String,
    pub expires_in: i64,
}

pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<AccessToken, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let expires_in = config.expires_in_secs();
    let claims = Claims {
        sub: user_id,
        exp: iat + expires_in,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(AccessToken {
        token,
        jti: claims.jti,
        expires_in,
    })
}

/// Check signature and expiry; returns the claims of a valid token.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
        }
    }

    #[test]
    fn issued_token_validates_and_names_the_user() {
        let cfg = config("scout-test-secret");
        let issued = generate_access_token(7, &cfg).unwrap();
        assert_eq!(issued.expires_in, 900);

        let claims = validate_token(&issued.token, &cfg).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.jti, issued.jti);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn token_past_expiry_is_rejected() {
        let cfg = config("scout-test-secret");
        // Beyond the 60 second leeway jsonwebtoken allows.
        let iat = chrono::Utc::now().timestamp() - 3600;
        let claims = Claims {
            sub: 7,
            exp: iat + 60,
            iat,
            jti: "stale".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &cfg).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issued = generate_access_token(7, &config("first")).unwrap();
        assert!(validate_token(&issued.token, &config("second")).is_err());
    }
}
