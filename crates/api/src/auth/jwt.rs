//! Staff session tokens.
//!
//! Tokens are HS256 JWTs carrying [`Claims`] and the fixed [`ISSUER`].
//! Clients never hold one; they act through share links.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use studio_core::types::DbId;
use uuid::Uuid;

/// `iss` claim stamped on and required of every token.
pub const ISSUER: &str = "studio-api";

/// One working day.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 480;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Profile id.
    pub sub: DbId,
    /// Profile role at login time (`admin` or `manager`).
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// `JWT_SECRET` is required; `JWT_ACCESS_EXPIRY_MINS` defaults to 480.
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or empty, or the expiry does not
    /// parse.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_ACCESS_EXPIRY_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    pub fn lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation
    }
}

/// Issue a token for `profile_id` valid from `now` for the configured lifetime.
pub fn issue_token_at(
    profile_id: DbId,
    role: &str,
    config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, JwtError> {
    let claims = Claims {
        sub: profile_id,
        role: role.to_string(),
        iss: ISSUER.to_string(),
        exp: (now + config.lifetime()).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

pub fn generate_access_token(
    profile_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, JwtError> {
    issue_token_at(profile_id, role, config, Utc::now())
}

/// Verify signature, expiry and issuer.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, JwtError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
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
    fn issued_token_round_trips_claims() {
        let config = config("test-secret-that-is-long-enough-for-hmac");
        let id = DbId::new_v4();
        let token = generate_access_token(id, "admin", &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn token_issued_past_its_lifetime_is_rejected() {
        let config = config("test-secret-that-is-long-enough-for-hmac");
        // Outside the 60 second leeway.
        let issued = Utc::now() - Duration::minutes(20);
        let token = issue_token_at(DbId::new_v4(), "manager", &config, issued).unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token =
            generate_access_token(DbId::new_v4(), "manager", &config("secret-alpha")).unwrap();

        assert!(validate_token(&token, &config("secret-bravo")).is_err());
    }

    #[test]
    fn token_with_foreign_issuer_is_rejected() {
        let config = config("shared-secret");
        let now = Utc::now().timestamp();
        let foreign = Claims {
            sub: DbId::new_v4(),
            role: "admin".into(),
            iss: "someone-else".into(),
            exp: now + 600,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &foreign,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }
}
