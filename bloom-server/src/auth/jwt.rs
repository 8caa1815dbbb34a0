//! JWT token service
//!
//! Issues and validates the bearer tokens behind `/api/admin/*`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 24h, matching the admin session length
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "bloom-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "bloom-admin".to_string()),
        }
    }
}

/// Load the signing secret from `JWT_SECRET`.
///
/// Development builds fall back to a random per-process key (every restart
/// invalidates open sessions); production builds refuse to start without
/// one.
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => panic!("JWT_SECRET must be at least 32 characters long"),
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating a temporary development key");
                use rand::Rng;
                let mut rng = rand::thread_rng();
                (0..64)
                    .map(|_| rng.gen_range(b'!'..=b'~') as char)
                    .collect()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        }
    }
}

/// Claims carried in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin record id (subject)
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

/// Authenticated admin context injected into request extensions
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<Claims> for CurrentAdmin {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Default for JwtService {
    fn default() -> Self {
        Self::with_config(JwtConfig::default())
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for an admin account
    pub fn generate_token(
        &self,
        admin_id: &str,
        email: &str,
        name: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-test-secret-test-secret!".into(),
            expiration_minutes: 60,
            issuer: "bloom-server".into(),
            audience: "bloom-admin".into(),
        })
    }

    #[test]
    fn token_round_trips() {
        let service = test_service();
        let token = service
            .generate_token("admin:a1", "admin@bloom.example", "Администратор", "superadmin")
            .unwrap();
        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "admin:a1");
        assert_eq!(claims.email, "admin@bloom.example");
        assert_eq!(claims.role, "superadmin");
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let service = test_service();
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-another-secret-secret".into(),
            expiration_minutes: 60,
            issuer: "bloom-server".into(),
            audience: "bloom-admin".into(),
        });
        let token = other
            .generate_token("admin:a1", "admin@bloom.example", "A", "admin")
            .unwrap();
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
