//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use reclaim_core::config::auth::AuthConfig;
use reclaim_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens signed by the identity provider.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthenticated("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid token signature")
                    }
                    _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            leeway_seconds: 0,
        }
    }

    fn token(secret: &str, exp: i64) -> String {
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "alice".to_string(),
            iat: Utc::now().timestamp(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let decoder = JwtDecoder::new(&config());
        let claims = decoder
            .decode(&token("test-secret", Utc::now().timestamp() + 600))
            .unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_expired_token_rejected() {
        let decoder = JwtDecoder::new(&config());
        let err = decoder
            .decode(&token("test-secret", Utc::now().timestamp() - 600))
            .unwrap_err();
        assert_eq!(err.kind, reclaim_core::ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let decoder = JwtDecoder::new(&config());
        assert!(
            decoder
                .decode(&token("other-secret", Utc::now().timestamp() + 600))
                .is_err()
        );
    }
}
