//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs signed with the configured secret. Handlers that
//! mutate data take an [`AdminUser`] argument; actix resolves it before the
//! request body, so unauthenticated calls are refused without parsing input.

use actix_web::{
    dev::Payload, http::header::AUTHORIZATION, http::StatusCode, web, FromRequest, HttpRequest,
    HttpResponse, ResponseError,
};
use chrono::{Duration, Utc};
use futures_util::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid authorization header (expected 'Bearer <token>')")]
    InvalidFormat,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("user '{0}' is not an admin")]
    NotAdmin(String),

    #[error("token keys are not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AuthError::NotConfigured => {
                error!("Auth error: {}", self);
                HttpResponse::InternalServerError().json(ErrorResponse::message(
                    "Failed to process request",
                    "Authentication is unavailable",
                ))
            }
            _ => {
                warn!("Auth error: {}", self);
                HttpResponse::Unauthorized()
                    .json(ErrorResponse::message("Unauthorized", self.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys for bearer tokens
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    pub fn issue(&self, username: &str, is_admin: bool) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            is_admin,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// An authenticated principal with the admin flag set
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl AdminUser {
    fn extract(req: &HttpRequest) -> Result<Self, AuthError> {
        let keys = req
            .app_data::<web::Data<TokenKeys>>()
            .ok_or(AuthError::NotConfigured)?;
        let claims = keys.verify(bearer_token(req)?)?;
        if !claims.is_admin {
            return Err(AuthError::NotAdmin(claims.username));
        }
        Ok(AdminUser(claims))
    }
}

impl FromRequest for AdminUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new("test-secret", Duration::hours(1))
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let keys = keys();
        let token = keys.issue("u1", true).unwrap();

        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.username, "u1");
        assert!(claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenKeys::new("other-secret", Duration::hours(1))
            .issue("u1", true)
            .unwrap();

        assert!(matches!(keys().verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = TokenKeys::new("test-secret", Duration::hours(-2))
            .issue("u1", true)
            .unwrap();

        assert!(keys().verify(&token).is_err());
    }

    #[test]
    fn extractor_requires_admin() {
        let keys = keys();
        let token = keys.issue("u2", false).unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(keys))
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let err = AdminUser::extract(&req).unwrap_err();

        assert!(matches!(err, AuthError::NotAdmin(ref name) if name == "u2"));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn extractor_rejects_missing_and_malformed_headers() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .to_http_request();
        assert!(matches!(AdminUser::extract(&req), Err(AuthError::MissingToken)));

        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .insert_header((AUTHORIZATION, "Basic dTE6cGFzcw=="))
            .to_http_request();
        assert!(matches!(AdminUser::extract(&req), Err(AuthError::InvalidFormat)));
    }

    #[test]
    fn extractor_accepts_admin_token() {
        let keys = keys();
        let token = keys.issue("u1", true).unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(keys))
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let AdminUser(claims) = AdminUser::extract(&req).unwrap();

        assert_eq!(claims.username, "u1");
    }
}
