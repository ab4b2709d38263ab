//! Bearer-token authentication.
//!
//! Tokens are issued by the central auth service and verified locally with
//! the shared HMAC secret. The claims double as the request-scoped user.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by the bearer token, used as an actix extractor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    /// Health zone an MCZ user is scoped to.
    pub zone_id: Option<i32>,
    /// Province a DPS user is scoped to.
    pub province_id: Option<i32>,
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

/// Returns `true` when the user carries the given role.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let secret = req
            .app_data::<web::Data<ServerConfig>>()
            .map(|config| config.secret.clone());

        let result = match (token, secret) {
            (Some(token), Some(secret)) => AuthenticatedUser::from_jwt(token, &secret)
                .map_err(|_| actix_web::error::ErrorUnauthorized("Invalid bearer token")),
            _ => Err(actix_web::error::ErrorUnauthorized(
                "Missing bearer token",
            )),
        };

        ready(result)
    }
}
