use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Identity of a verified caller, inserted into request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Verification material for bearer tokens issued by the identity provider.
#[derive(Clone)]
pub struct AuthKeys {
    decoding: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl AuthKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding: Arc::new(DecodingKey::from_secret(secret)),
            validation: Arc::new(validation),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

fn reject(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

pub async fn require_bearer_auth(
    State(keys): State<AuthKeys>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return reject("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return reject("bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return reject("unsupported_scheme");
    };

    let claims = match keys.verify(token.trim()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            return reject("invalid_token");
        }
    };
    let Ok(id) = Uuid::parse_str(&claims.sub) else {
        return reject("invalid_subject");
    };

    req.extensions_mut().insert(AuthUser { id });
    next.run(req).await
}
