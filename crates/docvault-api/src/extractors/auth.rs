//! `AuthUser` extractor — reads the principal injected by the upstream
//! auth gateway and builds the request context.
//!
//! Credential verification happens before requests reach this service;
//! the gateway forwards the authenticated principal's stable identifier
//! in the `x-user-id` header. A missing or malformed header is a 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the authenticated principal's identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracted authenticated principal context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing x-user-id header"))?;

        let owner_id = raw
            .parse::<Uuid>()
            .map_err(|_| AppError::authentication("Invalid x-user-id header"))?;

        Ok(AuthUser(RequestContext::new(owner_id)))
    }
}
