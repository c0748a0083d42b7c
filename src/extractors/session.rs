//! Extract the authenticated principal from the request.
//!
//! The session provider is an external collaborator: a middleware layer
//! in front of these routes authenticates the request and inserts a
//! [`Principal`] into the request extensions. This extractor only reads
//! it back; a request with no principal is unauthenticated.

use crate::auth::Principal;
use crate::error::ApiError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Extractor for the session principal. Rejects with 401 when the
/// session layer attached none.
#[derive(Clone, Debug)]
pub struct Session(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(Session)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))
    }
}
