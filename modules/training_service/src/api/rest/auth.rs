//! Bearer token extractors

use super::error::{map_token_error, Problem};
use crate::auth::{CurrentUser, TokenService};
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use std::sync::Arc;

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("token service extension missing from router");
                Problem::internal()
            })?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| Problem::unauthorized("Missing bearer token"))?;

        let token = TokenService::extract_bearer(header)
            .ok_or_else(|| Problem::unauthorized("Missing bearer token"))?;

        tokens.verify(token).map_err(map_token_error)
    }
}

/// Caller that must hold the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::debug!(user_id = user.id, "non-admin caller rejected");
            return Err(Problem::forbidden("Admin access required"));
        }
        Ok(AdminUser(user))
    }
}
