use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Prefix clients put in front of the token in the Authorization header,
/// followed by a space: `Bearer: <token>`.
pub const BEARER_PREFIX: &str = "Bearer:";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub permission_group: String,
}

/// Middleware that authenticates the access token and adds the caller to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let identity = state
        .token_service
        .authenticate(token, Utc::now())
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            ApiError::from(e).into_response()
        })?;

    tracing::debug!(
        user_id = identity.id,
        permission_group = %identity.permission_group,
        "Access token accepted"
    );

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(identity.id),
        permission_group: identity.permission_group,
    });

    Ok(next.run(req).await)
}

/// Token from the Authorization header with the bearer prefix removed.
///
/// An absent header yields `None`; a value without the prefix is taken as
/// the bare token.
fn extract_token_from_header(req: &Request) -> Result<Option<&str>, Response> {
    let Some(auth_header) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::BadRequest("Invalid Authorization header".to_string()).into_response()
    })?;

    Ok(Some(strip_bearer(auth_str)))
}

fn strip_bearer(value: &str) -> &str {
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim_start)
        .unwrap_or(value)
}
