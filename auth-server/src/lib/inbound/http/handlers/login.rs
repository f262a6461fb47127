use auth::Credentials;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let credentials = Credentials::new(body.username, body.password);
    let username = credentials.username.clone();

    let token = state
        .user_service
        .login(credentials, Utc::now())
        .await
        .map_err(|e| {
            if let UserError::InvalidCredentials = e {
                tracing::warn!(username = %username, "Login rejected");
            } else {
                tracing::error!(username = %username, error = %e, "Login failed");
            }
            ApiError::from(e)
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: token.to_string(),
        },
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
}
