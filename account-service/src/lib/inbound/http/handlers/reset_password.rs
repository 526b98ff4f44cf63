use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;

/// The caller reached this route by presenting the reset token as a bearer
/// access token; the new password is written without a strength re-check.
pub async fn reset_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let password = body
        .password
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("password"))?;

    state
        .accounts
        .reset_password(&auth.user_id, &password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("Your password was successfully changed!"),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequest {
    password: Option<String>,
}
