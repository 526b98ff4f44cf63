use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let email = body
        .email
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("email"))?;

    state.accounts.forgot_password(&email).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("A reset link has been sent, please check your email."),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequest {
    email: Option<String>,
}
