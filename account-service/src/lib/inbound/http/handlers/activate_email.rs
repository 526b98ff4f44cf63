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

pub async fn activate_email(
    State(state): State<AppState>,
    Json(body): Json<ActivateEmailRequest>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let token = body
        .activation_token
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("activation_token"))?;

    state.accounts.activate_email(&token).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        MessageData::new("Your account has been activated!"),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivateEmailRequest {
    activation_token: Option<String>,
}
