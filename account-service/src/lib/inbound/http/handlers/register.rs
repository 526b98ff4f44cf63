use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let command = body.try_into_command()?;
    state.accounts.register(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(
            "Registration successful! A verification email has been sent to the address provided.",
        ),
    ))
}

/// HTTP request body for staging a registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, AccountError> {
        let name = self
            .name
            .filter(|s| !s.is_empty())
            .ok_or(AccountError::MissingField("name"))?;
        let email = self
            .email
            .filter(|s| !s.is_empty())
            .ok_or(AccountError::MissingField("email"))?;
        let password = self
            .password
            .filter(|s| !s.is_empty())
            .ok_or(AccountError::MissingField("password"))?;

        let name = DisplayName::new(name)?;
        let email = EmailAddress::new(email)?;
        Ok(RegisterCommand::new(name, email, password))
    }
}
