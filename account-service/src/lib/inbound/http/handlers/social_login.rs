use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::login::refresh_cookie;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;

/// Federated logins end exactly like a password login: a refresh cookie
/// and a success message.
pub async fn google_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<GoogleLoginRequest>,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let id_token = body
        .token_id
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("tokenId"))?;

    let refresh_token = state.accounts.google_login(&id_token).await?;
    let jar = jar.add(refresh_cookie(refresh_token));

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Login success!")),
    ))
}

pub async fn facebook_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<FacebookLoginRequest>,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let access_token = body
        .access_token
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("accessToken"))?;
    let user_id = body
        .user_id
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("userID"))?;

    let refresh_token = state
        .accounts
        .facebook_login(&access_token, &user_id)
        .await?;
    let jar = jar.add(refresh_cookie(refresh_token));

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Login success!")),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(rename = "tokenId")]
    token_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FacebookLoginRequest {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
    #[serde(rename = "userID")]
    user_id: Option<String>,
}
