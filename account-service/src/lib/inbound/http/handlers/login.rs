use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::router::AppState;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;

/// Cookie carrying the refresh token, scoped to the refresh endpoint.
pub const REFRESH_COOKIE_NAME: &str = "refreshtoken";
pub const REFRESH_COOKIE_PATH: &str = "/user/refresh_token";

const REFRESH_COOKIE_MAX_AGE_DAYS: i64 = 7;

/// Build the HTTP-only refresh cookie. Shared with the federated login
/// handlers so every login path delivers an identical cookie.
pub fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, token))
        .http_only(true)
        .path(REFRESH_COOKIE_PATH)
        .max_age(time::Duration::days(REFRESH_COOKIE_MAX_AGE_DAYS))
        .build()
}

/// Cookie that clears the refresh token on the same path.
pub fn clear_refresh_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, ""))
        .http_only(true)
        .path(REFRESH_COOKIE_PATH)
        .build()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let email = body
        .email
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("email"))?;
    let password = body
        .password
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("password"))?;

    let refresh_token = state.accounts.login(&email, &password).await?;
    let jar = jar.add(refresh_cookie(refresh_token));

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, MessageData::new("Login success!")),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}
