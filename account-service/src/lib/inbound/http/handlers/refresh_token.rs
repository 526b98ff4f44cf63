use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::login::REFRESH_COOKIE_NAME;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::AccountService;

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    let access_token = state
        .accounts
        .refresh_access_token(refresh_token.as_deref())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccessTokenData { access_token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenData {
    pub access_token: String,
}
