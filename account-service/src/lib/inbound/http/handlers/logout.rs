use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::login::clear_refresh_cookie;
use super::ApiError;
use super::ApiSuccess;
use super::MessageData;

/// Logout is cookie deletion only: tokens are stateless and previously
/// issued ones stay valid until they expire on their own.
pub async fn logout(jar: CookieJar) -> Result<(CookieJar, ApiSuccess<MessageData>), ApiError> {
    let jar = jar.remove(clear_refresh_cookie());

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            MessageData::new("You have successfully logged out."),
        ),
    ))
}
