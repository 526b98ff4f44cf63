use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<DeleteUserResponseData>, ApiError> {
    let target = UserId::from_string(&user_id).map_err(AccountError::from)?;

    state.accounts.delete_user(&auth.user_id, &target).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteUserResponseData {
            id: target.to_string(),
            message: "User deleted.".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteUserResponseData {
    pub id: String,
    pub message: String,
}
