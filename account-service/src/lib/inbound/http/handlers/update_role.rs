use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;

pub async fn update_role(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let target = UserId::from_string(&user_id).map_err(AccountError::from)?;
    let role = body
        .role
        .filter(|s| !s.is_empty())
        .ok_or(AccountError::MissingField("role"))?
        .parse::<Role>()
        .map_err(AccountError::from)?;

    state
        .accounts
        .update_role(&auth.user_id, &target, role)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRoleRequest {
    role: Option<String>,
}
