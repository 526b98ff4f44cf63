use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::AccountService;
use crate::user::ports::AvatarUploader;

/// Uploads the `file` part to the image service and writes the resulting
/// URL onto the caller's avatar. The domain never sees the bytes.
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> Result<ApiSuccess<AvatarData>, ApiError> {
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("avatar").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            file = Some((bytes.to_vec(), filename));
        }
    }

    let (bytes, filename) =
        file.ok_or_else(|| ApiError::BadRequest("No file was uploaded".to_string()))?;

    let url = state.uploader.upload(bytes, &filename).await?;
    let url = state.accounts.update_avatar(&auth.user_id, url).await?;

    Ok(ApiSuccess::new(StatusCode::OK, AvatarData { url }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarData {
    pub url: String,
}
