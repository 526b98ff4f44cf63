use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sha2::Digest;
use sha2::Sha256;

use crate::config::CloudinaryConfig;
use crate::user::errors::AccountError;
use crate::user::ports::AvatarUploader;

const UPLOAD_FOLDER: &str = "avatar";
const AVATAR_SIZE: u32 = 150;

/// Signed multipart upload to the Cloudinary image API.
///
/// Avatars land in one folder, cropped to a 150x150 fill; the caller only
/// ever sees the returned secure URL.
pub struct CloudinaryUploader {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: String,
}

impl CloudinaryUploader {
    pub fn new(config: &CloudinaryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    /// Request signature: SHA-256 over the alphabetically ordered
    /// parameters with the API secret appended.
    fn sign(&self, timestamp: i64) -> String {
        let to_sign = format!(
            "crop=fill&folder={}&height={}&timestamp={}&width={}{}",
            UPLOAD_FOLDER, AVATAR_SIZE, timestamp, AVATAR_SIZE, self.api_secret
        );

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl AvatarUploader for CloudinaryUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, AccountError> {
        let timestamp = Utc::now().timestamp();
        let signature = self.sign(timestamp);

        let file_part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .text("folder", UPLOAD_FOLDER)
            .text("width", AVATAR_SIZE.to_string())
            .text("height", AVATAR_SIZE.to_string())
            .text("crop", "fill");

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AccountError::Upstream(format!("avatar upload failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AccountError::Upstream(format!(
                "avatar upload failed with status {}",
                response.status()
            )));
        }

        let uploaded: CloudinaryUploadResponse = response
            .json()
            .await
            .map_err(|e| AccountError::Upstream(format!("avatar upload failed: {}", e)))?;

        Ok(uploaded.secure_url)
    }
}
