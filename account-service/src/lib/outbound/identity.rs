use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::user::models::SocialProfile;
use crate::user::errors::AccountError;
use crate::user::ports::IdentityGateway;

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const FACEBOOK_GRAPH_URL: &str = "https://graph.facebook.com/v2.9";

/// Identity verification against the real provider endpoints.
///
/// Both providers are treated as black boxes: they either hand back a
/// profile payload or the login fails. Audience checking for Google is the
/// only verification done on our side; signature validity is the
/// tokeninfo endpoint's job.
pub struct HttpIdentityGateway {
    http: reqwest::Client,
    google_client_id: String,
}

impl HttpIdentityGateway {
    pub fn new(google_client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            google_client_id,
        }
    }
}

/// Payload returned by the Google tokeninfo endpoint. Boolean-ish fields
/// arrive as strings.
#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    aud: String,
    email: String,
    email_verified: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FacebookGraphProfile {
    name: String,
    email: String,
    picture: Option<FacebookPicture>,
}

#[derive(Debug, Deserialize)]
struct FacebookPicture {
    data: FacebookPictureData,
}

#[derive(Debug, Deserialize)]
struct FacebookPictureData {
    url: String,
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn google_profile(&self, id_token: &str) -> Result<SocialProfile, AccountError> {
        let response = self
            .http
            .get(GOOGLE_TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AccountError::Upstream(format!("google verification failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AccountError::TokenInvalid);
        }

        let info: GoogleTokenInfo = response
            .json()
            .await
            .map_err(|e| AccountError::Upstream(format!("google verification failed: {}", e)))?;

        // A valid token minted for someone else's app is still a rejection
        if info.aud != self.google_client_id {
            return Err(AccountError::TokenInvalid);
        }

        Ok(SocialProfile {
            name: info.name.unwrap_or_else(|| info.email.clone()),
            email: info.email,
            picture: info.picture,
            email_verified: info.email_verified.as_deref() == Some("true"),
        })
    }

    async fn facebook_profile(
        &self,
        access_token: &str,
        provider_user_id: &str,
    ) -> Result<SocialProfile, AccountError> {
        let url = format!("{}/{}/", FACEBOOK_GRAPH_URL, provider_user_id);

        let response = self
            .http
            .get(url)
            .query(&[
                ("fields", "id,name,email,picture"),
                ("access_token", access_token),
            ])
            .send()
            .await
            .map_err(|e| AccountError::Upstream(format!("facebook profile fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AccountError::TokenInvalid);
        }

        let profile: FacebookGraphProfile = response
            .json()
            .await
            .map_err(|e| AccountError::Upstream(format!("facebook profile fetch failed: {}", e)))?;

        Ok(SocialProfile {
            name: profile.name,
            email: profile.email,
            picture: profile.picture.map(|p| p.data.url),
            // The graph endpoint only returns an email Facebook verified
            email_verified: true,
        })
    }
}
