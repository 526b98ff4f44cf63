use async_trait::async_trait;
use serde_json::json;

use crate::config::MailConfig;
use crate::user::errors::AccountError;
use crate::user::ports::MailSender;

/// Mail delivery through an HTTP mail API.
///
/// Fire-and-forget: one POST, no retries; a non-success status surfaces as
/// an upstream error to the caller of register/forgotPassword.
pub struct HttpMailSender {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl HttpMailSender {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        }
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, to: &str, link: &str, subject: &str) -> Result<(), AccountError> {
        let body = json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "html": format!(
                "<p>Congratulations! You're almost set.</p>\
                 <a href=\"{link}\">Click here to continue</a>\
                 <p>If the button does not work, follow this link instead:</p>\
                 <div>{link}</div>"
            ),
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AccountError::Upstream(format!("mail delivery failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AccountError::Upstream(format!(
                "mail delivery failed with status {}",
                response.status()
            )));
        }

        tracing::debug!(subject = %subject, "Mail dispatched");
        Ok(())
    }
}

/// Local dev sender that logs the link instead of sending real email.
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, to: &str, link: &str, subject: &str) -> Result<(), AccountError> {
        tracing::info!(to = %to, link = %link, subject = %subject, "mail send stub");
        Ok(())
    }
}
