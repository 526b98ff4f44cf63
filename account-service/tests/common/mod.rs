use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::user::models::DisplayName;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::Role;
use account_service::domain::user::models::SocialProfile;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::ports::AvatarUploader;
use account_service::domain::user::ports::IdentityGateway;
use account_service::domain::user::ports::MailSender;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::AccountSettings;
use account_service::domain::user::service::Accounts;
use account_service::inbound::http::router::create_router;
use account_service::user::errors::AccountError;
use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;

pub const GOOGLE_PASSWORD_SECRET: &str = "google_pepper";
pub const STUB_AVATAR_URL: &str = "https://cdn.test/avatar/uploaded.png";

/// Test application that spawns the real router on a random port, wired
/// to in-memory adapters so no external service is needed.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
    pub mail: Arc<RecordingMailSender>,
    pub identity: Arc<StubIdentityGateway>,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let mail = Arc::new(RecordingMailSender::new());
        let identity = Arc::new(StubIdentityGateway::new());
        let uploader = Arc::new(StubUploader);

        let tokens = Arc::new(TokenService::new(
            b"test-activation-secret-32-bytes!!",
            b"test-access-secret-32-bytes-long!",
            b"test-refresh-secret-32-bytes-lng!",
        ));

        let settings = AccountSettings {
            client_url: "http://localhost:3001".to_string(),
            google_password_secret: GOOGLE_PASSWORD_SECRET.to_string(),
            facebook_password_secret: "facebook_pepper".to_string(),
        };

        let accounts = Arc::new(Accounts::new(
            Arc::clone(&repository),
            Arc::clone(&mail),
            Arc::clone(&identity),
            Arc::clone(&tokens),
            settings,
        ));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let app = create_router(accounts, Arc::clone(&tokens), uploader);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server crashed");
        });

        let api_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build API client");

        Self {
            address,
            api_client,
            repository,
            mail,
            identity,
            tokens,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Insert a user directly into the store, bypassing activation.
    pub async fn seed_user(&self, name: &str, email: &str, password: &str, role: Role) -> User {
        let mut user = User::new(
            DisplayName::new(name.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            PasswordHasher::new().hash(password).unwrap(),
            None,
        );
        user.role = role;

        self.repository
            .create(user)
            .await
            .expect("Failed to seed user")
    }

    /// Log in and exchange the refresh cookie for an access token.
    pub async fn access_token(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/user/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute login");
        assert!(response.status().is_success(), "login failed during setup");

        let response = self
            .post("/user/refresh_token")
            .send()
            .await
            .expect("Failed to execute refresh");
        assert!(
            response.status().is_success(),
            "refresh failed during setup"
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"].as_str().unwrap().to_string()
    }
}

/// Store double: a HashMap behind a Mutex with the same uniqueness
/// behavior as the Postgres adapter.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|existing| existing.email.as_str() == user.email.as_str())
        {
            return Err(AccountError::EmailAlreadyExists);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(AccountError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), AccountError> {
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(AccountError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn list_excluding(&self, role: Role, user: &UserId) -> Result<Vec<User>, AccountError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|candidate| candidate.role != role && candidate.id != *user)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub link: String,
    pub subject: String,
}

/// Mail double that records every send.
pub struct RecordingMailSender {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Option<SentMail> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Token segment of the most recent link.
    pub fn last_token(&self) -> String {
        let mail = self.last().expect("no mail was sent");
        mail.link.rsplit('/').next().unwrap().to_string()
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, to: &str, link: &str, subject: &str) -> Result<(), AccountError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            link: link.to_string(),
            subject: subject.to_string(),
        });
        Ok(())
    }
}

/// Identity double with a programmable profile.
pub struct StubIdentityGateway {
    profile: Mutex<Option<SocialProfile>>,
}

impl StubIdentityGateway {
    pub fn new() -> Self {
        Self {
            profile: Mutex::new(None),
        }
    }

    pub fn set_profile(&self, profile: SocialProfile) {
        *self.profile.lock().unwrap() = Some(profile);
    }

    fn current(&self) -> Result<SocialProfile, AccountError> {
        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or(AccountError::TokenInvalid)
    }
}

#[async_trait]
impl IdentityGateway for StubIdentityGateway {
    async fn google_profile(&self, _id_token: &str) -> Result<SocialProfile, AccountError> {
        self.current()
    }

    async fn facebook_profile(
        &self,
        _access_token: &str,
        _provider_user_id: &str,
    ) -> Result<SocialProfile, AccountError> {
        self.current()
    }
}

/// Uploader double returning a fixed URL.
pub struct StubUploader;

#[async_trait]
impl AvatarUploader for StubUploader {
    async fn upload(&self, _bytes: Vec<u8>, _filename: &str) -> Result<String, AccountError> {
        Ok(STUB_AVATAR_URL.to_string())
    }
}
