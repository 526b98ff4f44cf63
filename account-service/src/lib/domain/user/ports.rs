use async_trait::async_trait;

use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::SocialProfile;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AccountError;

/// Port for the account domain service.
///
/// The authentication flow is a state machine over
/// anonymous → pending-activation → active session → logged-out; pending
/// state lives entirely inside the activation token, never in the store.
#[async_trait]
pub trait AccountService: Send + Sync + 'static {
    /// Stage a registration: uniqueness check, strength check, hash, then
    /// mail an activation link. Writes nothing to the store.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `WeakPassword` - Password fails the strength predicate
    /// * `Upstream` - Mail delivery failed
    async fn register(&self, command: RegisterCommand) -> Result<(), AccountError>;

    /// Consume an activation token and create the user.
    ///
    /// # Errors
    /// * `TokenExpired` / `TokenInvalid` - Activation token rejected
    /// * `EmailAlreadyExists` - Another activation won the race
    async fn activate_email(&self, activation_token: &str) -> Result<User, AccountError>;

    /// Verify credentials and issue a refresh token. Access tokens are
    /// minted separately through `refresh_access_token`.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `InvalidCredentials` - Password mismatch
    async fn login(&self, email: &str, password: &str) -> Result<String, AccountError>;

    /// Exchange a refresh token for a fresh access token.
    ///
    /// # Errors
    /// * `NotAuthenticated` - Cookie missing, token invalid, or token
    ///   expired; deliberately indistinguishable
    async fn refresh_access_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<String, AccountError>;

    /// Mail a reset link carrying an access-class token for the user.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Upstream` - Mail delivery failed
    async fn forgot_password(&self, email: &str) -> Result<(), AccountError>;

    /// Overwrite the caller's password. The caller is already authenticated
    /// via the reset token; no strength re-check happens here.
    ///
    /// # Errors
    /// * `NotFound` - User vanished since the token was issued
    async fn reset_password(&self, user_id: &UserId, new_password: &str)
        -> Result<(), AccountError>;

    /// Verify a Google ID token and log in or create the account.
    ///
    /// # Errors
    /// * `EmailNotVerified` - Provider has not verified the email
    /// * `InvalidCredentials` - Stored hash does not match the derived
    ///   password (email collision with a password-registered account)
    async fn google_login(&self, id_token: &str) -> Result<String, AccountError>;

    /// Fetch a Facebook profile and log in or create the account.
    ///
    /// # Errors
    /// Same as `google_login`, minus the verified-email gate.
    async fn facebook_login(
        &self,
        access_token: &str,
        provider_user_id: &str,
    ) -> Result<String, AccountError>;

    /// Retrieve a user by id.
    async fn get_user(&self, id: &UserId) -> Result<User, AccountError>;

    /// Retrieve all users.
    async fn list_users(&self) -> Result<Vec<User>, AccountError>;

    /// Retrieve all non-admin users except the caller.
    async fn list_subscribers(&self, acting_user: &UserId) -> Result<Vec<User>, AccountError>;

    /// Update a user's name and avatar; absent fields keep their value.
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, AccountError>;

    /// Change a user's role, subject to the authorization guard.
    ///
    /// # Errors
    /// * `Forbidden` - Actor may not act on the target's role
    async fn update_role(
        &self,
        actor: &UserId,
        target: &UserId,
        role: Role,
    ) -> Result<User, AccountError>;

    /// Delete a user, subject to the authorization guard.
    ///
    /// # Errors
    /// * `Forbidden` - Actor may not act on the target's role
    async fn delete_user(&self, actor: &UserId, target: &UserId) -> Result<(), AccountError>;

    /// Write an uploaded avatar URL onto the user.
    async fn update_avatar(&self, id: &UserId, url: String) -> Result<String, AccountError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique email constraint violated
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Overwrite an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn update(&self, user: User) -> Result<User, AccountError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), AccountError>;

    /// Retrieve all users.
    async fn list_all(&self) -> Result<Vec<User>, AccountError>;

    /// Retrieve users whose role differs from `role`, excluding `user`.
    async fn list_excluding(&self, role: Role, user: &UserId) -> Result<Vec<User>, AccountError>;
}

/// Outbound mail delivery.
///
/// Fire-and-forget: the flow surfaces a failure as a generic upstream error
/// and never retries.
#[async_trait]
pub trait MailSender: Send + Sync + 'static {
    async fn send(&self, to: &str, link: &str, subject: &str) -> Result<(), AccountError>;
}

/// Third-party identity verification.
///
/// Both providers are black boxes that either return a profile payload or
/// fail; all token/graph mechanics stay behind this port.
#[async_trait]
pub trait IdentityGateway: Send + Sync + 'static {
    /// Verify a Google ID token against the configured audience.
    async fn google_profile(&self, id_token: &str) -> Result<SocialProfile, AccountError>;

    /// Fetch a profile from the Facebook graph endpoint.
    async fn facebook_profile(
        &self,
        access_token: &str,
        provider_user_id: &str,
    ) -> Result<SocialProfile, AccountError>;
}

/// Image upload service; the domain only ever consumes the resulting URL.
#[async_trait]
pub trait AvatarUploader: Send + Sync + 'static {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, AccountError>;
}
