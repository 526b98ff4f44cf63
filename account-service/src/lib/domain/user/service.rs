use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;
use chrono::Utc;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::SocialProfile;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::permissions;
use crate::user::errors::AccountError;
use crate::user::ports::AccountService;
use crate::user::ports::IdentityGateway;
use crate::user::ports::MailSender;
use crate::user::ports::UserRepository;

/// Immutable flow settings taken from configuration at startup.
#[derive(Debug, Clone)]
pub struct AccountSettings {
    /// Frontend origin for activation and reset links
    pub client_url: String,
    /// Server secret mixed into the derived password for Google accounts
    pub google_password_secret: String,
    /// Server secret mixed into the derived password for Facebook accounts
    pub facebook_password_secret: String,
}

/// Domain service implementation for the account flows.
///
/// Concrete implementation of AccountService with dependency injection.
pub struct Accounts<R, M, I>
where
    R: UserRepository,
    M: MailSender,
    I: IdentityGateway,
{
    repository: Arc<R>,
    mail: Arc<M>,
    identity: Arc<I>,
    tokens: Arc<TokenService>,
    password_hasher: PasswordHasher,
    settings: AccountSettings,
}

impl<R, M, I> Accounts<R, M, I>
where
    R: UserRepository,
    M: MailSender,
    I: IdentityGateway,
{
    /// Create an account service with injected collaborators.
    pub fn new(
        repository: Arc<R>,
        mail: Arc<M>,
        identity: Arc<I>,
        tokens: Arc<TokenService>,
        settings: AccountSettings,
    ) -> Self {
        Self {
            repository,
            mail,
            identity,
            tokens,
            password_hasher: PasswordHasher::new(),
            settings,
        }
    }

    /// Shared tail of both federated logins.
    ///
    /// The local password is derived deterministically from the verified
    /// provider email plus a server secret, so a social account can also
    /// log in through the ordinary password path. When the email already
    /// belongs to a password-registered account the derived password will
    /// not match its hash; that surfaces as `InvalidCredentials` rather
    /// than silently taking the account over.
    async fn derived_password_login(
        &self,
        profile: SocialProfile,
        provider_secret: &str,
    ) -> Result<String, AccountError> {
        let derived = format!("{}{}", profile.email, provider_secret);

        match self.repository.find_by_email(&profile.email).await? {
            Some(user) => {
                if !self.password_hasher.verify(&derived, &user.password_hash)? {
                    return Err(AccountError::InvalidCredentials);
                }
                Ok(self.tokens.issue_refresh(&user.id.to_string())?)
            }
            None => {
                let password_hash = self.password_hasher.hash(&derived)?;
                let name = DisplayName::new(profile.name)?;
                let email = EmailAddress::new(profile.email)?;

                let user = self
                    .repository
                    .create(User::new(name, email, password_hash, profile.picture))
                    .await?;

                tracing::info!(user_id = %user.id, "Created account from federated login");
                Ok(self.tokens.issue_refresh(&user.id.to_string())?)
            }
        }
    }
}

#[async_trait]
impl<R, M, I> AccountService for Accounts<R, M, I>
where
    R: UserRepository,
    M: MailSender,
    I: IdentityGateway,
{
    async fn register(&self, command: RegisterCommand) -> Result<(), AccountError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists);
        }

        // Strength is checked after uniqueness, so a taken email reports
        // the conflict rather than the weak password
        let password = Password::new(command.password)?;
        let password_hash = self.password_hasher.hash(password.as_str())?;

        let activation_token = self.tokens.issue_activation(
            command.name.as_str(),
            command.email.as_str(),
            &password_hash,
        )?;
        let link = format!("{}/#/activate/{}", self.settings.client_url, activation_token);

        self.mail
            .send(command.email.as_str(), &link, "Verify your email address")
            .await?;

        tracing::debug!("Registration staged inside activation token");
        Ok(())
    }

    async fn activate_email(&self, activation_token: &str) -> Result<User, AccountError> {
        let claims = self.tokens.verify_activation(activation_token)?;

        // Late uniqueness re-check: another activation of the same email
        // may have completed while this token was in flight
        if self.repository.find_by_email(&claims.email).await?.is_some() {
            return Err(AccountError::EmailAlreadyExists);
        }

        let name = DisplayName::new(claims.name)?;
        let email = EmailAddress::new(claims.email)?;
        let user = User::new(name, email, claims.password_hash, None);

        let user = self.repository.create(user).await?;
        tracing::info!(user_id = %user.id, "Account activated");
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, AccountError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound)?;

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(self.tokens.issue_refresh(&user.id.to_string())?)
    }

    async fn refresh_access_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<String, AccountError> {
        let token = refresh_token.ok_or(AccountError::NotAuthenticated)?;

        // Expired and invalid collapse into one answer on this path
        let claims = self
            .tokens
            .verify_refresh(token)
            .map_err(|_| AccountError::NotAuthenticated)?;

        Ok(self.tokens.issue_access(&claims.id)?)
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AccountError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound)?;

        // The reset credential is an ordinary access token; the protected
        // reset route accepts it like any other bearer token
        let reset_token = self.tokens.issue_access(&user.id.to_string())?;
        let link = format!("{}/user/reset/{}", self.settings.client_url, reset_token);

        self.mail
            .send(email, &link, "Reset your password")
            .await
    }

    async fn reset_password(
        &self,
        user_id: &UserId,
        new_password: &str,
    ) -> Result<(), AccountError> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::NotFound)?;

        user.password_hash = self.password_hasher.hash(new_password)?;
        user.updated_at = Utc::now();

        self.repository.update(user).await?;
        tracing::info!(user_id = %user_id, "Password reset");
        Ok(())
    }

    async fn google_login(&self, id_token: &str) -> Result<String, AccountError> {
        let profile = self.identity.google_profile(id_token).await?;

        if !profile.email_verified {
            return Err(AccountError::EmailNotVerified);
        }

        self.derived_password_login(profile, &self.settings.google_password_secret)
            .await
    }

    async fn facebook_login(
        &self,
        access_token: &str,
        provider_user_id: &str,
    ) -> Result<String, AccountError> {
        let profile = self
            .identity
            .facebook_profile(access_token, provider_user_id)
            .await?;

        self.derived_password_login(profile, &self.settings.facebook_password_secret)
            .await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        self.repository.list_all().await
    }

    async fn list_subscribers(&self, acting_user: &UserId) -> Result<Vec<User>, AccountError> {
        self.repository
            .list_excluding(Role::Admin, acting_user)
            .await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, AccountError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;

        if let Some(name) = command.name {
            user.name = name;
        }
        if let Some(avatar) = command.avatar {
            user.avatar = avatar;
        }
        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn update_role(
        &self,
        actor: &UserId,
        target: &UserId,
        role: Role,
    ) -> Result<User, AccountError> {
        let acting_user = self
            .repository
            .find_by_id(actor)
            .await?
            .ok_or(AccountError::NotFound)?;
        let mut target_user = self
            .repository
            .find_by_id(target)
            .await?
            .ok_or(AccountError::NotFound)?;

        if !permissions::can_update_and_delete_user(acting_user.role, target_user.role) {
            return Err(AccountError::Forbidden);
        }

        target_user.role = role;
        target_user.updated_at = Utc::now();

        self.repository.update(target_user).await
    }

    async fn delete_user(&self, actor: &UserId, target: &UserId) -> Result<(), AccountError> {
        let acting_user = self
            .repository
            .find_by_id(actor)
            .await?
            .ok_or(AccountError::NotFound)?;
        let target_user = self
            .repository
            .find_by_id(target)
            .await?
            .ok_or(AccountError::NotFound)?;

        if !permissions::can_update_and_delete_user(acting_user.role, target_user.role) {
            return Err(AccountError::Forbidden);
        }

        self.repository.delete(target).await?;
        tracing::info!(user_id = %target, "Account deleted");
        Ok(())
    }

    async fn update_avatar(&self, id: &UserId, url: String) -> Result<String, AccountError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;

        user.avatar = url.clone();
        user.updated_at = Utc::now();

        self.repository.update(user).await?;
        Ok(url)
    }
}
