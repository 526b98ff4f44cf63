use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password strength failures at registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordStrengthError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("Password must contain a lowercase letter")]
    MissingLowercase,

    #[error("Password must contain an uppercase letter")]
    MissingUppercase,

    #[error("Password must contain a digit")]
    MissingDigit,

    #[error("Password must contain a special character")]
    MissingSpecialChar,
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    WeakPassword(#[from] PasswordStrengthError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    // Domain-level errors
    #[error("The email provided has already been registered")]
    EmailAlreadyExists,

    #[error("This user does not exist")]
    NotFound,

    #[error("Password is incorrect")]
    InvalidCredentials,

    #[error("Please login now")]
    NotAuthenticated,

    #[error("Email verification failed")]
    EmailNotVerified,

    #[error("Admin resources access denied")]
    Forbidden,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    TokenInvalid,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(String),

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::TokenError> for AccountError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::Expired => AccountError::TokenExpired,
            auth::TokenError::Invalid(_) => AccountError::TokenInvalid,
            auth::TokenError::Signing(msg) => AccountError::Unknown(msg),
        }
    }
}

impl From<auth::PasswordError> for AccountError {
    fn from(err: auth::PasswordError) -> Self {
        AccountError::Password(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
