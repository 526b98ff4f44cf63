use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordStrengthError;
use crate::user::errors::RoleError;
use crate::user::errors::UserIdError;

/// Avatar assigned to accounts created without a provider picture.
pub const DEFAULT_AVATAR_URL: &str =
    "https://res.cloudinary.com/dzmaiebsp/image/upload/v1612718849/default_ny1fpf.png";

/// User aggregate entity.
///
/// The password field always holds an Argon2 hash once the entity exists;
/// plaintext never reaches this type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a fresh subscriber-role user.
    ///
    /// Used at activation and at first federated login; both paths create
    /// the account in one step, there is no pending row.
    pub fn new(
        name: DisplayName,
        email: EmailAddress,
        password_hash: String,
        avatar: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            role: Role::Subscriber,
            avatar: avatar.unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Whitespace-trimmed, must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Parsed with an RFC 5322 compliant parser, then additionally required to
/// carry a dotted domain (`user@host` alone is rejected). Stored exactly as
/// given; no case normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not parse or its domain has no dot
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        let domain = email.rsplit('@').next().unwrap_or_default();
        if !domain.contains('.') {
            return Err(EmailError::InvalidFormat(
                "domain must contain a dot".to_string(),
            ));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Strength-validated plaintext password.
///
/// Exists only between request parsing and hashing. The strength rule is
/// the registration-time predicate: at least 8 characters with at least one
/// lowercase letter, one uppercase letter, one digit, and one special
/// character from a fixed set.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const SPECIAL_CHARS: &'static str = r"=+!@#$%^&*._-\/()";

    /// Validate password strength.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `MissingLowercase` / `MissingUppercase` / `MissingDigit` /
    ///   `MissingSpecialChar` - A required character class is absent
    pub fn new(password: String) -> Result<Self, PasswordStrengthError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordStrengthError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordStrengthError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordStrengthError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordStrengthError::MissingDigit);
        }
        if !password.chars().any(|c| Self::SPECIAL_CHARS.contains(c)) {
            return Err(PasswordStrengthError::MissingSpecialChar);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Closed role enumeration.
///
/// Wire representation matches the stored strings: `admin`, `sub-admin`,
/// `subscriber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    SubAdmin,
    Subscriber,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SubAdmin => "sub-admin",
            Role::Subscriber => "subscriber",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Subscriber
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "sub-admin" => Ok(Role::SubAdmin),
            "subscriber" => Ok(Role::Subscriber),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile payload returned by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialProfile {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub email_verified: bool,
}

/// Command to stage a new registration.
///
/// The password stays raw here: the flow checks strength only after the
/// email-uniqueness check, matching the operation's error precedence.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(name: DisplayName, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to update a user's profile.
///
/// Fields are optional to support partial updates; only provided fields
/// are written.
#[derive(Debug)]
pub struct UpdateProfileCommand {
    pub name: Option<DisplayName>,
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_trims() {
        let name = DisplayName::new("  alice  ".to_string()).unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_display_name_rejects_blank() {
        assert!(DisplayName::new("   ".to_string()).is_err());
        assert!(DisplayName::new(String::new()).is_err());
    }

    #[test]
    fn test_email_accepts_dotted_domain() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
    }

    #[test]
    fn test_email_rejects_dotless_domain() {
        assert!(EmailAddress::new("alice@localhost".to_string()).is_err());
    }

    #[test]
    fn test_email_rejects_garbage() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("@example.com".to_string()).is_err());
    }

    #[test]
    fn test_password_strength_accepts() {
        assert!(Password::new("Abc123!!".to_string()).is_ok());
    }

    #[test]
    fn test_password_strength_rejects() {
        // Each missing one required class
        assert!(matches!(
            Password::new("abcdefgh".to_string()),
            Err(PasswordStrengthError::MissingUppercase)
        ));
        assert!(matches!(
            Password::new("ABCDEFGH".to_string()),
            Err(PasswordStrengthError::MissingLowercase)
        ));
        assert!(matches!(
            Password::new("12345678".to_string()),
            Err(PasswordStrengthError::MissingLowercase)
        ));
        assert!(matches!(
            Password::new("Abcdefg1".to_string()),
            Err(PasswordStrengthError::MissingSpecialChar)
        ));
        assert!(matches!(
            Password::new("Ab1!".to_string()),
            Err(PasswordStrengthError::TooShort { .. })
        ));
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Abc123!!".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(<redacted>)");
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::SubAdmin, Role::Subscriber] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            DisplayName::new("alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "$argon2id$hash".to_string(),
            None,
        );

        assert_eq!(user.role, Role::Subscriber);
        assert_eq!(user.avatar, DEFAULT_AVATAR_URL);
        assert_eq!(user.created_at, user.updated_at);
    }
}
