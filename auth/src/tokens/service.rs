use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::ActivationClaims;
use super::claims::SessionClaims;
use super::errors::TokenError;

/// Activation tokens live just long enough to click an email link.
const ACTIVATION_TTL_MINUTES: i64 = 5;
/// Access tokens authorize API calls.
const ACCESS_TTL_MINUTES: i64 = 15;
/// Refresh tokens ride in a cookie and mint new access tokens.
const REFRESH_TTL_DAYS: i64 = 7;

/// One signing key pair, HS256.
struct Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl Signer {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data = decode::<T>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Issues and verifies the three token kinds.
///
/// Each kind is signed with its own secret, so tokens are never
/// interchangeable across kinds: an access token presented to
/// `verify_refresh` fails signature validation no matter how fresh it is.
/// Verification fails closed on any signature mismatch or expiry.
///
/// # Security Notes
/// - Secrets should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in environment variables or secure vaults, never in code
pub struct TokenService {
    activation: Signer,
    access: Signer,
    refresh: Signer,
}

impl TokenService {
    /// Create a token service from the three signing secrets.
    pub fn new(activation_secret: &[u8], access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            activation: Signer::new(activation_secret),
            access: Signer::new(access_secret),
            refresh: Signer::new(refresh_secret),
        }
    }

    /// Issue an activation token carrying a staged registration.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue_activation(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = ActivationClaims {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACTIVATION_TTL_MINUTES)).timestamp(),
        };

        self.activation.sign(&claims)
    }

    /// Verify an activation token and return the staged registration.
    ///
    /// # Errors
    /// * `Expired` - Token outlived its 5-minute window
    /// * `Invalid` - Signature mismatch or malformed token
    pub fn verify_activation(&self, token: &str) -> Result<ActivationClaims, TokenError> {
        self.activation.verify(token)
    }

    /// Issue a short-lived access token for a user.
    ///
    /// Also used as the one-time password-reset credential: the reset link
    /// deliberately carries an ordinary access token rather than a fourth
    /// token kind.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue_access(&self, user_id: &str) -> Result<String, TokenError> {
        self.access
            .sign(&Self::session_claims(user_id, Duration::minutes(ACCESS_TTL_MINUTES)))
    }

    /// Verify an access token.
    ///
    /// # Errors
    /// * `Expired` - Token outlived its 15-minute window
    /// * `Invalid` - Signature mismatch or malformed token
    pub fn verify_access(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.access.verify(token)
    }

    /// Issue a long-lived refresh token for a user.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue_refresh(&self, user_id: &str) -> Result<String, TokenError> {
        self.refresh
            .sign(&Self::session_claims(user_id, Duration::days(REFRESH_TTL_DAYS)))
    }

    /// Verify a refresh token.
    ///
    /// # Errors
    /// * `Expired` - Token outlived its 7-day window
    /// * `Invalid` - Signature mismatch or malformed token
    pub fn verify_refresh(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.refresh.verify(token)
    }

    fn session_claims(user_id: &str, ttl: Duration) -> SessionClaims {
        let now = Utc::now();
        SessionClaims {
            id: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}
