use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an activation token.
///
/// A registration is staged entirely inside this token: nothing is written
/// to the store until the token comes back through activation. The password
/// is already hashed when it enters the claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivationClaims {
    pub name: String,
    pub email: String,
    pub password_hash: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Claims carried by access and refresh tokens.
///
/// Both session kinds carry only the user id; they differ in signing secret
/// and lifetime, never in shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// User identifier the token was issued for
    pub id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
