use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` is separated from `Invalid` so callers can distinguish a
/// session that needs re-login from garbage input; both still fail closed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}
