//! Credential primitives library
//!
//! Provides the stateless building blocks of the account backend:
//! - Password hashing (Argon2id)
//! - Signed, expiring tokens in three kinds (activation, access, refresh),
//!   each with its own secret and lifetime
//!
//! Nothing in this crate performs I/O or holds mutable state; the token
//! service is a pure function of its signing secrets, the clock, and its
//! input. The account service layers the authentication flow on top.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(
//!     b"activation_secret_32_bytes_long!",
//!     b"access_secret_at_least_32_bytes!",
//!     b"refresh_secret_at_least_32_byte!",
//! );
//!
//! let refresh = tokens.issue_refresh("user123").unwrap();
//! let claims = tokens.verify_refresh(&refresh).unwrap();
//! assert_eq!(claims.id, "user123");
//! ```

pub mod password;
pub mod tokens;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::ActivationClaims;
pub use tokens::SessionClaims;
pub use tokens::TokenError;
pub use tokens::TokenService;
