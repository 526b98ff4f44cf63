pub mod claims;
pub mod errors;
pub mod service;

pub use claims::ActivationClaims;
pub use claims::SessionClaims;
pub use errors::TokenError;
pub use service::TokenService;
