pub mod identity;
pub mod mail;
pub mod repositories;
pub mod upload;
