use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub client: ClientConfig,
    pub mail: MailConfig,
    pub cloudinary: CloudinaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Signing secrets and provider credentials, loaded once at start and
/// immutable for the lifetime of the process.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub activation_token_secret: String,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub google_client_id: String,
    pub google_password_secret: String,
    pub facebook_password_secret: String,
}

/// Frontend origin used to build activation and reset links.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub endpoint: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__ACCESS_TOKEN_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
