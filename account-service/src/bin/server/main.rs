use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::user::service::AccountSettings;
use account_service::domain::user::service::Accounts;
use account_service::inbound::http::router::create_router;
use account_service::outbound::identity::HttpIdentityGateway;
use account_service::outbound::mail::HttpMailSender;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::upload::CloudinaryUploader;
use auth::TokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        client_url = %config.client.url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let tokens = Arc::new(TokenService::new(
        config.auth.activation_token_secret.as_bytes(),
        config.auth.access_token_secret.as_bytes(),
        config.auth.refresh_token_secret.as_bytes(),
    ));

    let repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let mail = Arc::new(HttpMailSender::new(&config.mail));
    let identity = Arc::new(HttpIdentityGateway::new(config.auth.google_client_id.clone()));
    let uploader = Arc::new(CloudinaryUploader::new(&config.cloudinary));

    let settings = AccountSettings {
        client_url: config.client.url.clone(),
        google_password_secret: config.auth.google_password_secret.clone(),
        facebook_password_secret: config.auth.facebook_password_secret.clone(),
    };

    let accounts = Arc::new(Accounts::new(
        repository,
        mail,
        identity,
        Arc::clone(&tokens),
        settings,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let app = create_router(accounts, tokens, uploader);
    axum::serve(listener, app).await?;

    Ok(())
}
