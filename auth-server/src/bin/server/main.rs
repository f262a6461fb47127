use std::sync::Arc;

use auth::PasswordHasher;
use auth::SecretKey;
use auth::TokenService;
use auth_server::config::Config;
use auth_server::domain::user::service::UserService;
use auth_server::inbound::http::router::create_router;
use auth_server::outbound::repositories::InMemoryUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-server",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        directory_users = config.directory.users.len(),
        "Configuration loaded"
    );

    let secret = SecretKey::new(config.token.secret.as_bytes())?;
    let token_service = Arc::new(TokenService::new(&secret)?);
    drop(secret);

    let user_repository = Arc::new(InMemoryUserRepository::from_seed(
        &config.directory.users,
        &PasswordHasher::new(),
    )?);
    tracing::info!(
        users = user_repository.len(),
        storage = "in-memory",
        "User directory ready"
    );

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&token_service),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, token_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
