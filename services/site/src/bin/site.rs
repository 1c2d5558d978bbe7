//! services/site/src/bin/site.rs

use healthbook_core::ports::SessionService;
use site_lib::{
    adapters::{JwtSessionService, MockCredentialStore},
    config::Config,
    error::ApiError,
    gatekeeper::Gatekeeper,
    web::{router, state::AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let credentials = Arc::new(MockCredentialStore::new()?);
    let sessions: Arc<dyn SessionService> =
        Arc::new(JwtSessionService::new(&config.auth_secret, config.session_ttl));

    // --- 3. Build the Gatekeeper ---
    let gatekeeper = Arc::new(Gatekeeper::new(
        config.gatekeeper_settings(),
        sessions.clone(),
    )?);
    info!(
        locales = ?config.supported_locales,
        default_locale = %config.default_locale,
        enforce_roles = config.enforce_roles,
        "Gatekeeper ready"
    );

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        gatekeeper,
        credentials,
        sessions,
    });

    // --- 5. Create the Web Router ---
    let app = router(app_state);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
