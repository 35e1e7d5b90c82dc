pub mod config;
pub mod db;
pub mod errors;
pub mod http;
mod middleware;
pub mod models;
pub mod state;

use axum::Router;
use tokio::{net::TcpListener, signal::ctrl_c};
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

use config::Config;
use errors::AppError;
use middleware::{cors_layer, trace_layer};
use state::AppState;

/// Full application router: the feedback API, the health probe and, in
/// production, the web client build.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let mut app = Router::new().merge(http::create_http_routes(state));

    app = if config.environment.is_production() {
        app.merge(http::create_static_routes(&config.static_dir))
    } else {
        app.fallback(http::not_found)
    };

    app.layer(cors_layer(config.allowed_origins.clone()))
        .layer(trace_layer())
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let store = db::connect(&config.database_url).await?;
    let state = AppState {
        store: store.clone(),
        environment: config.environment,
    };

    let app = build_app(state, &config);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Backend running on port {}", config.port);
    tracing::info!("Database location: {}", config.database_url);
    tracing::info!("Environment: {}", config.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down, closing {} store", store.backend());
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
