use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use authkit_shared::config::AppConfig;

mod context;
mod handlers;
mod response;
mod state;

use context::AppContext;
use handlers::{health, roles, users};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    authkit_shared::telemetry::init_telemetry();

    info!("Authkit server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Construct the persistence context; the connection itself opens on
    // first use.
    let ctx = Arc::new(AppContext::connect(&config.database)?);
    ctx.migrate().await?;
    info!("Persistence context ready.");

    let state = AppState { ctx: Arc::clone(&ctx), config: config.clone() };

    // Build router
    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/users", get(users::list_users))
        .route("/api/v1/users", post(users::create_user))
        .route("/api/v1/users/{id}", get(users::get_user))
        .route("/api/v1/users/{id}", put(users::update_user))
        .route("/api/v1/users/{id}", delete(users::delete_user))
        .route("/api/v1/users/{id}/roles", get(users::user_roles))
        .route("/api/v1/users/{id}/roles/{role}", post(users::add_user_to_role))
        .route("/api/v1/users/{id}/roles/{role}", delete(users::remove_user_from_role))
        .route("/api/v1/roles", get(roles::list_roles))
        .route("/api/v1/roles", post(roles::create_role))
        .route("/api/v1/roles/{id}", delete(roles::delete_role))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the context on all exit paths of the serve loop.
    ctx.close().await;
    info!("Persistence context closed, shutting down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
