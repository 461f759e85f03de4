// Application server configuration and setup

use std::time::Duration;

use anyhow::Result;
use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tower::{timeout::TimeoutLayer, ServiceBuilder};

use crate::api::auth::routes::auth_routes;
use crate::api::health::routes::health_routes;
use crate::api::hello::routes::hello_routes;
use crate::api::middleware::auth::auth_gate;
use crate::api::middleware::request_log::request_log_middleware;
use crate::api::todos::routes::todo_routes;
use crate::config::state::AppState;
use crate::shared::error_handler::handle_global_error;

/// Creates and configures the application router with all middleware layers.
///
/// The authentication gate is composed explicitly around the todo and hello
/// routers; auth and health endpoints stay outside it.
pub fn create_app(state: AppState) -> Router {
    let timeout_seconds: u64 = state.environment.default_timeout_seconds;
    let max_body_size: usize = state.environment.max_request_body_size;

    let protected: Router<AppState> = Router::new()
        .merge(todo_routes())
        .merge(hello_routes())
        .route_layer(from_fn_with_state(state.clone(), auth_gate));

    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_log_middleware))
                .layer(HandleErrorLayer::new(handle_global_error))
                .layer(TimeoutLayer::new(Duration::from_secs(timeout_seconds)))
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(state)
}

/// Sets up the TCP listener from environment or binds to new address
pub async fn setup_listener() -> Result<TcpListener> {
    let env: &std::sync::Arc<crate::config::environment::EnvironmentVariables> =
        &AppState::instance().environment;
    let mut listenfd: ListenFd = ListenFd::from_env();

    let listener: TcpListener = match listenfd.take_tcp_listener(0)? {
        Some(std_listener) => {
            std_listener.set_nonblocking(true)?;
            TcpListener::from_std(std_listener)?
        }
        None => {
            let addr: String = format!("{}:{}", env.host, env.port);
            TcpListener::bind(&addr).await?
        }
    };

    Ok(listener)
}

/// Handles graceful shutdown signals (Ctrl+C and TERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate: std::future::Pending<()> = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("Shutting down via TERM signal"),
    }

    // Gracefully close database connections
    AppState::shutdown().await;
}
