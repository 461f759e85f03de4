use axum::{serve, Router};
use tokio::net::TcpListener;

use todo_api::config::state::AppState;
use todo_api::core::{logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let state: AppState = AppState::instance().clone();

    // Bootstrap the schema and verify Redis before accepting traffic
    AppState::initialize_services().await?;

    let app: Router = server::create_app(state);
    let listener: TcpListener = server::setup_listener().await?;

    tracing::info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
