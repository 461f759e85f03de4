use axum::{routing::get, Router};

use super::handler;
use crate::config::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handler::health_handler))
}
