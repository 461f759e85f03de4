use axum::{routing::post, Router};

use super::handler;
use crate::config::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handler::register_handler))
        .route("/auth/login", post(handler::login_handler))
}
