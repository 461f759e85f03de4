// Todo resource route definitions

use axum::{routing::get, Router};

use super::handler;
use crate::config::state::AppState;

/// Creates the router for the Todo collection and item endpoints.
/// The auth gate is layered on by the server composition.
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todos",
            get(handler::list_todos_handler).post(handler::create_todo_handler),
        )
        .route(
            "/todos/{id}",
            get(handler::retrieve_todo_handler)
                .put(handler::update_todo_handler)
                .patch(handler::update_todo_handler)
                .delete(handler::delete_todo_handler),
        )
}
