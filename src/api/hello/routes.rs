/*
    * Route definition for the "hello" endpoint.
    * One GET route at `/hello`; the auth gate is layered on by the server.
*/

use axum::{routing::get, Router};

use crate::api::hello::handler::hello_handler;
use crate::config::state::AppState;

pub fn hello_routes() -> Router<AppState> {
    Router::new().route("/hello", get(hello_handler))
}
