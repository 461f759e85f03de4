/*
    * Handler logic for the "hello" endpoint: a read-only greeting for the
    * authenticated caller. The identity comes from the auth gate, never
    * from the request payload.
*/

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::api::middleware::auth::CallerIdentity;

#[tracing::instrument(name = "hello", skip(identity), fields(username = %identity.username))]
pub async fn hello_handler(Extension(identity): Extension<CallerIdentity>) -> Json<Value> {
    Json(json!({ "message": greeting(&identity.username) }))
}

fn greeting(username: &str) -> String {
    format!("Hello, {username}!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_caller_by_username() {
        assert_eq!(greeting("alice"), "Hello, alice!");
    }
}
