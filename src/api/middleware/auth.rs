// Authentication gate: resolves the caller identity from a bearer token
// before any protected handler runs.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::state::AppState;
use crate::shared::error::ApiError;

/// Identity resolved per request from the session store.
/// Never populated from a client-controlled payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: Uuid,
    pub username: String,
}

/// Middleware that rejects requests without a valid session token.
///
/// On success the resolved [`CallerIdentity`] is stored in the request
/// extensions for handlers to pick up. A missing or unknown token is 401;
/// an unreachable session store fails closed with 500.
pub async fn auth_gate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract the bearer token from the Authorization header
    let token: &str = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;

    // 2. Resolve the session; a store failure must not pass as "unauthenticated"
    let payload: String = state
        .redis
        .fetch_session(token)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::Unauthorized)?;

    let identity: CallerIdentity =
        serde_json::from_str(&payload).map_err(|e| ApiError::Internal(e.into()))?;

    tracing::debug!(user_id = %identity.user_id, "Caller authenticated");

    // 3. Store in request extensions for downstream handlers
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Extracts the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value: &str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token: &str = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers: HeaderMap = headers_with_auth("Bearer abc-123");
        assert_eq!(bearer_token(&headers), Some("abc-123"));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers: HeaderMap = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn rejects_empty_token() {
        let headers: HeaderMap = headers_with_auth("Bearer   ");
        assert_eq!(bearer_token(&headers), None);
    }
}
