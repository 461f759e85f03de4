// Account registration and session issuance.
// These are the only unauthenticated application routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{PgPool, Row};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::middleware::auth::CallerIdentity;
use crate::config::state::AppState;
use crate::shared::error::ApiError;

const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;

// Postgres unique_violation
const PG_UNIQUE_VIOLATION: &str = "23505";

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Registers a new user with a bcrypt-hashed password
#[instrument(name = "register", skip(state, payload))]
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let Json(request): Json<RegisterRequest> = payload.map_err(ApiError::from)?;
    validate_registration(&request)?;

    let username: String = request.username.trim().to_lowercase();

    let password_hash: String = hash(request.password.as_bytes(), DEFAULT_COST)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let pool: &PgPool = state.database.get_pool()?;

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&username)
    .bind(request.email.trim())
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => {
            let user_id: Uuid = row.get("id");
            info!(user_id = %user_id, "User registered");

            Ok((
                StatusCode::CREATED,
                Json(json!({ "user_id": user_id, "username": username })),
            ))
        }
        Err(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) =>
        {
            Err(ApiError::Conflict(
                "username or email already registered".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Verifies credentials and issues a session token stored in Redis
#[instrument(name = "login", skip(state, payload))]
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request): Json<LoginRequest> = payload.map_err(ApiError::from)?;

    let username: String = request.username.trim().to_lowercase();
    let pool: &PgPool = state.database.get_pool()?;

    let row = sqlx::query(
        r#"
        SELECT id, username, password_hash
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(&username)
    .fetch_optional(pool)
    .await?;

    // Unknown user and wrong password are indistinguishable to the caller
    let row = row.ok_or(ApiError::Unauthorized)?;
    let stored_hash: String = row.get("password_hash");

    if !verify(request.password.as_bytes(), &stored_hash).unwrap_or(false) {
        return Err(ApiError::Unauthorized);
    }

    let identity: CallerIdentity = CallerIdentity {
        user_id: row.get("id"),
        username: row.get("username"),
    };

    let token: String = Uuid::new_v4().to_string();
    let session_payload: String =
        serde_json::to_string(&identity).map_err(|e| ApiError::Internal(e.into()))?;

    state
        .redis
        .store_session(&token, &session_payload, state.environment.session_ttl_seconds)
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = %identity.user_id, "Session issued");

    Ok(Json(AuthResponse {
        token,
        user_id: identity.user_id,
    }))
}

// =============================================================================
// VALIDATION
// =============================================================================

fn validate_registration(request: &RegisterRequest) -> Result<(), ApiError> {
    let username: &str = request.username.trim();

    if username.is_empty() {
        return Err(ApiError::Validation("username cannot be empty".to_string()));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ApiError::Validation(format!(
            "username cannot exceed {MAX_USERNAME_LENGTH} characters"
        )));
    }

    if !username
        .chars()
        .all(|c: char| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::Validation(
            "username can only contain alphanumeric characters, underscores, and hyphens"
                .to_string(),
        ));
    }

    if !request.email.contains('@') {
        return Err(ApiError::Validation("invalid email address".to_string()));
    }

    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(validate_registration(&request("alice", "alice@example.com", "hunter2-plus")).is_ok());
    }

    #[test]
    fn rejects_empty_username() {
        assert!(validate_registration(&request("  ", "a@b.c", "longenough")).is_err());
    }

    #[test]
    fn rejects_username_with_spaces() {
        assert!(validate_registration(&request("al ice", "a@b.c", "longenough")).is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(validate_registration(&request("alice", "a@b.c", "short")).is_err());
    }

    #[test]
    fn rejects_email_without_at() {
        assert!(validate_registration(&request("alice", "not-an-email", "longenough")).is_err());
    }
}
