// Todo resource handlers: one store statement per request, no multi-step
// transactions. The auth gate has already run for every route here.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::todos::model::{CreateTodoRequest, Todo, UpdateTodoRequest};
use crate::config::state::AppState;
use crate::shared::error::ApiError;

/// Lists all todos ordered by creation time
#[instrument(name = "list_todos", skip(state))]
pub async fn list_todos_handler(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let pool: &PgPool = state.database.get_pool()?;

    let todos: Vec<Todo> = sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, title, description, completed, created_at, updated_at
        FROM todos
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(Json(todos))
}

/// Creates a new todo; the store assigns the identifier
#[instrument(name = "create_todo", skip(state, payload))]
pub async fn create_todo_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(request): Json<CreateTodoRequest> = payload.map_err(ApiError::from)?;
    request.validate()?;

    let pool: &PgPool = state.database.get_pool()?;

    let todo: Todo = sqlx::query_as::<_, Todo>(
        r#"
        INSERT INTO todos (title, description, completed)
        VALUES ($1, $2, $3)
        RETURNING id, title, description, completed, created_at, updated_at
        "#,
    )
    .bind(request.title.trim())
    .bind(request.description)
    .bind(request.completed.unwrap_or(false))
    .fetch_one(pool)
    .await?;

    info!(todo_id = %todo.id, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Retrieves a single todo by id
#[instrument(name = "retrieve_todo", skip(state))]
pub async fn retrieve_todo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo_id: Uuid = parse_todo_id(&id)?;
    let pool: &PgPool = state.database.get_pool()?;

    let todo: Todo = sqlx::query_as::<_, Todo>(
        r#"
        SELECT id, title, description, completed, created_at, updated_at
        FROM todos
        WHERE id = $1
        "#,
    )
    .bind(todo_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(Json(todo))
}

/// Updates a todo from a full or partial payload.
/// Absent fields keep their stored value; `updated_at` always bumps.
#[instrument(name = "update_todo", skip(state, payload))]
pub async fn update_todo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let todo_id: Uuid = parse_todo_id(&id)?;
    let Json(request): Json<UpdateTodoRequest> = payload.map_err(ApiError::from)?;
    request.validate()?;

    let pool: &PgPool = state.database.get_pool()?;

    let todo: Todo = sqlx::query_as::<_, Todo>(
        r#"
        UPDATE todos
        SET title       = COALESCE($2, title),
            description = COALESCE($3, description),
            completed   = COALESCE($4, completed),
            updated_at  = NOW()
        WHERE id = $1
        RETURNING id, title, description, completed, created_at, updated_at
        "#,
    )
    .bind(todo_id)
    .bind(request.title.as_deref().map(str::trim))
    .bind(request.description)
    .bind(request.completed)
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NotFound)?;

    info!(todo_id = %todo.id, "Todo updated");
    Ok(Json(todo))
}

/// Deletes a todo; 204 on success, 404 if the id is unknown
#[instrument(name = "delete_todo", skip(state))]
pub async fn delete_todo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let todo_id: Uuid = parse_todo_id(&id)?;
    let pool: &PgPool = state.database.get_pool()?;

    let deleted: Option<(Uuid,)> = sqlx::query_as(
        r#"
        DELETE FROM todos
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(todo_id)
    .fetch_optional(pool)
    .await?;

    match deleted {
        Some(_) => {
            info!(todo_id = %todo_id, "Todo deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::NotFound),
    }
}

/// No entity can carry a malformed identifier, so the outcome is NotFound
fn parse_todo_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        let err: ApiError = parse_todo_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn valid_uuid_parses() {
        let id: Uuid = Uuid::new_v4();
        assert_eq!(parse_todo_id(&id.to_string()).unwrap(), id);
    }
}
