// Todo entity and request payloads with their shape rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::ApiError;

const MAX_TITLE_LENGTH: usize = 200;

/// The persisted Todo entity, rendered as-is in response bodies.
/// The identifier is assigned by the store on creation and immutable.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl CreateTodoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_title(&self.title)
    }
}

/// Partial update payload; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.is_none() && self.description.is_none() && self.completed.is_none() {
            return Err(ApiError::Validation(
                "at least one of 'title', 'description' or 'completed' is required".to_string(),
            ));
        }

        if let Some(title) = &self.title {
            validate_title(title)?;
        }

        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    // The trimmed value is what gets stored, so it is what gets measured
    let trimmed: &str = title.trim();

    if trimmed.is_empty() {
        return Err(ApiError::Validation("title cannot be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(ApiError::Validation(format!(
            "title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }

    Ok(())
}
