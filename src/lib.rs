// Library root for the Todo REST API

pub mod api;
pub mod config;
pub mod core;
pub mod database;
pub mod shared;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::database::{DatabaseService, RedisService};
pub use crate::shared::error::ApiError;
