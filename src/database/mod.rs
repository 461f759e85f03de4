pub mod postgres_service;
pub mod redis_manager;

pub use postgres_service::DatabaseService;
pub use redis_manager::RedisService;
