// =============================================================================
// DATABASE SERVICE - PostgreSQL pool + schema bootstrap
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::environment::EnvironmentVariables;

/// Single initialization SQL script (todos + users tables)
const INIT_SCHEMA_SQL: &str = include_str!("sql/schema_init.sql");

/// Database service managing a single PostgreSQL connection pool.
/// The persistence store for the Todo resource and user accounts.
#[derive(Clone, Debug)]
pub struct DatabaseService {
    /// Single connection pool for the application
    pool: Arc<OnceCell<PgPool>>,
    /// Environment configuration
    config: Arc<EnvironmentVariables>,
}

impl DatabaseService {
    /// Creates a new DatabaseService instance.
    /// Note: The pool is not initialized until `initialize()` is called.
    pub fn new(config: Arc<EnvironmentVariables>) -> Self {
        Self {
            pool: Arc::new(OnceCell::new()),
            config,
        }
    }

    /// Initializes the database service by creating the pool and running the
    /// schema bootstrap.
    pub async fn initialize(&self) -> Result<()> {
        info!("Initializing DatabaseService...");

        self.pool
            .get_or_try_init(|| async { self.create_pool().await })
            .await?;

        let pool: &PgPool = self.get_pool()?;
        self.initialize_schema(pool).await?;

        info!("DatabaseService initialized successfully");
        Ok(())
    }

    /// Gracefully shuts down the service.
    pub async fn shutdown(&self) {
        info!("Initiating DatabaseService shutdown...");
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("Database connection pool closed");
        } else {
            debug!("Database pool was not initialized, nothing to close");
        }
    }

    /// Returns the connection pool.
    /// Errors if the pool has not been initialized.
    pub fn get_pool(&self) -> Result<&PgPool> {
        self.pool
            .get()
            .ok_or_else(|| anyhow::anyhow!("Database pool not initialized"))
    }
}

// =============================================================================
// INTERNAL HELPERS
// =============================================================================

impl DatabaseService {
    /// Creates the connection pool based on environment config
    async fn create_pool(&self) -> Result<PgPool> {
        let connect_options: PgConnectOptions = self.create_connect_options()?;

        let pool: PgPool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .idle_timeout(std::time::Duration::from_secs(30))
            .connect_with(connect_options)
            .await
            .context("Failed to create database connection pool")?;

        Ok(pool)
    }

    /// Creates connection options with SSL and UTC timezone
    fn create_connect_options(&self) -> Result<PgConnectOptions> {
        let mut options: PgConnectOptions = PgConnectOptions::new()
            .host(&self.config.db_host)
            .port(self.config.db_port)
            .username(&self.config.db_user)
            .password(&self.config.db_password)
            .database(&self.config.db_name);

        // Always use UTC and standard app name
        options = options.options([("timezone", "UTC"), ("application_name", "todo-api")]);

        // Configure SSL based on environment
        let is_development: bool = self.config.environment == "development";
        if !is_development {
            options = options.ssl_mode(sqlx::postgres::PgSslMode::Require);
        } else {
            options = options.ssl_mode(sqlx::postgres::PgSslMode::Prefer);
        }

        Ok(options)
    }

    /// Runs the initialization SQL
    async fn initialize_schema(&self, pool: &PgPool) -> Result<()> {
        info!("Executing schema initialization...");

        pool.execute(INIT_SCHEMA_SQL)
            .await
            .context("Failed to execute schema initialization SQL")?;

        info!("Schema initialization completed");
        Ok(())
    }
}
