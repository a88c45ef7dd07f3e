//! Database connection pool management.
//!
//! The service runs against PostgreSQL in deployed environments and SQLite
//! locally and in tests. [`DbPool`] holds whichever pool the configured URL
//! selects; store code dispatches on it with [`with_pool!`](crate::with_pool).

use roster_config::DatabaseConfig;
use roster_core::{Interface, RosterError, RosterResult};
use async_trait::async_trait;
use shaku::Component;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{info, warn};

/// Which relational backend a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    Sqlite,
}

impl DatabaseBackend {
    /// Detects the backend from a connection URL.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }

    /// Returns the backend name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

/// A connection pool for one of the supported backends.
#[derive(Debug, Clone)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DbPool {
    /// Returns the backend this pool talks to.
    #[must_use]
    pub const fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Postgres(_) => DatabaseBackend::Postgres,
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
        }
    }
}

/// Runs `$body` against the concrete pool inside a [`DbPool`].
///
/// `$p` is bound to the inner pool and `$db` is declared as the matching
/// `sqlx::Database` type, so the body is written once and compiled per
/// backend.
#[macro_export]
macro_rules! with_pool {
    ($pool:expr, |$p:ident, $db:ident| $body:expr) => {
        match $pool {
            $crate::DbPool::Postgres($p) => {
                #[allow(dead_code)]
                type $db = ::sqlx::Postgres;
                $body
            }
            $crate::DbPool::Sqlite($p) => {
                #[allow(dead_code)]
                type $db = ::sqlx::Sqlite;
                $body
            }
        }
    };
}

/// Interface for database pool operations.
///
/// This trait abstracts database pool functionality for dependency injection.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns the underlying pool.
    fn pool(&self) -> &DbPool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> RosterResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> RosterResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
///
/// Registered as a component with the already connected pool passed in as
/// its parameter, since connecting is async.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    /// The connected pool.
    pool: DbPool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> RosterResult<Self> {
        let backend = DatabaseBackend::from_url(&config.url).ok_or_else(|| {
            RosterError::Configuration(format!(
                "Unsupported database URL scheme: {}",
                redact(&config.url)
            ))
        })?;

        info!(backend = backend.as_str(), "Connecting to database...");

        let pool = match backend {
            DatabaseBackend::Postgres => DbPool::Postgres(Self::connect_postgres(config).await?),
            DatabaseBackend::Sqlite => DbPool::Sqlite(Self::connect_sqlite(config).await?),
        };

        info!(backend = backend.as_str(), "Database connection pool established");
        Ok(Self { pool })
    }

    async fn connect_postgres(config: &DatabaseConfig) -> RosterResult<PgPool> {
        PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                RosterError::Database(format!("Failed to connect: {}", e))
            })
    }

    async fn connect_sqlite(config: &DatabaseConfig) -> RosterResult<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        // Every connection to `:memory:` opens its own empty database, so an
        // in-memory pool must keep exactly one connection alive forever.
        let pool_options = if is_in_memory(&config.url) {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .min_connections(config.min_connections)
                .max_connections(config.max_connections)
                .idle_timeout(Some(config.idle_timeout()))
        };

        pool_options
            .acquire_timeout(config.connect_timeout())
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!("Failed to open SQLite database: {}", e);
                RosterError::Database(format!("Failed to connect: {}", e))
            })
    }

    /// Returns the backend this pool talks to.
    #[must_use]
    pub const fn backend(&self) -> DatabaseBackend {
        self.pool.backend()
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn health_check(&self) -> RosterResult<()> {
        with_pool!(&self.pool, |p, DB| {
            sqlx::query("SELECT 1")
                .execute(p)
                .await
                .map_err(|e| RosterError::Database(format!("Health check failed: {}", e)))?;
        });
        Ok(())
    }

    async fn run_migrations(&self) -> RosterResult<()> {
        info!("Running database migrations...");
        match &self.pool {
            DbPool::Postgres(p) => sqlx::migrate!("../../migrations/postgres").run(p).await?,
            DbPool::Sqlite(p) => sqlx::migrate!("../../migrations/sqlite").run(p).await?,
        }
        info!("Database migrations completed");
        Ok(())
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        with_pool!(&self.pool, |p, DB| p.close().await);
        info!("Database connection pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (size, idle) = with_pool!(&self.pool, |p, DB| (p.size(), p.num_idle()));
        f.debug_struct("DatabasePool")
            .field("backend", &self.backend())
            .field("size", &size)
            .field("num_idle", &idle)
            .finish()
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Strips credentials from a URL before it is logged or returned.
fn redact(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{}://***@{}", scheme, host),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_backend_detection() {
        assert_eq!(DatabaseBackend::from_url("postgres://u@h/db"), Some(DatabaseBackend::Postgres));
        assert_eq!(DatabaseBackend::from_url("postgresql://u@h/db"), Some(DatabaseBackend::Postgres));
        assert_eq!(DatabaseBackend::from_url("sqlite://data.db?mode=rwc"), Some(DatabaseBackend::Sqlite));
        assert_eq!(DatabaseBackend::from_url("sqlite::memory:"), Some(DatabaseBackend::Sqlite));
        assert_eq!(DatabaseBackend::from_url("mysql://u@h/db"), None);
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://data.db?mode=rwc"));
    }

    #[test]
    fn test_redact_hides_credentials() {
        assert_eq!(redact("mysql://user:secret@db:3306/app"), "mysql://***@db:3306/app");
        assert_eq!(redact("sqlite://data.db"), "sqlite://data.db");
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_configuration_error() {
        let config = DatabaseConfig {
            url: "mysql://user:secret@db/app".to_string(),
            ..DatabaseConfig::default()
        };
        let err = DatabasePool::connect(&config).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_in_memory_pool_is_shared_and_healthy() {
        let pool = DatabasePool::connect(&memory_config()).await.unwrap();
        assert_eq!(pool.backend(), DatabaseBackend::Sqlite);
        pool.run_migrations().await.unwrap();
        pool.health_check().await.unwrap();

        // The table created by the migration is visible through the pool.
        let DbPool::Sqlite(p) = pool.pool() else {
            panic!("expected sqlite pool");
        };
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(p)
            .await
            .unwrap();
        assert_eq!(count, 0);
        pool.close().await;
    }
}
