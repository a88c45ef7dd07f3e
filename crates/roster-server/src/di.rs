//! Dependency injection module using Shaku.
//!
//! [`AppModule`] holds every component of a single-process deployment:
//!
//! ```text
//! DatabasePool ─► SqlUserRepository ─┐
//!                                    ├─► UserServiceImpl
//!          InMemoryCache ────────────┘
//! ```

use roster_config::{AppConfig, CacheConfig, SeedConfig};
use roster_core::RosterResult;
use roster_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, DbPool, SqlUserRepository,
    UserRepository,
};
use roster_service::{
    CacheInterface, InMemoryCache, InMemoryCacheParameters, UserService, UserServiceImpl,
    UserServiceImplParameters,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Shaku Module Definition
// ============================================================================

module! {
    pub AppModule {
        components = [
            DatabasePool,
            SqlUserRepository,
            InMemoryCache,
            UserServiceImpl,
        ],
        providers = [],
    }
}

impl std::fmt::Debug for AppModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppModule").finish_non_exhaustive()
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Connects to the configured store and builds the module around it.
pub async fn build_app_module(config: &AppConfig) -> RosterResult<Arc<AppModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;
    Ok(Arc::new(assemble(db_pool.pool().clone(), &config.cache, &config.seed)))
}

/// Builds the module over an already connected pool.
fn assemble(pool: DbPool, cache: &CacheConfig, seed: &SeedConfig) -> AppModule {
    debug!(ttl_secs = cache.ttl_secs, seed_limit = seed.max_count, "Building application module");

    AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { pool })
        .with_component_parameters::<InMemoryCache>(InMemoryCacheParameters { ttl: cache.ttl() })
        .with_component_parameters::<UserServiceImpl>(UserServiceImplParameters {
            seed_limit: seed.max_count,
        })
        .build()
}

// ============================================================================
// Module Resolution Helpers
// ============================================================================

/// Trait for resolving the service facade.
pub trait ServiceResolver {
    /// Resolves the user service from the module.
    fn user_service(&self) -> Arc<dyn UserService>;
}

impl ServiceResolver for AppModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }
}

/// Trait for resolving the database pool.
pub trait DatabaseResolver {
    /// Resolves the database pool from the module.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for AppModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

/// Trait for resolving the repository.
pub trait RepositoryResolver {
    /// Resolves the user repository from the module.
    fn user_repository(&self) -> Arc<dyn UserRepository>;
}

impl RepositoryResolver for AppModule {
    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }
}

/// Trait for resolving the response cache.
pub trait CacheResolver {
    /// Resolves the cache from the module.
    fn cache(&self) -> Arc<dyn CacheInterface>;
}

impl CacheResolver for AppModule {
    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_config::DatabaseConfig;

    fn memory_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                ..DatabaseConfig::default()
            },
            ..AppConfig::default()
        }
    }

    async fn migrated_module(config: &AppConfig) -> Arc<AppModule> {
        let module = build_app_module(config).await.unwrap();
        module.database_pool().run_migrations().await.unwrap();
        module
    }

    #[test]
    fn test_resolver_traits_are_object_safe() {
        fn _use_service_resolver(_r: &dyn ServiceResolver) {}
        fn _use_database_resolver(_r: &dyn DatabaseResolver) {}
        fn _use_repository_resolver(_r: &dyn RepositoryResolver) {}
        fn _use_cache_resolver(_r: &dyn CacheResolver) {}
    }

    #[tokio::test]
    async fn test_unsupported_scheme_fails_to_build() {
        let mut config = memory_config();
        config.database.url = "redis://localhost".to_string();
        let err = build_app_module(&config).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_components_share_one_cache() {
        let module = migrated_module(&memory_config()).await;

        module.user_service().list_roles().await.unwrap();
        assert_eq!(module.cache().clear().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_components_share_one_pool() {
        let module = migrated_module(&memory_config()).await;

        module.user_service().seed(4).await.unwrap();
        assert_eq!(module.user_repository().count().await.unwrap(), 4);
        module.database_pool().health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_limit_comes_from_config() {
        let mut config = memory_config();
        config.seed.max_count = 10;
        let module = migrated_module(&config).await;

        assert!(module.user_service().seed(11).await.is_err());
        assert_eq!(module.user_service().seed(10).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_cache_ttl_comes_from_config() {
        let mut config = memory_config();
        config.cache.ttl_secs = 0;
        let module = migrated_module(&config).await;
        let cache = module.cache();

        assert!(cache.set_raw("k", "1", cache.generation()).await.unwrap());
        assert!(cache.get_raw("k").await.unwrap().is_none());
    }
}
