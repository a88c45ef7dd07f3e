//! Server startup utilities.

use crate::di::{build_app_module, AppModule, DatabaseResolver};
use roster_config::{AppConfig, SeedConfig};
use roster_core::RosterResult;
use roster_service::UserService;
use std::sync::Arc;
use tracing::{info, warn};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/

                Data Table API
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("{}", separator);
}

/// Connects to the store, runs migrations when enabled and wires every
/// component.
pub async fn bootstrap(config: &AppConfig) -> RosterResult<Arc<AppModule>> {
    let module = build_app_module(config).await?;

    if config.database.run_migrations {
        module.database_pool().run_migrations().await?;
    }

    Ok(module)
}

/// Seeds the store when it is empty.
///
/// Failures are logged and startup continues. Returns the number of records
/// inserted.
pub async fn auto_seed(service: &Arc<dyn UserService>, config: &SeedConfig) -> u64 {
    if !config.auto_seed {
        return 0;
    }

    let existing = match service.count_users().await {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "Could not count users, skipping startup seed");
            return 0;
        }
    };

    if existing > 0 {
        info!(existing, "Store already populated, skipping startup seed");
        return 0;
    }

    match service.seed(config.auto_seed_count).await {
        Ok(inserted) => {
            info!(inserted, "Seeded empty store on startup");
            inserted
        }
        Err(e) => {
            warn!(error = %e, "Startup seed failed");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::ServiceResolver;
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

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info("0.0.0.0:8000");
    }

    #[tokio::test]
    async fn test_bootstrap_migrates_store() {
        let module = bootstrap(&memory_config()).await.unwrap();
        assert_eq!(module.user_service().count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_unknown_scheme() {
        let mut config = memory_config();
        config.database.url = "redis://localhost".to_string();
        assert!(bootstrap(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_auto_seed_fills_empty_store_once() {
        let module = bootstrap(&memory_config()).await.unwrap();
        let service = module.user_service();
        let config = SeedConfig {
            auto_seed_count: 25,
            ..SeedConfig::default()
        };

        assert_eq!(auto_seed(&service, &config).await, 25);
        assert_eq!(auto_seed(&service, &config).await, 0);
        assert_eq!(service.count_users().await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_auto_seed_disabled() {
        let module = bootstrap(&memory_config()).await.unwrap();
        let service = module.user_service();
        let config = SeedConfig {
            auto_seed: false,
            ..SeedConfig::default()
        };

        assert_eq!(auto_seed(&service, &config).await, 0);
        assert_eq!(service.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_auto_seed_failure_is_not_fatal() {
        let module = bootstrap(&memory_config()).await.unwrap();
        let service = module.user_service();
        let config = SeedConfig {
            auto_seed_count: 5000,
            ..SeedConfig::default()
        };

        assert_eq!(auto_seed(&service, &config).await, 0);
    }
}
