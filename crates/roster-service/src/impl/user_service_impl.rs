//! User service implementations.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::UserListResponse;
use crate::seed::{DataSeeder, MAX_SEED_COUNT};
use crate::user_service::UserService;
use roster_core::{HealthCheck, HealthStatus, RosterResult, UserQuery};
use roster_repository::UserRepository;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cached user service over a [`UserRepository`].
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    /// Largest count accepted by [`UserService::seed`].
    #[shaku(default = MAX_SEED_COUNT)]
    seed_limit: usize,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(repository: Arc<dyn UserRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            repository,
            cache,
            seed_limit: MAX_SEED_COUNT,
        }
    }

    fn seeder(&self) -> DataSeeder {
        DataSeeder::new(Arc::clone(&self.repository), Arc::clone(&self.cache))
            .with_max_count(self.seed_limit)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self, query: UserQuery) -> RosterResult<UserListResponse> {
        debug!(
            skip = query.page.skip,
            limit = query.page.limit,
            search = ?query.search,
            department = ?query.department,
            role = ?query.role,
            "Listing users"
        );

        let key = cache_keys::user_list(&query);
        self.cache
            .get_or_compute(&key, || async {
                let page = self.repository.find_page(&query).await?;
                Ok(UserListResponse::from(page))
            })
            .await
    }

    async fn list_departments(&self) -> RosterResult<Vec<String>> {
        debug!("Listing departments");
        self.cache
            .get_or_compute(cache_keys::DEPARTMENTS, || self.repository.distinct_departments())
            .await
    }

    async fn list_roles(&self) -> RosterResult<Vec<String>> {
        debug!("Listing roles");
        self.cache
            .get_or_compute(cache_keys::ROLES, || self.repository.distinct_roles())
            .await
    }

    async fn health(&self) -> HealthStatus {
        self.check().await
    }

    async fn seed(&self, count: usize) -> RosterResult<u64> {
        let result = self.seeder().seed(count).await;

        // A failed seed rolled the store back; drop the cache anyway.
        if result.is_err() {
            if let Err(e) = self.cache.clear().await {
                warn!(error = %e, "Failed to clear cache after failed seed");
            }
        }

        result
    }

    async fn clear_cache(&self) -> RosterResult<usize> {
        let dropped = self.cache.clear().await?;
        info!(dropped, "Cache cleared");
        Ok(dropped)
    }

    async fn count_users(&self) -> RosterResult<u64> {
        self.repository.count().await
    }
}

#[async_trait]
impl HealthCheck for UserServiceImpl {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match self.repository.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                HealthStatus::Unhealthy(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("seed_limit", &self.seed_limit)
            .finish_non_exhaustive()
    }
}
