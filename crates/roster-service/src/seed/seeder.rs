//! Store population with generated records.

use super::RecordGenerator;
use crate::cache::CacheInterface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use roster_core::{RosterError, RosterResult};
use roster_repository::UserRepository;
use std::sync::Arc;
use tracing::{info, warn};

/// Largest number of records a single seed may generate.
pub const MAX_SEED_COUNT: usize = 1000;

/// Replaces the stored users with freshly generated ones.
pub struct DataSeeder {
    repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    max_count: usize,
}

impl DataSeeder {
    /// Creates a seeder writing to `repository` and invalidating `cache`.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            repository,
            cache,
            max_count: MAX_SEED_COUNT,
        }
    }

    /// Lowers the largest accepted count. Values above [`MAX_SEED_COUNT`]
    /// are capped.
    #[must_use]
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count.min(MAX_SEED_COUNT);
        self
    }

    /// Generates `count` users and swaps them in atomically.
    ///
    /// Nothing is written when generation fails. The cache is cleared once
    /// the new rows are committed.
    pub async fn seed(&self, count: usize) -> RosterResult<u64> {
        if count == 0 || count > self.max_count {
            return Err(RosterError::validation(format!(
                "count: must be between 1 and {}",
                self.max_count
            )));
        }

        info!(count, "Seeding users");

        let users = {
            let rng = StdRng::from_rng(&mut rand::rng());
            let today = chrono::Utc::now().date_naive();
            RecordGenerator::new(rng, today).generate(count)?
        };

        let inserted = self.repository.replace_all(&users).await?;

        if let Err(e) = self.cache.clear().await {
            warn!(error = %e, "Failed to clear cache after seeding");
        }

        info!(inserted, "Seeding complete");
        Ok(inserted)
    }
}

impl std::fmt::Debug for DataSeeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSeeder")
            .field("max_count", &self.max_count)
            .finish_non_exhaustive()
    }
}
