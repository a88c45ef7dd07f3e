//! Process-local cache with a fixed entry lifetime.

use super::CacheInterface;
use roster_core::RosterResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Default entry lifetime (30 seconds).
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

struct CacheEntry {
    value: String,
    inserted_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    generation: u64,
}

/// In-memory cache keyed by request signature.
///
/// Entries are checked for age when read; nothing runs in the background.
/// An entry is live while `now - inserted_at < ttl`. The map is unbounded:
/// memory grows with the number of distinct signatures seen within a TTL
/// window plus any stale entries that are never read again.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCache {
    #[shaku(force_default)]
    state: Mutex<CacheState>,
    /// Entry lifetime.
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
}

impl InMemoryCache {
    /// Creates a cache with the default lifetime.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom entry lifetime.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            state: Mutex::default(),
            ttl,
        }
    }

    /// Returns the entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the number of stored entries, live or stale.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        let mut state = self.state.lock();

        let Some(entry) = state.entries.get(key) else {
            return Ok(None);
        };

        if entry.inserted_at.elapsed() < self.ttl {
            return Ok(Some(entry.value.clone()));
        }

        debug!(key, "Cache entry expired");
        state.entries.remove(key);
        Ok(None)
    }

    fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    async fn set_raw(&self, key: &str, value: &str, generation: u64) -> RosterResult<bool> {
        let mut state = self.state.lock();
        if state.generation != generation {
            return Ok(false);
        }

        state.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                inserted_at: Instant::now(),
            },
        );
        Ok(true)
    }

    async fn clear(&self) -> RosterResult<usize> {
        let dropped = {
            let mut state = self.state.lock();
            let dropped = state.entries.len();
            state.entries.clear();
            state.generation = state.generation.wrapping_add(1);
            dropped
        };
        info!(dropped, "Cache cleared");
        Ok(dropped)
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
