//! Caching infrastructure for the service layer.
//!
//! Query results are memoized for a short, fixed lifetime under a signature
//! derived from the exact request. The whole cache is dropped whenever the
//! stored data is replaced.

mod cache_interface;
pub mod cache_keys;
mod in_memory_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use in_memory_cache::{InMemoryCache, InMemoryCacheParameters, DEFAULT_TTL};
