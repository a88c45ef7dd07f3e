//! User service trait definition.

use crate::dto::UserListResponse;
use roster_core::{HealthStatus, Interface, RosterResult, UserQuery};
use async_trait::async_trait;

/// User service trait.
///
/// Every read goes through the response cache. Writes (seeding) and explicit
/// clears drop the whole cache.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists one page of users matching `query`.
    async fn list_users(&self, query: UserQuery) -> RosterResult<UserListResponse>;

    /// Lists the distinct departments, sorted.
    async fn list_departments(&self) -> RosterResult<Vec<String>>;

    /// Lists the distinct roles, sorted.
    async fn list_roles(&self) -> RosterResult<Vec<String>>;

    /// Reports whether the store answers.
    async fn health(&self) -> HealthStatus;

    /// Replaces the stored users with `count` generated ones.
    async fn seed(&self, count: usize) -> RosterResult<u64>;

    /// Drops every cached response. Returns the number of entries dropped.
    async fn clear_cache(&self) -> RosterResult<usize>;

    /// Counts all stored users, bypassing the cache.
    async fn count_users(&self) -> RosterResult<u64>;
}
