//! Repository trait definitions.

use roster_core::{Interface, NewUser, Page, RosterResult, User, UserQuery};
use async_trait::async_trait;

/// User repository trait.
///
/// Reads are filtered, sorted and paginated in the store. The only write is
/// a whole-table replacement used by the seeder.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Returns one page of users matching `query`, with the pre-pagination
    /// match count.
    async fn find_page(&self, query: &UserQuery) -> RosterResult<Page<User>>;

    /// Counts all users.
    async fn count(&self) -> RosterResult<u64>;

    /// Returns the distinct departments, sorted.
    async fn distinct_departments(&self) -> RosterResult<Vec<String>>;

    /// Returns the distinct roles, sorted.
    async fn distinct_roles(&self) -> RosterResult<Vec<String>>;

    /// Atomically replaces every stored user with `users`.
    ///
    /// Either all rows are swapped or, on failure, the previous contents are
    /// left untouched. Returns the number of rows inserted.
    async fn replace_all(&self, users: &[NewUser]) -> RosterResult<u64>;

    /// Checks that the store answers.
    async fn health_check(&self) -> RosterResult<()>;
}
