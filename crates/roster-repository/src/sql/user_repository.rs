//! SQL user repository implementation.

use super::query_builder::{push_filters, push_order, push_user_values, push_window, USER_COLUMNS};
use crate::{traits::UserRepository, with_pool, DatabasePoolInterface};
use roster_core::{NewUser, Page, RosterResult, User, UserQuery};
use async_trait::async_trait;
use shaku::Component;
use sqlx::QueryBuilder;
use std::sync::Arc;
use tracing::{debug, info};

/// Rows per `INSERT` statement. Keeps the bind count under SQLite's limit.
const INSERT_BATCH_SIZE: usize = 100;

/// SQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct SqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqlUserRepository {
    /// Creates a new SQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn distinct(&self, column: &'static str) -> RosterResult<Vec<String>> {
        debug!("Listing distinct values of {}", column);

        let sql = format!("SELECT DISTINCT {column} FROM users ORDER BY {column}");
        let values: Vec<String> = with_pool!(self.pool.pool(), |p, DB| {
            sqlx::query_scalar(&sql).fetch_all(p).await?
        });

        Ok(values)
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_page(&self, query: &UserQuery) -> RosterResult<Page<User>> {
        debug!(
            skip = query.page.skip,
            limit = query.page.limit,
            search = ?query.search,
            department = ?query.department,
            role = ?query.role,
            sort = ?query.sort,
            "Finding users page"
        );

        let (users, total) = with_pool!(self.pool.pool(), |p, DB| {
            let mut count_qb = QueryBuilder::<DB>::new("SELECT COUNT(*) FROM users");
            push_filters(&mut count_qb, query);
            let total: i64 = count_qb.build_query_scalar().fetch_one(p).await?;

            let mut page_qb = QueryBuilder::<DB>::new(format!("SELECT {USER_COLUMNS} FROM users"));
            push_filters(&mut page_qb, query);
            push_order(&mut page_qb, query.sort);
            push_window(&mut page_qb, query.page);
            let users: Vec<User> = page_qb.build_query_as().fetch_all(p).await?;

            (users, total)
        });

        Ok(Page::new(users, query.page, u64::try_from(total).unwrap_or(0)))
    }

    async fn count(&self) -> RosterResult<u64> {
        let count: i64 = with_pool!(self.pool.pool(), |p, DB| {
            sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(p).await?
        });

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn distinct_departments(&self) -> RosterResult<Vec<String>> {
        self.distinct("department").await
    }

    async fn distinct_roles(&self) -> RosterResult<Vec<String>> {
        self.distinct("role").await
    }

    async fn replace_all(&self, users: &[NewUser]) -> RosterResult<u64> {
        info!(count = users.len(), "Replacing all users");

        let inserted = with_pool!(self.pool.pool(), |p, DB| {
            let mut tx = p.begin().await?;
            let deleted = sqlx::query("DELETE FROM users").execute(&mut *tx).await?.rows_affected();
            debug!(deleted, "Cleared users table");

            let mut inserted = 0u64;
            for chunk in users.chunks(INSERT_BATCH_SIZE) {
                let mut qb = QueryBuilder::<DB>::new(
                    "INSERT INTO users (name, email, role, department, date_joined) ",
                );
                push_user_values(&mut qb, chunk);
                inserted += qb.build().execute(&mut *tx).await?.rows_affected();
            }

            tx.commit().await?;
            inserted
        });

        info!(inserted, "Users replaced");
        Ok(inserted)
    }

    async fn health_check(&self) -> RosterResult<()> {
        self.pool.health_check().await
    }
}

impl std::fmt::Debug for SqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlUserRepository")
            .field("backend", &self.pool.pool().backend())
            .finish_non_exhaustive()
    }
}
