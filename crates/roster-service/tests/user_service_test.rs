//! Service tests against a migrated in-memory SQLite store.

use async_trait::async_trait;
use chrono::NaiveDate;
use roster_config::DatabaseConfig;
use roster_core::{NewUser, Page, PageRequest, RosterResult, SortOrder, User, UserQuery};
use roster_repository::{DatabasePool, DatabasePoolInterface, SqlUserRepository, UserRepository};
use roster_service::{InMemoryCache, UserService, UserServiceImpl, DEPARTMENTS, ROLES};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

async fn memory_pool() -> Arc<dyn DatabasePoolInterface> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..DatabaseConfig::default()
    };
    let pool = DatabasePool::connect(&config).await.expect("open database");
    pool.run_migrations().await.expect("migrate");
    Arc::new(pool)
}

async fn service() -> UserServiceImpl {
    let repository = Arc::new(SqlUserRepository::new(memory_pool().await));
    UserServiceImpl::new(repository, Arc::new(InMemoryCache::new()))
}

/// Repository that, once armed, holds the next page read after the store
/// has answered until the test releases it.
struct HeldReads {
    inner: SqlUserRepository,
    armed: AtomicBool,
    read_done: Notify,
    release: Notify,
}

impl HeldReads {
    fn new(inner: SqlUserRepository) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
            read_done: Notify::new(),
            release: Notify::new(),
        }
    }

    fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for HeldReads {
    async fn find_page(&self, query: &UserQuery) -> RosterResult<Page<User>> {
        let page = self.inner.find_page(query).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.read_done.notify_one();
            self.release.notified().await;
        }
        Ok(page)
    }

    async fn count(&self) -> RosterResult<u64> {
        self.inner.count().await
    }

    async fn distinct_departments(&self) -> RosterResult<Vec<String>> {
        self.inner.distinct_departments().await
    }

    async fn distinct_roles(&self) -> RosterResult<Vec<String>> {
        self.inner.distinct_roles().await
    }

    async fn replace_all(&self, users: &[NewUser]) -> RosterResult<u64> {
        self.inner.replace_all(users).await
    }

    async fn health_check(&self) -> RosterResult<()> {
        self.inner.health_check().await
    }
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let service = service().await;

    let response = service.list_users(UserQuery::default()).await.unwrap();

    assert!(response.users.is_empty());
    assert_eq!(response.total, 0);
    assert_eq!(response.page, 1);
    assert_eq!(response.total_pages, 0);
    assert_eq!(service.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_seed_then_first_page_sorted_by_name() {
    let service = service().await;
    assert_eq!(service.seed(5).await.unwrap(), 5);

    let query = UserQuery::new(PageRequest::new(0, 2)).with_sort_by("name", SortOrder::Asc);
    let response = service.list_users(query).await.unwrap();

    let all = service
        .list_users(UserQuery::new(PageRequest::new(0, 5)).with_sort_by("name", SortOrder::Asc))
        .await
        .unwrap();
    let mut names: Vec<String> = all.users.iter().map(|u| u.name.clone()).collect();
    names.sort();

    let returned: Vec<String> = response.users.iter().map(|u| u.name.clone()).collect();
    assert_eq!(returned, names[..2].to_vec());
    assert_eq!(response.total, 5);
    assert_eq!(response.total_pages, 3);
    assert_eq!(response.page, 1);
}

#[tokio::test]
async fn test_reseed_is_not_masked_by_cache() {
    let service = service().await;
    service.seed(20).await.unwrap();

    let query = UserQuery::new(PageRequest::new(0, 100));
    assert_eq!(service.list_users(query.clone()).await.unwrap().total, 20);

    service.seed(7).await.unwrap();
    assert_eq!(service.list_users(query).await.unwrap().total, 7);
}

#[tokio::test]
async fn test_seeded_values_come_from_fixed_sets() {
    let service = service().await;
    service.seed(200).await.unwrap();

    let departments = service.list_departments().await.unwrap();
    let roles = service.list_roles().await.unwrap();

    assert!(!departments.is_empty());
    assert!(departments.windows(2).all(|w| w[0] < w[1]));
    assert!(departments.iter().all(|d| DEPARTMENTS.contains(&d.as_str())));
    assert!(roles.iter().all(|r| ROLES.contains(&r.as_str())));
}

#[tokio::test]
async fn test_department_filter_is_exact() {
    let service = service().await;
    service.seed(100).await.unwrap();

    let query = UserQuery::new(PageRequest::new(0, 100)).with_department(Some("Engineering"));
    let response = service.list_users(query).await.unwrap();

    assert!(response.users.iter().all(|u| u.department == "Engineering"));
    assert_eq!(response.users.len() as u64, response.total);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let service = service().await;
    service.seed(50).await.unwrap();

    let lower = service
        .list_users(UserQuery::new(PageRequest::new(0, 100)).with_search(Some("example.org")))
        .await
        .unwrap();
    let upper = service
        .list_users(UserQuery::new(PageRequest::new(0, 100)).with_search(Some("EXAMPLE.ORG")))
        .await
        .unwrap();

    assert_eq!(lower.total, upper.total);
    assert!(lower.users.iter().all(|u| u.email.ends_with("@example.org")));
}

#[tokio::test]
async fn test_unknown_sort_never_errors() {
    let service = service().await;
    service.seed(10).await.unwrap();

    let query = UserQuery::new(PageRequest::new(0, 10)).with_sort_by("salary", SortOrder::Desc);
    let response = service.list_users(query).await.unwrap();

    assert_eq!(response.users.len(), 10);
}

#[tokio::test]
async fn test_health_and_clear_cache() {
    let service = service().await;
    assert!(service.health().await.is_healthy());

    service.list_roles().await.unwrap();
    assert_eq!(service.clear_cache().await.unwrap(), 1);
    assert_eq!(service.clear_cache().await.unwrap(), 0);
}

#[tokio::test]
async fn test_read_overlapping_reseed_is_not_cached() {
    let repository = Arc::new(HeldReads::new(SqlUserRepository::new(memory_pool().await)));
    let service = Arc::new(UserServiceImpl::new(
        repository.clone(),
        Arc::new(InMemoryCache::new()),
    ));
    service.seed(20).await.unwrap();

    let query = UserQuery::new(PageRequest::new(0, 100));
    repository.arm();
    let in_flight = tokio::spawn({
        let service = Arc::clone(&service);
        let query = query.clone();
        async move { service.list_users(query).await }
    });

    repository.read_done.notified().await;
    service.seed(7).await.unwrap();
    repository.release.notify_one();

    assert_eq!(in_flight.await.unwrap().unwrap().total, 20);
    assert_eq!(service.list_users(query).await.unwrap().total, 7);
}

#[tokio::test]
async fn test_huge_skip_returns_empty_page() {
    let service = service().await;
    service.seed(5).await.unwrap();

    let response = service
        .list_users(UserQuery::new(PageRequest::new(u64::MAX, 1)))
        .await
        .unwrap();

    assert!(response.users.is_empty());
    assert_eq!(response.total, 5);
    assert_eq!(response.page, u64::MAX);
    assert_eq!(response.total_pages, 5);
}

#[tokio::test]
async fn test_search_matches_non_ascii_name_as_stored() {
    let repository = Arc::new(SqlUserRepository::new(memory_pool().await));
    repository
        .replace_all(&[NewUser {
            name: "ÉLODIE Durand".to_string(),
            email: "elodie.durand@example.com".to_string(),
            role: "Senior".to_string(),
            department: "Sales".to_string(),
            date_joined: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
        }])
        .await
        .unwrap();
    let service = UserServiceImpl::new(repository, Arc::new(InMemoryCache::new()));

    let response = service
        .list_users(UserQuery::default().with_search(Some("ÉLODIE")))
        .await
        .unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.users[0].name, "ÉLODIE Durand");
}
