//! Common test infrastructure for store integration tests.

use chrono::NaiveDate;
use roster_config::DatabaseConfig;
use roster_core::NewUser;
use roster_repository::{DatabasePool, DatabasePoolInterface};
use std::sync::Arc;

/// Test database wrapper.
///
/// Opens a private in-memory SQLite database and runs the migrations.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh, migrated database.
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };

        let pool = DatabasePool::connect(&config)
            .await
            .expect("Failed to open in-memory database");
        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self {
            pool: Arc::new(pool),
        }
    }

    /// Returns a handle to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }
}

pub fn new_user(name: &str, email: &str, role: &str, department: &str, date: (i32, u32, u32)) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        department: department.to_string(),
        date_joined: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
    }
}

/// Nine users covering every department/role filter and the LIKE
/// metacharacters.
pub fn sample_users() -> Vec<NewUser> {
    vec![
        new_user("Alice Johnson", "alice.johnson@example.com", "Senior", "Engineering", (2021, 3, 1)),
        new_user("Bob Smith", "bob.smith@example.org", "Junior", "Marketing", (2022, 6, 15)),
        new_user("Carol White", "carol.white@example.net", "Lead", "Engineering", (2020, 1, 10)),
        new_user("Dan Brown", "dan.brown@example.com", "Manager", "Sales", (2023, 9, 30)),
        new_user("Eve Black", "eve.black@example.com", "Intern", "Engineering", (2024, 2, 20)),
        new_user("100% Legit", "legit@example.com", "Mid-level", "Finance", (2019, 5, 5)),
        new_user("100 Legit", "legit2@example.com", "Mid-level", "Finance", (2019, 5, 6)),
        new_user("snake_case", "snake@example.com", "Director", "IT", (2020, 7, 7)),
        new_user("snakeXcase", "snakex@example.com", "Director", "IT", (2020, 8, 8)),
    ]
}
