//! # Roster Repository
//!
//! Data access for the user directory:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>        (domain interface)
//! SqlUserRepository                   (filters, sort, pagination, bulk replace)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! DatabasePool ── DbPool::Postgres | DbPool::Sqlite
//! ```
//!
//! The backend is picked from the database URL at startup. SQL is rendered
//! once per request through `sqlx::QueryBuilder` and executed on whichever
//! pool is active.

pub mod pool;
pub mod sql;
pub mod traits;

pub use pool::*;
pub use sql::SqlUserRepository;
pub use traits::*;
