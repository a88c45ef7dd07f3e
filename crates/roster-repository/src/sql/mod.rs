//! SQL store adapter shared by the PostgreSQL and SQLite backends.

pub mod query_builder;
mod user_repository;

pub use user_repository::SqlUserRepository;
