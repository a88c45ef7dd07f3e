//! Synthetic data population.

mod generator;
mod seeder;

pub use generator::{RecordGenerator, DEPARTMENTS, ROLES};
pub use seeder::{DataSeeder, MAX_SEED_COUNT};
