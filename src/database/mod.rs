//! Database
//!
//! PostgreSQL pool and migrations.

pub mod connection;

pub use connection::{create_pool, run_migrations};
