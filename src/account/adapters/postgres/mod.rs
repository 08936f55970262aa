//! `PostgreSQL` adapters for account persistence.

mod bootstrap;
mod models;
mod repository;
mod schema;

pub use bootstrap::{create_all, drop_all, reset_all};
pub use repository::{AccountPgPool, PostgresAccountRepository, build_pool};
