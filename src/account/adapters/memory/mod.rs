//! In-memory adapters for account tests.

mod repository;

pub use repository::InMemoryAccountRepository;
