//! Port contracts for the account store.
//!
//! Ports define infrastructure-agnostic interfaces used by account services.

pub mod credentials;
pub mod repository;

pub use credentials::{CredentialError, CredentialHasher};
pub use repository::{
    AccountRepository, AccountRepositoryError, AccountRepositoryResult, ConstraintViolation,
};
