//! Shared test helpers for `PostgreSQL` integration tests.
//!
//! Tests run against the database named by `TEST_DATABASE_URL`. They are
//! ignored by default; run them with `cargo test --test postgres -- --ignored`.
//! A run without the variable fails rather than passing vacuously. Every test
//! resets the schema, so tests hold a process-wide lock for their whole
//! duration.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use diesel::Connection;
use diesel::pg::PgConnection;
use mockable::DefaultClock;
use tokio::runtime::Runtime;
use warbler::account::{
    adapters::{
        credentials::Argon2CredentialHasher,
        postgres::{PostgresAccountRepository, build_pool, reset_all},
    },
    services::{AccountSession, SignupRequest},
};
use warbler::config::{DatabaseTarget, StoreConfig};

/// Boxed error type for fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Session type used by `PostgreSQL` integration tests.
pub type PgSession =
    AccountSession<PostgresAccountRepository, Argon2CredentialHasher, DefaultClock>;

static DATABASE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Exclusive access to a freshly reset test database.
pub struct TestDatabase {
    /// Runtime driving the session's async calls.
    pub runtime: Runtime,
    /// Session bound to the test database.
    pub session: PgSession,
    _lock: MutexGuard<'static, ()>,
}

/// Builds the test store configuration through `lookup`.
///
/// # Errors
///
/// Returns an error naming `TEST_DATABASE_URL` when it is unset or blank.
pub fn test_config(lookup: impl Fn(&str) -> Option<String>) -> Result<StoreConfig, BoxError> {
    StoreConfig::from_lookup(DatabaseTarget::Test, lookup).map_err(|err| {
        format!("PostgreSQL tests need a disposable database: {err}").into()
    })
}

/// Resets the test database and opens a session on it.
///
/// # Errors
///
/// Returns an error when `TEST_DATABASE_URL` is not set, or when the database
/// cannot be reached or reset.
pub fn test_database() -> Result<TestDatabase, BoxError> {
    let config = test_config(|key| std::env::var(key).ok())?;

    let lock = DATABASE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let mut connection = PgConnection::establish(config.database_url())?;
    reset_all(&mut connection)?;

    let pool = build_pool(&config)?;
    let session = AccountSession::new(
        Arc::new(PostgresAccountRepository::new(pool)),
        Arc::new(Argon2CredentialHasher::new()),
        Arc::new(DefaultClock),
    );
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    Ok(TestDatabase {
        runtime,
        session,
        _lock: lock,
    })
}

/// Builds a signup request for `testuser{n}` with password `password`.
pub fn signup_request(n: u32) -> SignupRequest {
    SignupRequest::new(
        format!("testuser{n}"),
        format!("test{n}@test.com"),
        "password",
    )
}
