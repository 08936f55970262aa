//! Shared world state for account following BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use warbler::account::{
    adapters::{credentials::Argon2CredentialHasher, memory::InMemoryAccountRepository},
    domain::{Account, AccountId},
    services::{AccountSession, AccountSessionError, SignupRequest},
};

/// Session type used by the BDD world.
pub type TestSession =
    AccountSession<InMemoryAccountRepository, Argon2CredentialHasher, DefaultClock>;

/// Scenario world for account following behaviour tests.
pub struct AccountWorld {
    /// The session under test.
    pub session: TestSession,
    /// Identifiers of committed accounts keyed by username.
    pub accounts: HashMap<String, AccountId>,
    /// Error returned by the last failed commit.
    pub last_commit_error: Option<AccountSessionError>,
}

impl AccountWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let session = AccountSession::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(Argon2CredentialHasher::new()),
            Arc::new(DefaultClock),
        );
        Self {
            session,
            accounts: HashMap::new(),
            last_commit_error: None,
        }
    }

    /// Returns the identifier of a committed account.
    pub fn id_of(&self, name: &str) -> Result<AccountId, eyre::Report> {
        self.accounts
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no account named '{name}' in scenario world"))
    }

    /// Loads a fresh snapshot of a committed account.
    pub fn load(&self, name: &str) -> Result<Account, eyre::Report> {
        let id = self.id_of(name)?;
        run_async(self.session.find_by_id(id))?
            .ok_or_else(|| eyre::eyre!("account '{name}' is not persisted"))
    }
}

impl Default for AccountWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AccountWorld {
    AccountWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a signup request for `name` with password `password`.
pub fn signup_request(name: &str, email: &str) -> SignupRequest {
    SignupRequest::new(name, email, "password")
}
