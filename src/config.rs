//! Database selection for the account store.
//!
//! The application and its tests read different environment variables so a
//! test run can never reach the application database by accident. The
//! resulting [`StoreConfig`] is an ordinary value handed to the pool builder.

use std::env;
use thiserror::Error;

/// Environment variable naming the application database.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable naming the database used by tests.
pub const TEST_DATABASE_URL_ENV: &str = "TEST_DATABASE_URL";

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_POOL_SIZE: u32 = 4;

/// Which database a configuration points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// The application database.
    Application,
    /// The disposable test database.
    Test,
}

impl DatabaseTarget {
    /// Returns the environment variable holding this target's URL.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Application => DATABASE_URL_ENV,
            Self::Test => TEST_DATABASE_URL_ENV,
        }
    }
}

/// Errors returned while building a store configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The environment variable is not set.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    /// The database URL is empty after trimming.
    #[error("database URL for {0:?} must not be empty")]
    EmptyUrl(DatabaseTarget),

    /// The pool size is zero.
    #[error("connection pool size must be at least 1")]
    ZeroPoolSize,
}

/// Connection settings for the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    target: DatabaseTarget,
    database_url: String,
    max_pool_size: u32,
}

impl StoreConfig {
    /// Creates a configuration from an explicit URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUrl`] when the URL is blank.
    pub fn new(target: DatabaseTarget, database_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = database_url.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyUrl(target));
        }
        Ok(Self {
            target,
            database_url: trimmed.to_owned(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
        })
    }

    /// Reads the URL for `target` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the variable is unset or not
    /// valid Unicode, or [`ConfigError::EmptyUrl`] when it is blank.
    pub fn from_env(target: DatabaseTarget) -> Result<Self, ConfigError> {
        Self::from_lookup(target, |key| env::var(key).ok())
    }

    /// Reads the URL for `target` through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup(
        target: DatabaseTarget,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let key = target.env_var();
        let url = lookup(key).ok_or(ConfigError::Missing(key))?;
        Self::new(target, url)
    }

    /// Sets the maximum number of pooled connections.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroPoolSize`] when `size` is zero.
    pub fn with_max_pool_size(mut self, size: u32) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        self.max_pool_size = size;
        Ok(self)
    }

    /// Returns the selected target.
    #[must_use]
    pub const fn target(&self) -> DatabaseTarget {
        self.target
    }

    /// Returns the database URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn max_pool_size(&self) -> u32 {
        self.max_pool_size
    }
}
