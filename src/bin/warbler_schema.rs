//! Creates, drops, or resets the Warbler account schema.
//!
//! Usage:
//!
//! ```text
//! warbler-schema <operation>
//! ```
//!
//! The `operation` must be `create`, `drop`, or `reset`. The target database
//! is read from `DATABASE_URL`. Set `RUST_LOG` to adjust log verbosity.

use diesel::Connection;
use diesel::pg::PgConnection;
use std::env;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warbler::account::adapters::postgres::{create_all, drop_all, reset_all};
use warbler::config::{ConfigError, DatabaseTarget, StoreConfig};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during schema operations.
#[derive(Debug, Error)]
enum SchemaError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to connect: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("schema operation failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Create,
    Drop,
    Reset,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, SchemaError> {
        match arg {
            "create" => Ok(Self::Create),
            "drop" => Ok(Self::Drop),
            "reset" => Ok(Self::Reset),
            other => Err(SchemaError::InvalidArgs(format!(
                "unknown operation '{other}'; expected create, drop, or reset"
            ))),
        }
    }
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(env::args().skip(1)).map_err(Into::into)
}

fn run(mut args: impl Iterator<Item = String>) -> Result<(), SchemaError> {
    let operation = match (args.next(), args.next()) {
        (Some(op), None) => Operation::parse(&op)?,
        _ => {
            return Err(SchemaError::InvalidArgs(
                "usage: warbler-schema <create|drop|reset>".into(),
            ));
        }
    };

    let config = StoreConfig::from_env(DatabaseTarget::Application)?;
    let mut connection = PgConnection::establish(config.database_url())?;

    match operation {
        Operation::Create => create_all(&mut connection)?,
        Operation::Drop => drop_all(&mut connection)?,
        Operation::Reset => reset_all(&mut connection)?,
    }
    info!(?operation, "schema operation complete");
    Ok(())
}
