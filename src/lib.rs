//! Warbler: account and relationship store for a small social network.
//!
//! This crate provides the user data model behind the Warbler web
//! application: account signup with hashed credentials, password-based
//! authentication, authored messages, and a directional follow graph backed
//! by `PostgreSQL`.
//!
//! # Architecture
//!
//! Warbler follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, hashing)
//!
//! # Modules
//!
//! - [`account`]: Accounts, messages, follow edges, and the session unit of work
//! - [`config`]: Database selection from the environment

pub mod account;
pub mod config;
