//! Account and relationship store for Warbler.
//!
//! This module covers account signup with password hashing, password-based
//! authentication, authored messages, and the directional follow graph.
//! Writes are staged in an explicit unit of work and become durable only when
//! the session commits; uniqueness and reference rules are enforced by the
//! repository at commit time. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
