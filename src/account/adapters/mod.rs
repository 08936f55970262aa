//! Adapter implementations for account ports.

pub mod credentials;
pub mod memory;
pub mod postgres;
