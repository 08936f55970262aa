//! Unit tests for the account store.
