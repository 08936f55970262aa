//! Application services for the account store.

mod session;

pub use session::{AccountSession, AccountSessionError, AccountSessionResult, SignupRequest};
