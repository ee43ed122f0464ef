//! Session guard and the credential store it is derived from.

pub mod guard;
pub mod store;

pub use guard::{AccessDecision, Session, SessionGuard};
pub use store::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, SETTINGS_KEY, TOKEN_KEY,
    USER_KEY,
};
