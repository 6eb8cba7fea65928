//! Credential store boundary.
//!
//! The store maps usernames to license accounts. Resolution only ever reads
//! it; all mutation goes through the administrative operations. Consistency
//! under concurrent edits is the store implementation's own concern.

pub mod file;
pub mod memory;

use crate::GatewayError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use file::FileStore;
pub use memory::MemoryStore;

/// A persisted license account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account key.
    pub username: String,

    /// Stored credential hash (see [`crate::crypto::digest`]).
    pub password_hash: String,

    /// Whether the license is currently active.
    pub is_active: bool,

    /// Whether the account carries the administrative flag.
    pub is_admin: bool,

    /// Expiration date. `None` means non-expiring.
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,

    /// Raw permission specification: `*`, a comma-separated allow-list, or
    /// absent. Stored verbatim; interpreted only at resolution time.
    #[serde(default)]
    pub allowed_apps: Option<String>,
}

/// Store collaborator interface consumed by the gateway.
///
/// `update_permissions` and `update_password` on an unknown username are
/// accepted no-ops; `delete` and `toggle_active` report `UnknownAccount`.
pub trait AccountStore: Send + Sync {
    /// Look up an account by username.
    fn lookup(&self, username: &str) -> Result<Option<Account>, GatewayError>;

    /// Insert a new account.
    ///
    /// # Errors
    /// `DuplicateAccount` if the username is already taken.
    fn create(&self, account: Account) -> Result<(), GatewayError>;

    /// Overwrite the raw permission string verbatim.
    ///
    /// No validation against the catalog happens at write time; the catalog
    /// is dynamic and the string is interpreted on the next resolution.
    fn update_permissions(&self, username: &str, raw: &str) -> Result<(), GatewayError>;

    /// Overwrite the stored credential hash.
    fn update_password(&self, username: &str, password_hash: &str) -> Result<(), GatewayError>;

    /// Remove an account.
    ///
    /// # Errors
    /// `UnknownAccount` if absent.
    fn delete(&self, username: &str) -> Result<(), GatewayError>;

    /// Flip the active flag and return the new state.
    ///
    /// # Errors
    /// `UnknownAccount` if absent.
    fn toggle_active(&self, username: &str) -> Result<bool, GatewayError>;

    /// All accounts, ordered by username.
    fn list_all(&self) -> Result<Vec<Account>, GatewayError>;
}
