//! Administrative account mutations.
//!
//! Thin operations over the store boundary, exposed to the transport
//! layer. None of them touch the resolver: their effect is observed the
//! next time resolution runs.

use crate::clock::Clock;
use crate::crypto::digest::hash_password;
use crate::store::{Account, AccountStore};
use crate::GatewayError;
use chrono::Days;
use tracing::info;

/// Parameters for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Unique account key.
    pub username: String,

    /// Plaintext password; hashed before it reaches the store.
    pub password: String,

    /// Whether the account carries the administrative flag.
    pub is_admin: bool,

    /// Raw permission specification. `None` defaults to the universal
    /// grant `*`.
    pub allowed_apps: Option<String>,

    /// Validity window in days from today. `None` or `0` means
    /// non-expiring.
    pub valid_for_days: Option<u32>,
}

impl NewAccount {
    /// A non-admin, non-expiring account with the universal grant.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            is_admin: false,
            allowed_apps: None,
            valid_for_days: None,
        }
    }
}

/// Create an account. Active by default.
///
/// # Errors
/// `DuplicateAccount` if the username is taken.
pub fn create_account(
    store: &dyn AccountStore,
    clock: &dyn Clock,
    spec: NewAccount,
) -> Result<(), GatewayError> {
    let expires_on = spec
        .valid_for_days
        .filter(|days| *days > 0)
        .and_then(|days| clock.today_utc().checked_add_days(Days::new(days as u64)));

    let username = spec.username.clone();
    store.create(Account {
        username: spec.username,
        password_hash: hash_password(&spec.password),
        is_active: true,
        is_admin: spec.is_admin,
        expires_on,
        allowed_apps: Some(spec.allowed_apps.unwrap_or_else(|| "*".to_string())),
    })?;

    info!(username = %username, "account created");
    Ok(())
}

/// Overwrite an account's raw permission string verbatim.
///
/// Deliberately not validated against the catalog: the catalog is dynamic,
/// and the string is interpreted on the next resolution.
pub fn set_permissions(
    store: &dyn AccountStore,
    username: &str,
    raw: &str,
) -> Result<(), GatewayError> {
    store.update_permissions(username, raw)?;
    info!(username = %username, "permissions updated");
    Ok(())
}

/// Rehash and overwrite an account's password.
pub fn set_password(
    store: &dyn AccountStore,
    username: &str,
    new_password: &str,
) -> Result<(), GatewayError> {
    store.update_password(username, &hash_password(new_password))?;
    info!(username = %username, "password changed");
    Ok(())
}

/// Delete an account.
///
/// # Errors
/// `UnknownAccount` if absent.
pub fn delete_account(store: &dyn AccountStore, username: &str) -> Result<(), GatewayError> {
    store.delete(username)?;
    info!(username = %username, "account deleted");
    Ok(())
}

/// Flip an account's active flag and return the new state.
///
/// # Errors
/// `UnknownAccount` if absent.
pub fn toggle_active(store: &dyn AccountStore, username: &str) -> Result<bool, GatewayError> {
    let active = store.toggle_active(username)?;
    info!(username = %username, active, "account status toggled");
    Ok(active)
}

/// List all accounts, ordered by username.
pub fn list_accounts(store: &dyn AccountStore) -> Result<Vec<Account>, GatewayError> {
    store.list_all()
}
