//! In-memory account store.
//!
//! Thread-safe HashMap-backed storage for tests and embedding applications
//! that manage persistence themselves.

use crate::store::{Account, AccountStore};
use crate::GatewayError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// HashMap-backed store. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Account>>, GatewayError> {
        self.accounts
            .read()
            .map_err(|_| GatewayError::StoreIO("account store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Account>>, GatewayError> {
        self.accounts
            .write()
            .map_err(|_| GatewayError::StoreIO("account store lock poisoned".to_string()))
    }
}

impl AccountStore for MemoryStore {
    fn lookup(&self, username: &str) -> Result<Option<Account>, GatewayError> {
        Ok(self.read()?.get(username).cloned())
    }

    fn create(&self, account: Account) -> Result<(), GatewayError> {
        let mut accounts = self.write()?;
        if accounts.contains_key(&account.username) {
            return Err(GatewayError::DuplicateAccount {
                username: account.username,
            });
        }
        accounts.insert(account.username.clone(), account);
        Ok(())
    }

    fn update_permissions(&self, username: &str, raw: &str) -> Result<(), GatewayError> {
        if let Some(account) = self.write()?.get_mut(username) {
            account.allowed_apps = Some(raw.to_string());
        }
        Ok(())
    }

    fn update_password(&self, username: &str, password_hash: &str) -> Result<(), GatewayError> {
        if let Some(account) = self.write()?.get_mut(username) {
            account.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    fn delete(&self, username: &str) -> Result<(), GatewayError> {
        self.write()?
            .remove(username)
            .map(|_| ())
            .ok_or(GatewayError::UnknownAccount)
    }

    fn toggle_active(&self, username: &str) -> Result<bool, GatewayError> {
        let mut accounts = self.write()?;
        let account = accounts.get_mut(username).ok_or(GatewayError::UnknownAccount)?;
        account.is_active = !account.is_active;
        Ok(account.is_active)
    }

    fn list_all(&self) -> Result<Vec<Account>, GatewayError> {
        let mut accounts: Vec<Account> = self.read()?.values().cloned().collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(accounts)
    }
}
