//! JSON-file-backed account store with atomic writes.
//!
//! The whole account table is one JSON document. Mutations rewrite it via
//! temp file + rename so a crash mid-write never leaves a torn document.

use crate::store::{Account, AccountStore};
use crate::GatewayError;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// File-backed store. The document is loaded once at open and written
/// through on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    accounts: RwLock<HashMap<String, Account>>,
}

impl FileStore {
    /// Open (or initialize) a store at an explicit path.
    ///
    /// Parent directories are created as needed. A missing file is an empty
    /// store; the file is first written on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GatewayError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| GatewayError::StoreIO(format!("Failed to create store dir: {}", e)))?;
        }

        let accounts = if path.exists() {
            let json = fs::read_to_string(&path)
                .map_err(|e| GatewayError::StoreIO(format!("Failed to read store: {}", e)))?;
            serde_json::from_str(&json)
                .map_err(|e| GatewayError::StoreIO(format!("Failed to parse store: {}", e)))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            accounts: RwLock::new(accounts),
        })
    }

    /// Open a store under `dirs::data_dir()/<namespace>/accounts.json`.
    pub fn at_default(namespace: &str) -> Result<Self, GatewayError> {
        let base_dir = dirs::data_dir()
            .ok_or_else(|| GatewayError::StoreIO("Could not find data directory".to_string()))?;
        Self::open(base_dir.join(namespace).join("accounts.json"))
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

    /// Persist the table atomically: temp file + rename.
    fn persist(&self, accounts: &HashMap<String, Account>) -> Result<(), GatewayError> {
        // BTreeMap view for a stable document layout.
        let ordered: BTreeMap<&String, &Account> = accounts.iter().collect();
        let json = serde_json::to_string_pretty(&ordered)
            .map_err(|e| GatewayError::StoreIO(format!("Failed to serialize store: {}", e)))?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json)
            .map_err(|e| GatewayError::StoreIO(format!("Failed to write temp file: {}", e)))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| GatewayError::StoreIO(format!("Failed to rename store file: {}", e)))?;

        Ok(())
    }
}

impl AccountStore for FileStore {
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
        self.persist(&accounts)
    }

    fn update_permissions(&self, username: &str, raw: &str) -> Result<(), GatewayError> {
        let mut accounts = self.write()?;
        if let Some(account) = accounts.get_mut(username) {
            account.allowed_apps = Some(raw.to_string());
            self.persist(&accounts)?;
        }
        Ok(())
    }

    fn update_password(&self, username: &str, password_hash: &str) -> Result<(), GatewayError> {
        let mut accounts = self.write()?;
        if let Some(account) = accounts.get_mut(username) {
            account.password_hash = password_hash.to_string();
            self.persist(&accounts)?;
        }
        Ok(())
    }

    fn delete(&self, username: &str) -> Result<(), GatewayError> {
        let mut accounts = self.write()?;
        if accounts.remove(username).is_none() {
            return Err(GatewayError::UnknownAccount);
        }
        self.persist(&accounts)
    }

    fn toggle_active(&self, username: &str) -> Result<bool, GatewayError> {
        let mut accounts = self.write()?;
        let new_state = {
            let account = accounts.get_mut(username).ok_or(GatewayError::UnknownAccount)?;
            account.is_active = !account.is_active;
            account.is_active
        };
        self.persist(&accounts)?;
        Ok(new_state)
    }

    fn list_all(&self) -> Result<Vec<Account>, GatewayError> {
        let mut accounts: Vec<Account> = self.read()?.values().cloned().collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::hash_password;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn account(username: &str) -> Account {
        Account {
            username: username.to_string(),
            password_hash: hash_password("pw"),
            is_active: true,
            is_admin: false,
            expires_on: NaiveDate::from_ymd_opt(2026, 3, 1),
            allowed_apps: Some("report_tool".to_string()),
        }
    }

    #[test]
    fn mutations_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.create(account("alice")).unwrap();
            store.update_permissions("alice", "*").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        let found = store.lookup("alice").unwrap().unwrap();
        assert_eq!(found.allowed_apps.as_deref(), Some("*"));
        assert_eq!(found.expires_on, NaiveDate::from_ymd_opt(2026, 3, 1));
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().join("fresh.json")).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_document_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");
        fs::write(&path, b"not json").unwrap();
        let result = FileStore::open(&path);
        assert!(matches!(result, Err(GatewayError::StoreIO(_))));
    }

    #[test]
    fn delete_rewrites_the_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");

        let store = FileStore::open(&path).unwrap();
        store.create(account("alice")).unwrap();
        store.create(account("bob")).unwrap();
        store.delete("alice").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert!(reopened.lookup("alice").unwrap().is_none());
        assert!(reopened.lookup("bob").unwrap().is_some());
    }

    #[test]
    fn toggle_persists_the_new_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");

        let store = FileStore::open(&path).unwrap();
        store.create(account("alice")).unwrap();
        assert!(!store.toggle_active("alice").unwrap());

        let reopened = FileStore::open(&path).unwrap();
        assert!(!reopened.lookup("alice").unwrap().unwrap().is_active);
    }

    #[test]
    fn no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");

        let store = FileStore::open(&path).unwrap();
        store.create(account("alice")).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
