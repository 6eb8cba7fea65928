//! Distribution gateway - the main public API for Distgate.
//!
//! The `Gateway` composes the catalog scanner, the permission normalizer,
//! and the entitlement resolver over a credential store:
//! - Unauthenticated catalog discovery
//! - Per-request authentication and entitlement resolution
//! - Entitlement-gated artifact retrieval
//! - Administrative account mutations

use crate::admin::{self, NewAccount};
use crate::catalog::{scan, Catalog};
use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::policy::resolve::{resolve, Entitlement};
use crate::protocol::models::{AccountSummary, AuthReply, DiscoveryReply};
use crate::retrieve::{locate_entitled, Download};
use crate::store::AccountStore;
use crate::GatewayError;
use std::sync::Arc;

/// Main distribution gateway.
///
/// Create one instance per artifact directory and share it across request
/// handlers; every operation is a pure function of the current filesystem
/// and store state, so no external locking is needed.
pub struct Gateway {
    config: GatewayConfig,
    clock: Arc<dyn Clock>,
    store: Arc<dyn AccountStore>,
}

impl Gateway {
    /// Create a gateway over the given store.
    ///
    /// Uses the system clock for expiration checks.
    ///
    /// # Errors
    /// Returns an error if configuration validation fails.
    pub fn new(config: GatewayConfig, store: Arc<dyn AccountStore>) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self {
            config,
            clock: Arc::new(SystemClock),
            store,
        })
    }

    /// Create a gateway with a custom clock (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn with_clock(
        config: GatewayConfig,
        store: Arc<dyn AccountStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            store,
        })
    }

    /// Scan the artifact directory for the current catalog snapshot.
    ///
    /// Unauthenticated discovery: no account context, no filtering. Every
    /// call re-lists the directory; nothing is cached.
    ///
    /// # Errors
    /// `DirectoryUnavailable`, `PermissionDenied`, `EnumerationError`.
    pub fn discover(&self) -> Result<Catalog, GatewayError> {
        scan(&self.config.artifact_dir)
    }

    /// Discovery response shape for the transport layer.
    pub fn discovery_reply(&self) -> Result<DiscoveryReply, GatewayError> {
        Ok(DiscoveryReply::from_catalog(&self.discover()?))
    }

    /// Authenticate an account and resolve its entitlement against a fresh
    /// catalog snapshot.
    ///
    /// # Errors
    /// - `UnknownAccount` - no such username
    /// - `InvalidCredential` - password does not verify
    /// - `LicenseInactive` - account deactivated
    /// - `LicenseExpired` - expiration date has passed
    /// - catalog scan errors, which make entitlement undecidable
    pub fn authorize(&self, username: &str, password: &str) -> Result<Entitlement, GatewayError> {
        let account = self.store.lookup(username)?;
        let catalog = scan(&self.config.artifact_dir)?;
        resolve(account.as_ref(), password, &catalog, self.clock.as_ref())
    }

    /// Authentication response shape for the transport layer.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AuthReply, GatewayError> {
        Ok(AuthReply::from_entitlement(&self.authorize(username, password)?))
    }

    /// Authenticate and resolve a file name to an artifact the account is
    /// entitled to download.
    ///
    /// # Errors
    /// Everything [`Gateway::authorize`] reports, plus `InvalidFileName`,
    /// `ArtifactNotFound`, and `EntitlementMissing` from the lookup.
    pub fn fetch(
        &self,
        username: &str,
        password: &str,
        file_name: &str,
    ) -> Result<Download, GatewayError> {
        let entitlement = self.authorize(username, password)?;
        locate_entitled(&self.config.artifact_dir, file_name, &entitlement)
    }

    /// Create an account. See [`admin::create_account`].
    pub fn create_account(&self, spec: NewAccount) -> Result<(), GatewayError> {
        admin::create_account(self.store.as_ref(), self.clock.as_ref(), spec)
    }

    /// Overwrite an account's raw permission string.
    pub fn set_permissions(&self, username: &str, raw: &str) -> Result<(), GatewayError> {
        admin::set_permissions(self.store.as_ref(), username, raw)
    }

    /// Rehash and overwrite an account's password.
    pub fn set_password(&self, username: &str, new_password: &str) -> Result<(), GatewayError> {
        admin::set_password(self.store.as_ref(), username, new_password)
    }

    /// Delete an account.
    pub fn delete_account(&self, username: &str) -> Result<(), GatewayError> {
        admin::delete_account(self.store.as_ref(), username)
    }

    /// Flip an account's active flag and return the new state.
    pub fn toggle_active(&self, username: &str) -> Result<bool, GatewayError> {
        admin::toggle_active(self.store.as_ref(), username)
    }

    /// Administrative account listing, without credential hashes.
    pub fn list_accounts(&self) -> Result<Vec<AccountSummary>, GatewayError> {
        Ok(admin::list_accounts(self.store.as_ref())?
            .iter()
            .map(AccountSummary::from_account)
            .collect())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
