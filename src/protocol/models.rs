//! Serializable response models.
//!
//! These are the boundary shapes the transport layer frames onto the wire.
//! They are derived views: never persisted, rebuilt per request.

use crate::catalog::Catalog;
use crate::policy::resolve::Entitlement;
use crate::store::Account;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display value for a license without an expiration date.
pub const NON_EXPIRING: &str = "non-expiring";

/// Render an expiration date for client display: `DD/MM/YYYY`, or
/// [`NON_EXPIRING`] when absent.
pub fn expiration_display(expires_on: Option<NaiveDate>) -> String {
    match expires_on {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => NON_EXPIRING.to_string(),
    }
}

/// One artifact in the discovery response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryEntry {
    /// On-disk file name, used for retrieval.
    pub file_name: String,

    /// Opaque change marker; clients compare it for equality only.
    pub version_marker: String,
}

/// Unauthenticated discovery response: canonical name to artifact details,
/// in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReply {
    /// Catalog entries keyed by canonical name.
    pub artifacts: BTreeMap<String, DiscoveryEntry>,
}

impl DiscoveryReply {
    /// Build the discovery response from a catalog snapshot.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            artifacts: catalog
                .iter()
                .map(|artifact| {
                    (
                        artifact.canonical_name.clone(),
                        DiscoveryEntry {
                            file_name: artifact.file_name.clone(),
                            version_marker: artifact.version_marker.clone(),
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Successful authentication response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthReply {
    /// Whether the account carries the administrative flag.
    pub is_admin: bool,

    /// `DD/MM/YYYY`, or `non-expiring`.
    pub expiration_display: String,

    /// Canonical names the account may currently access, in catalog order.
    pub allowed_canonical_names: Vec<String>,
}

impl AuthReply {
    /// Build the authentication response from a resolved entitlement.
    pub fn from_entitlement(entitlement: &Entitlement) -> Self {
        Self {
            is_admin: entitlement.is_admin,
            expiration_display: expiration_display(entitlement.expires_on),
            allowed_canonical_names: entitlement.allowed.clone(),
        }
    }
}

/// Per-account view for the administrative listing. Carries everything but
/// the credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Unique account key.
    pub username: String,

    /// Whether the license is currently active.
    pub is_active: bool,

    /// Whether the account carries the administrative flag.
    pub is_admin: bool,

    /// Expiration date; `None` means non-expiring.
    pub expires_on: Option<NaiveDate>,

    /// Raw permission specification as stored.
    pub allowed_apps: Option<String>,
}

impl AccountSummary {
    /// Build the summary view of an account.
    pub fn from_account(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            is_active: account.is_active,
            is_admin: account.is_admin,
            expires_on: account.expires_on,
            allowed_apps: account.allowed_apps.clone(),
        }
    }
}
