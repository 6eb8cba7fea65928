//! Entitlement resolution.
//!
//! Composes account-status gating with the catalog intersection. Gating
//! preconditions run in a fixed order and short-circuit, so an inactive or
//! expired account never reaches permission computation. Resolution is
//! read-only: it never writes to the account store or the filesystem.

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::crypto::digest::verify_password;
use crate::policy::intent::{normalize, PermissionIntent};
use crate::store::Account;
use crate::GatewayError;
use chrono::NaiveDate;
use tracing::debug;

/// What an authenticated, active, non-expired account may currently access.
///
/// Recomputed per request and never persisted: revoking a permission or
/// deleting an artifact takes effect on the very next resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    /// Whether the account carries the administrative flag.
    pub is_admin: bool,

    /// Expiration date of the license, if any. `None` never expires.
    pub expires_on: Option<NaiveDate>,

    /// Canonical names the account may access, in catalog (lexicographic)
    /// order.
    pub allowed: Vec<String>,
}

/// Run the account-status preconditions, in order, short-circuiting on the
/// first failure.
///
/// 1. The account must exist.
/// 2. The credential must verify against the stored hash.
/// 3. The active flag must be set.
/// 4. A non-null expiration date must be on or after today. Expiration is
///    inclusive of the current date.
///
/// # Errors
/// `UnknownAccount`, `InvalidCredential`, `LicenseInactive`,
/// `LicenseExpired`, respectively.
pub fn gate<'a>(
    account: Option<&'a Account>,
    credential: &str,
    clock: &dyn Clock,
) -> Result<&'a Account, GatewayError> {
    let account = account.ok_or(GatewayError::UnknownAccount)?;

    if !verify_password(credential, &account.password_hash) {
        return Err(GatewayError::InvalidCredential);
    }

    if !account.is_active {
        return Err(GatewayError::LicenseInactive);
    }

    if let Some(expires_on) = account.expires_on {
        if expires_on < clock.today_utc() {
            return Err(GatewayError::LicenseExpired);
        }
    }

    Ok(account)
}

/// Resolve the entitlement for an account against a catalog snapshot.
///
/// Preconditions from [`gate`] run first. Once they pass, the account's raw
/// permission string is normalized and intersected with the catalog:
/// a universal intent yields every canonical name currently in the catalog,
/// so the grant auto-extends to artifacts added later; an explicit intent
/// yields the intersection, with names that no longer correspond to any
/// catalog entry silently dropped. Ordering follows the catalog, not the
/// raw string.
pub fn resolve(
    account: Option<&Account>,
    credential: &str,
    catalog: &Catalog,
    clock: &dyn Clock,
) -> Result<Entitlement, GatewayError> {
    let account = gate(account, credential, clock)?;

    let intent = normalize(account.allowed_apps.as_deref());
    let allowed: Vec<String> = match &intent {
        PermissionIntent::Universal => catalog.names().cloned().collect(),
        PermissionIntent::Explicit(names) => catalog
            .names()
            .filter(|name| names.contains(name.as_str()))
            .cloned()
            .collect(),
    };

    debug!(
        username = %account.username,
        granted = allowed.len(),
        catalog = catalog.len(),
        "entitlement resolved"
    );

    Ok(Entitlement {
        is_admin: account.is_admin,
        expires_on: account.expires_on,
        allowed,
    })
}
