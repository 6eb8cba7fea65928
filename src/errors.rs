//! Distgate error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during catalog discovery, entitlement resolution,
/// or account administration.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The artifact directory does not exist or is not a directory.
    #[error("Artifact directory unavailable: {}", .path.display())]
    DirectoryUnavailable {
        /// The configured artifact directory.
        path: PathBuf,
    },

    /// The host disallowed enumerating the artifact directory.
    #[error("Artifact directory not readable: {}", .path.display())]
    PermissionDenied {
        /// The configured artifact directory.
        path: PathBuf,
    },

    /// Listing the artifact directory failed for another reason.
    #[error("Artifact directory enumeration failed: {0}")]
    EnumerationError(String),

    /// No account exists for the supplied username.
    #[error("Unknown account")]
    UnknownAccount,

    /// The supplied credential does not verify against the stored hash.
    #[error("Invalid credential")]
    InvalidCredential,

    /// The account's license has been deactivated.
    #[error("License inactive")]
    LicenseInactive,

    /// The account's license expired before today.
    #[error("License expired")]
    LicenseExpired,

    /// An account with this username already exists.
    #[error("Account already exists: {username}")]
    DuplicateAccount {
        /// The username that was already taken.
        username: String,
    },

    /// Account store I/O error.
    #[error("Account store I/O error: {0}")]
    StoreIO(String),

    /// The requested file name is not a distributable artifact name.
    #[error("Not a distributable file name: {file_name}")]
    InvalidFileName {
        /// The rejected file name.
        file_name: String,
    },

    /// No artifact with the requested file name exists on disk.
    #[error("Artifact not found: {file_name}")]
    ArtifactNotFound {
        /// The requested file name.
        file_name: String,
    },

    /// The resolved entitlement does not cover the requested artifact.
    #[error("Entitlement missing for artifact: {name}")]
    EntitlementMissing {
        /// Canonical name of the artifact that was denied.
        name: String,
    },
}
