//! Artifact retrieval boundary.
//!
//! Resolves a client-supplied file name to an on-disk artifact for the
//! transport layer to stream. The name must carry the executable suffix
//! and must be a bare file name: anything that looks like a path is
//! rejected before it ever reaches the filesystem.
//!
//! [`locate`] performs only that validation; [`locate_entitled`] also
//! requires the artifact to be covered by a resolved entitlement and is
//! the lookup the gateway itself uses.

use crate::catalog::{canonical_name, has_executable_suffix};
use crate::policy::resolve::Entitlement;
use crate::GatewayError;
use std::fs;
use std::path::{Path, PathBuf};

/// A validated artifact ready for streaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// The requested on-disk file name.
    pub file_name: String,

    /// Full path of the artifact inside the artifact directory.
    pub path: PathBuf,
}

impl Download {
    /// Open the artifact for reading. The transport layer owns the
    /// streaming and attachment framing.
    pub fn open(&self) -> std::io::Result<fs::File> {
        fs::File::open(&self.path)
    }
}

/// Whether a client-supplied name is a bare file name, free of path
/// components.
fn is_bare_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && !file_name.contains('/')
        && !file_name.contains('\\')
        && file_name != "."
        && file_name != ".."
}

/// Resolve a file name to an artifact on disk, without an entitlement
/// check.
///
/// # Errors
/// - `InvalidFileName` - the name lacks the executable suffix or contains
///   path components
/// - `ArtifactNotFound` - no regular file of that name exists in the
///   artifact directory
pub fn locate(artifact_dir: &Path, file_name: &str) -> Result<Download, GatewayError> {
    if !is_bare_file_name(file_name) || !has_executable_suffix(file_name) {
        return Err(GatewayError::InvalidFileName {
            file_name: file_name.to_string(),
        });
    }

    let path = artifact_dir.join(file_name);
    let is_file = fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(GatewayError::ArtifactNotFound {
            file_name: file_name.to_string(),
        });
    }

    Ok(Download {
        file_name: file_name.to_string(),
        path,
    })
}

/// Resolve a file name to an artifact the entitlement covers.
///
/// # Errors
/// `EntitlementMissing` when the name's canonical form is not in the
/// allow-list, plus everything [`locate`] reports.
pub fn locate_entitled(
    artifact_dir: &Path,
    file_name: &str,
    entitlement: &Entitlement,
) -> Result<Download, GatewayError> {
    let download = locate(artifact_dir, file_name)?;

    let canonical = canonical_name(file_name);
    if !entitlement.allowed.iter().any(|name| *name == canonical) {
        return Err(GatewayError::EntitlementMissing { name: canonical });
    }

    Ok(download)
}
