//! Directory scanner producing a catalog snapshot.
//!
//! A pure read of directory metadata: no caching, no retries. Every call
//! pays the full listing cost so the snapshot always reflects the
//! filesystem as it is right now.

use crate::catalog::{canonical_name, has_executable_suffix, Artifact, Catalog};
use crate::GatewayError;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Scan a directory for distributable artifacts.
///
/// Every regular file whose name ends (case-insensitively) in the
/// executable suffix becomes one catalog entry. Directories and other file
/// types are silently skipped.
///
/// When two file names normalize to the same canonical name, the
/// lexicographically-first file name wins, so the outcome does not depend
/// on directory iteration order.
///
/// # Errors
/// - `DirectoryUnavailable` - the path does not exist or is not a directory
/// - `PermissionDenied` - the host disallowed enumeration
/// - `EnumerationError` - any other listing failure, surfaced as-is
pub fn scan(dir: &Path) -> Result<Catalog, GatewayError> {
    if !dir.is_dir() {
        return Err(GatewayError::DirectoryUnavailable {
            path: dir.to_path_buf(),
        });
    }

    let read_dir = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GatewayError::DirectoryUnavailable {
            path: dir.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => GatewayError::PermissionDenied {
            path: dir.to_path_buf(),
        },
        _ => GatewayError::EnumerationError(e.to_string()),
    })?;

    let mut files: Vec<(String, String)> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| GatewayError::EnumerationError(e.to_string()))?;

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !has_executable_suffix(&file_name) {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|e| GatewayError::EnumerationError(e.to_string()))?;
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .map_err(|e| GatewayError::EnumerationError(e.to_string()))?;
        files.push((file_name, version_marker(modified)));
    }

    // Deterministic collision tie-break: first file name in lexicographic
    // order claims the canonical name.
    files.sort();

    let mut entries = BTreeMap::new();
    for (file_name, version_marker) in files {
        let canonical = canonical_name(&file_name);
        match entries.entry(canonical.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Artifact {
                    canonical_name: canonical,
                    file_name,
                    version_marker,
                });
            }
            Entry::Occupied(existing) => {
                warn!(
                    canonical = %canonical,
                    kept = %existing.get().file_name,
                    skipped = %file_name,
                    "artifact name collision"
                );
            }
        }
    }

    Ok(Catalog::from_entries(entries))
}

/// Serialize a modification time as an opaque change marker.
///
/// The exact format is not a compatibility contract; only that the marker
/// changes whenever the file does.
fn version_marker(modified: SystemTime) -> String {
    match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => format!("{}.{:09}", d.as_secs(), d.subsec_nanos()),
        Err(_) => "0".to_string(),
    }
}
