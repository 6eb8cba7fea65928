//! End-to-end gateway flow over a real directory and a file-backed store.

use distgate::{
    FileStore, Gateway, GatewayConfig, GatewayError, MemoryStore, NewAccount,
};
use std::fs;
use std::io::Read;
use std::sync::Arc;
use tempfile::TempDir;

fn gateway_with_artifacts() -> (TempDir, Gateway) {
    let artifacts = TempDir::new().unwrap();
    fs::write(artifacts.path().join("REPORT_TOOL.exe"), b"report bytes").unwrap();
    fs::write(artifacts.path().join("INVOICE_GEN.exe"), b"invoice bytes").unwrap();
    fs::write(artifacts.path().join("changelog.md"), b"not an artifact").unwrap();

    let gateway = Gateway::new(
        GatewayConfig::new(artifacts.path()),
        Arc::new(MemoryStore::new()),
    )
    .unwrap();
    (artifacts, gateway)
}

#[test]
fn discovery_and_resolution_agree_on_canonical_names() {
    let (_artifacts, gateway) = gateway_with_artifacts();

    let discovery = gateway.discovery_reply().unwrap();
    let discovered: Vec<_> = discovery.artifacts.keys().cloned().collect();
    assert_eq!(discovered, vec!["INVOICE GEN", "REPORT TOOL"]);

    gateway
        .create_account(NewAccount {
            allowed_apps: Some("report_tool,unknown_app".to_string()),
            ..NewAccount::new("alice", "pw")
        })
        .unwrap();

    let reply = gateway.authenticate("alice", "pw").unwrap();
    assert_eq!(reply.allowed_canonical_names, vec!["REPORT TOOL"]);
    assert_eq!(reply.expiration_display, "non-expiring");
}

#[test]
fn gating_failures_are_distinguished() {
    let (_artifacts, gateway) = gateway_with_artifacts();
    gateway
        .create_account(NewAccount::new("alice", "pw"))
        .unwrap();

    assert!(matches!(
        gateway.authenticate("nobody", "pw"),
        Err(GatewayError::UnknownAccount)
    ));
    assert!(matches!(
        gateway.authenticate("alice", "wrong"),
        Err(GatewayError::InvalidCredential)
    ));

    gateway.toggle_active("alice").unwrap();
    assert!(matches!(
        gateway.authenticate("alice", "pw"),
        Err(GatewayError::LicenseInactive)
    ));
}

#[test]
fn artifact_deletion_revokes_on_the_next_request() {
    let (artifacts, gateway) = gateway_with_artifacts();
    gateway
        .create_account(NewAccount::new("admin", "pw"))
        .unwrap();

    let before = gateway.authenticate("admin", "pw").unwrap();
    assert_eq!(
        before.allowed_canonical_names,
        vec!["INVOICE GEN", "REPORT TOOL"]
    );

    fs::remove_file(artifacts.path().join("INVOICE_GEN.exe")).unwrap();

    let after = gateway.authenticate("admin", "pw").unwrap();
    assert_eq!(after.allowed_canonical_names, vec!["REPORT TOOL"]);
}

#[test]
fn universal_grant_extends_to_new_artifacts() {
    let (artifacts, gateway) = gateway_with_artifacts();
    gateway
        .create_account(NewAccount::new("admin", "pw"))
        .unwrap();

    fs::write(artifacts.path().join("NEW_APP.exe"), b"fresh").unwrap();

    let reply = gateway.authenticate("admin", "pw").unwrap();
    assert_eq!(
        reply.allowed_canonical_names,
        vec!["INVOICE GEN", "NEW APP", "REPORT TOOL"]
    );
}

#[test]
fn fetch_streams_only_entitled_artifacts() {
    let (_artifacts, gateway) = gateway_with_artifacts();
    gateway
        .create_account(NewAccount {
            allowed_apps: Some("invoice_gen".to_string()),
            ..NewAccount::new("alice", "pw")
        })
        .unwrap();

    let download = gateway.fetch("alice", "pw", "INVOICE_GEN.exe").unwrap();
    let mut bytes = Vec::new();
    download.open().unwrap().read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, b"invoice bytes");

    assert!(matches!(
        gateway.fetch("alice", "pw", "REPORT_TOOL.exe"),
        Err(GatewayError::EntitlementMissing { .. })
    ));
    assert!(matches!(
        gateway.fetch("alice", "pw", "changelog.md"),
        Err(GatewayError::InvalidFileName { .. })
    ));
    assert!(matches!(
        gateway.fetch("alice", "pw", "GHOST.exe"),
        Err(GatewayError::ArtifactNotFound { .. })
    ));
}

#[test]
fn file_store_backs_the_gateway_across_restarts() {
    let artifacts = TempDir::new().unwrap();
    fs::write(artifacts.path().join("TOOL.exe"), b"tool").unwrap();
    let state = TempDir::new().unwrap();
    let store_path = state.path().join("accounts.json");

    {
        let gateway = Gateway::new(
            GatewayConfig::new(artifacts.path()),
            Arc::new(FileStore::open(&store_path).unwrap()),
        )
        .unwrap();
        gateway
            .create_account(NewAccount {
                is_admin: true,
                ..NewAccount::new("root", "pw")
            })
            .unwrap();
    }

    // A fresh gateway over the same document sees the account.
    let gateway = Gateway::new(
        GatewayConfig::new(artifacts.path()),
        Arc::new(FileStore::open(&store_path).unwrap()),
    )
    .unwrap();
    let reply = gateway.authenticate("root", "pw").unwrap();
    assert!(reply.is_admin);
    assert_eq!(reply.allowed_canonical_names, vec!["TOOL"]);
}

#[test]
fn deleted_account_is_unknown_on_the_next_request() {
    let (_artifacts, gateway) = gateway_with_artifacts();
    gateway
        .create_account(NewAccount::new("alice", "pw"))
        .unwrap();
    assert!(gateway.authenticate("alice", "pw").is_ok());

    gateway.delete_account("alice").unwrap();
    assert!(matches!(
        gateway.authenticate("alice", "pw"),
        Err(GatewayError::UnknownAccount)
    ));
}
