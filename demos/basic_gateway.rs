//! Basic gateway walkthrough.
//!
//! Stands up a gateway over an artifact directory, creates an account, and
//! resolves its entitlement.
//!
//! # Running
//!
//! ```bash
//! export ARTIFACT_DIR="/path/to/your/executables"
//! cargo run --example basic_gateway
//! ```

use distgate::{Gateway, GatewayConfig, GatewayError, MemoryStore, NewAccount};
use std::sync::Arc;

fn main() {
    // Artifact directory from the environment; in a deployment this comes
    // from the service configuration.
    let artifact_dir =
        std::env::var("ARTIFACT_DIR").expect("Set ARTIFACT_DIR environment variable");

    let gateway = match Gateway::new(
        GatewayConfig::new(artifact_dir),
        Arc::new(MemoryStore::new()),
    ) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Unauthenticated discovery.
    match gateway.discover() {
        Ok(catalog) => {
            println!("Catalog ({} artifacts):", catalog.len());
            for artifact in catalog.iter() {
                println!(
                    "  {:<30} {} (v{})",
                    artifact.canonical_name, artifact.file_name, artifact.version_marker
                );
            }
        }
        Err(e) => {
            eprintln!("Catalog scan failed: {}", e);
            std::process::exit(1);
        }
    }

    // Create a demo account limited to one program, then authenticate.
    gateway
        .create_account(NewAccount {
            allowed_apps: Some("report_tool".to_string()),
            ..NewAccount::new("alice", "s3cret")
        })
        .expect("create demo account");

    match gateway.authenticate("alice", "s3cret") {
        Ok(reply) => {
            println!("alice (expires {}):", reply.expiration_display);
            for name in &reply.allowed_canonical_names {
                println!("  may download {}", name);
            }
        }
        Err(GatewayError::LicenseExpired) => eprintln!("License expired"),
        Err(e) => eprintln!("Authentication failed: {}", e),
    }
}
