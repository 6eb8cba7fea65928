//! # Distgate
//!
//! **License-gated software distribution gateway core.**
//!
//! Distgate decides, per request, which distributable artifacts an account
//! may download right now. A directory of executables is the catalog; each
//! account carries a compact permission specification (`*` or a
//! comma-separated allow-list); the entitlement resolver reconciles the
//! two after gating on account status.
//!
//! ## Features
//!
//! - **Live catalog** — the artifact directory is re-scanned on every
//!   request; adding or deleting a file is visible on the next call
//! - **Canonical naming** — artifacts and permission tokens meet in one
//!   normalized namespace (suffix stripped, underscores to spaces,
//!   uppercased)
//! - **Status gating** — unknown account, bad credential, inactive
//!   license, and expired license short-circuit in that order before any
//!   permission is computed
//! - **Total permission parsing** — a malformed stored permission string
//!   degrades to the empty grant; it never crashes the resolution path
//! - **Entitlement-gated retrieval** — artifact lookup checks the resolved
//!   allow-list before handing a file to the transport
//!
//! ## Quickstart
//!
//! ```no_run
//! use distgate::{Gateway, GatewayConfig, MemoryStore, NewAccount};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), distgate::GatewayError> {
//!     let config = GatewayConfig::new("/srv/artifacts");
//!     let gateway = Gateway::new(config, Arc::new(MemoryStore::new()))?;
//!
//!     gateway.create_account(NewAccount {
//!         allowed_apps: Some("report_tool".to_string()),
//!         ..NewAccount::new("alice", "s3cret")
//!     })?;
//!
//!     let reply = gateway.authenticate("alice", "s3cret")?;
//!     for name in &reply.allowed_canonical_names {
//!         println!("may download: {}", name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Design Notes
//!
//! Resolution is read-only and recomputed from scratch per request, so
//! revoking a permission or retiring an artifact takes effect on the very
//! next authentication with zero propagation delay. Nothing is cached and
//! there is no session state; the embedding transport re-authenticates
//! every request.
//!
//! The library installs no `tracing` subscriber and holds no process-wide
//! state; the artifact directory and the account store are explicit values
//! handed to [`Gateway`] at construction.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Crypto layer
pub mod crypto;

// Catalog layer
pub mod catalog;

// Policy layer
pub mod policy;

// Store layer
pub mod store;

// Protocol layer
pub mod protocol;

// Retrieval layer
pub mod retrieve;

// Administration
pub mod admin;

// Manager (main public API)
pub mod manager;

// Re-exports for public API
pub use admin::NewAccount;
pub use catalog::{Artifact, Catalog};
pub use clock::{Clock, SystemClock};
pub use config::GatewayConfig;
pub use errors::GatewayError;
pub use manager::Gateway;
pub use policy::intent::PermissionIntent;
pub use policy::resolve::Entitlement;
pub use protocol::models::{AccountSummary, AuthReply, DiscoveryReply};
pub use retrieve::Download;
pub use store::{Account, AccountStore, FileStore, MemoryStore};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;
