//! Entitlement policy: permission normalization and resolution.

pub mod intent;
pub mod resolve;

pub use intent::{normalize, PermissionIntent};
pub use resolve::{gate, resolve, Entitlement};
