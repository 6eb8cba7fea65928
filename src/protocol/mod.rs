//! Response shapes handed to the transport layer.

pub mod models;
