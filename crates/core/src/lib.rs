//! Shared types, error taxonomy, and configuration for the AdBridge backend.

pub mod config;
pub mod error;
pub mod types;

pub use error::{BridgeError, BridgeResult};
