//! Platform adapters for the supported ad vendors, plus credential storage.
//!
//! Each adapter translates the uniform campaign-creation and
//! metrics-retrieval operations into one vendor's API shape. Vendor-level
//! failures never escape an adapter as panics; every failure surfaces as a
//! [`adbridge_core::BridgeError`] value the orchestrator can fold into a
//! per-platform result.

pub mod adapter;
pub mod credentials;
pub mod google;
pub mod linkedin;
pub mod meta;

pub use adapter::{create_adapter, PlatformAdapter};
pub use credentials::{CredentialProvider, CredentialUpdate, InMemoryCredentialStore};
