use thiserror::Error;

use crate::types::AdPlatform;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("missing credentials for {0}")]
    MissingCredentials(AdPlatform),

    #[error("Adapter initialization failed: {0}")]
    AdapterInit(String),

    #[error("Adapter call failed: {0}")]
    AdapterCall(String),

    #[error("Content generation failed: {0}")]
    ContentGeneration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
