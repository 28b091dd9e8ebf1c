//! Template-based ad-copy generation.

pub mod generator;

pub use generator::{CopyGenerator, PromptFacets, MAX_VARIATIONS};
