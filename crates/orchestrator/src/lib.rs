//! Multi-platform campaign fan-out and performance aggregation.

pub mod aggregator;
pub mod fanout;

pub use aggregator::summarize;
pub use fanout::CampaignOrchestrator;
