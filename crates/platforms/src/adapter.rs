//! Platform adapter trait and factory.

use adbridge_core::config::AppConfig;
use adbridge_core::types::{AdPlatform, CampaignSpec, DatePreset, MetricRecord, PlatformCredential};
use adbridge_core::BridgeResult;

use crate::google::GoogleAdsAdapter;
use crate::linkedin::LinkedinAdapter;
use crate::meta::MetaAdapter;

/// Trait implemented once per vendor, translating the uniform campaign
/// operations into that vendor's API calls.
pub trait PlatformAdapter: Send + Sync {
    /// The platform this adapter handles.
    fn platform(&self) -> AdPlatform;

    /// Create a campaign and return the vendor-assigned campaign id.
    fn create_campaign(
        &self,
        credential: &PlatformCredential,
        spec: &CampaignSpec,
    ) -> BridgeResult<String>;

    /// Fetch metric records for the given campaign ids and date range.
    ///
    /// An empty `campaign_ids` slice means "all campaigns" where the vendor
    /// supports it; vendors that do not simply return no rows.
    fn fetch_metrics(
        &self,
        credential: &PlatformCredential,
        campaign_ids: &[String],
        date_preset: DatePreset,
    ) -> BridgeResult<Vec<MetricRecord>>;
}

/// Create the adapter for the given platform.
pub fn create_adapter(platform: AdPlatform, config: &AppConfig) -> Box<dyn PlatformAdapter> {
    match platform {
        AdPlatform::Meta => Box::new(MetaAdapter::new(config.meta.clone())),
        AdPlatform::Google => Box::new(GoogleAdsAdapter::new(config.google.clone())),
        AdPlatform::Linkedin => Box::new(LinkedinAdapter::new(config.linkedin.clone())),
    }
}
