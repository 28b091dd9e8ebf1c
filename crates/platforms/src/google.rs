//! Google Ads API adapter.
//!
//! Campaign creation follows the vendor's two-step flow: a campaign budget
//! resource first, then a Search campaign referencing it. Costs are carried
//! in micros; conversion back to major units happens in the aggregator, not
//! here.

use adbridge_core::config::GoogleAdsConfig;
use adbridge_core::types::{
    AdPlatform, CampaignSpec, DatePreset, MetricRecord, PlatformCredential, SpendAmount,
};
use adbridge_core::{BridgeError, BridgeResult};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::adapter::PlatformAdapter;

pub struct GoogleAdsAdapter {
    config: GoogleAdsConfig,
}

impl GoogleAdsAdapter {
    pub fn new(config: GoogleAdsConfig) -> Self {
        Self { config }
    }

    /// Convert a budget in major currency units to micros.
    pub fn budget_to_micros(budget: f64) -> u64 {
        (budget * 1_000_000.0).round() as u64
    }

    /// Build the GAQL metrics query for the given date keyword and optional
    /// campaign-id filter.
    pub fn build_metrics_query(campaign_ids: &[String], date_preset: DatePreset) -> String {
        let mut query = format!(
            "SELECT campaign.id, campaign.name, metrics.impressions, metrics.clicks, \
             metrics.cost_micros FROM campaign WHERE segments.date DURING {}",
            date_preset.google_keyword()
        );
        if !campaign_ids.is_empty() {
            query.push_str(&format!(" AND campaign.id IN ({})", campaign_ids.join(", ")));
        }
        query
    }

    /// The adapter cannot construct an API client without a developer token.
    fn require_developer_token(&self) -> BridgeResult<&str> {
        self.config
            .developer_token
            .as_deref()
            .ok_or_else(|| {
                BridgeError::AdapterInit("Google Ads developer token not configured".to_string())
            })
    }
}

fn google_credential(credential: &PlatformCredential) -> BridgeResult<(&str, &str)> {
    match credential {
        PlatformCredential::Google {
            refresh_token,
            customer_id,
            ..
        } => Ok((refresh_token, customer_id)),
        other => Err(BridgeError::AdapterInit(format!(
            "expected Google Ads credentials, got {}",
            other.platform()
        ))),
    }
}

impl PlatformAdapter for GoogleAdsAdapter {
    fn platform(&self) -> AdPlatform {
        AdPlatform::Google
    }

    fn create_campaign(
        &self,
        credential: &PlatformCredential,
        spec: &CampaignSpec,
    ) -> BridgeResult<String> {
        self.require_developer_token()?;
        let (_refresh_token, customer_id) = google_credential(credential)?;

        let mut rng = rand::thread_rng();
        let budget_micros = Self::budget_to_micros(spec.budget);

        // Step 1: budget resource (stub — in production,
        // CampaignBudgetService.MutateCampaignBudgets).
        let _budget_payload = serde_json::json!({
            "name": format!("Budget for {} #{:08x}", spec.name, rng.gen::<u32>()),
            "delivery_method": "STANDARD",
            "amount_micros": budget_micros,
        });
        let budget_resource = format!(
            "customers/{customer_id}/campaignBudgets/{}",
            rng.gen_range(1_000_000_000u64..10_000_000_000u64)
        );
        debug!(
            budget = %budget_resource,
            amount_micros = budget_micros,
            "Created Google Ads campaign budget"
        );

        // Step 2: the Search campaign referencing the budget (stub —
        // CampaignService.MutateCampaigns).
        let _campaign_payload = serde_json::json!({
            "name": spec.name,
            "advertising_channel_type": "SEARCH",
            "status": "PAUSED",
            "manual_cpc": { "enhanced_cpc_enabled": true },
            "campaign_budget": budget_resource,
            "network_settings": {
                "target_google_search": true,
                "target_search_network": true,
                "target_content_network": false,
                "target_partner_search_network": false,
            },
        });
        let campaign_id = rng.gen_range(1_000_000_000u64..10_000_000_000u64);
        let resource_name = format!("customers/{customer_id}/campaigns/{campaign_id}");

        info!(campaign = %resource_name, "Created Google Ads campaign");
        metrics::counter!("adapter.campaigns_created", "platform" => "google").increment(1);

        Ok(campaign_id.to_string())
    }

    fn fetch_metrics(
        &self,
        credential: &PlatformCredential,
        campaign_ids: &[String],
        date_preset: DatePreset,
    ) -> BridgeResult<Vec<MetricRecord>> {
        self.require_developer_token()?;
        let (_refresh_token, customer_id) = google_credential(credential)?;

        let query = Self::build_metrics_query(campaign_ids, date_preset);
        debug!(customer_id = %customer_id, query = %query, "Running Google Ads search stream");

        // Stub search stream: without explicit campaign ids there is no
        // campaign inventory to report rows for.
        let mut rng = rand::thread_rng();
        let mut records = Vec::with_capacity(campaign_ids.len());
        for campaign_id in campaign_ids {
            let impressions: u64 = rng.gen_range(1_000..50_000);
            let clicks = impressions / rng.gen_range(20..60);
            let cost_micros = clicks * rng.gen_range(100_000..900_000);
            let campaign_name = format!("Campaign {campaign_id}");

            records.push(MetricRecord {
                platform: AdPlatform::Google,
                campaign_id: campaign_id.clone(),
                campaign_name: campaign_name.clone(),
                impressions,
                clicks,
                spend: SpendAmount::Micros(cost_micros),
                raw: serde_json::json!({
                    "query": query,
                    "campaign_id": campaign_id,
                    "campaign_name": campaign_name,
                    "impressions": impressions,
                    "clicks": clicks,
                    "cost_micros": cost_micros,
                }),
                fetched_at: Utc::now(),
            });
        }

        Ok(records)
    }
}
