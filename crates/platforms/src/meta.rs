//! Meta (Graph API) Marketing adapter.
//!
//! Campaigns are created `PAUSED` with an empty special-ad-category list, and
//! the objective passes through as the uppercased normalized name — there is
//! deliberately no per-vendor objective mapping table. Insights requests use
//! a fixed field list and the vendor's date-preset strings.

use adbridge_core::config::MetaConfig;
use adbridge_core::types::{
    AdPlatform, CampaignSpec, DatePreset, MetricRecord, PlatformCredential, SpendAmount,
};
use adbridge_core::{BridgeError, BridgeResult};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::adapter::PlatformAdapter;

/// Fixed field list requested from the insights endpoint.
const INSIGHTS_FIELDS: [&str; 5] = ["campaign_name", "impressions", "clicks", "spend", "ctr"];

pub struct MetaAdapter {
    config: MetaConfig,
}

impl MetaAdapter {
    pub fn new(config: MetaConfig) -> Self {
        Self { config }
    }

    /// Normalize an ad-account id to the `act_`-prefixed form the Graph API
    /// expects, whether or not the stored value already carries the prefix.
    pub fn normalize_account_id(raw: &str) -> String {
        format!("act_{}", raw.trim_start_matches("act_"))
    }
}

fn meta_credential(credential: &PlatformCredential) -> BridgeResult<(&str, &str)> {
    match credential {
        PlatformCredential::Meta {
            access_token,
            ad_account_id,
        } => Ok((access_token, ad_account_id)),
        other => Err(BridgeError::AdapterInit(format!(
            "expected Meta credentials, got {}",
            other.platform()
        ))),
    }
}

impl PlatformAdapter for MetaAdapter {
    fn platform(&self) -> AdPlatform {
        AdPlatform::Meta
    }

    fn create_campaign(
        &self,
        credential: &PlatformCredential,
        spec: &CampaignSpec,
    ) -> BridgeResult<String> {
        let (_access_token, ad_account_id) = meta_credential(credential)?;
        let account = Self::normalize_account_id(ad_account_id);

        // Campaign create payload (stub — in production, HTTP POST to the
        // Graph API campaigns edge).
        let _payload = serde_json::json!({
            "name": spec.name,
            "objective": spec.objective.meta_objective(),
            "status": "PAUSED",
            "special_ad_categories": [],
        });
        let endpoint = format!(
            "https://graph.facebook.com/{}/{}/campaigns",
            self.config.api_version, account
        );

        let campaign_id = rand::thread_rng()
            .gen_range(10_000_000_000_000_000u64..100_000_000_000_000_000u64)
            .to_string();

        info!(
            endpoint = %endpoint,
            campaign_id = %campaign_id,
            objective = %spec.objective.meta_objective(),
            "Created Meta campaign"
        );
        metrics::counter!("adapter.campaigns_created", "platform" => "meta").increment(1);

        Ok(campaign_id)
    }

    fn fetch_metrics(
        &self,
        credential: &PlatformCredential,
        campaign_ids: &[String],
        date_preset: DatePreset,
    ) -> BridgeResult<Vec<MetricRecord>> {
        let (_access_token, _ad_account_id) = meta_credential(credential)?;

        let mut rng = rand::thread_rng();
        let mut records = Vec::with_capacity(campaign_ids.len());
        for campaign_id in campaign_ids {
            // Insights request params (stub — in production, HTTP GET on the
            // campaign's insights edge).
            let request = serde_json::json!({
                "date_preset": date_preset.meta_preset(),
                "fields": INSIGHTS_FIELDS,
            });

            let impressions: u64 = rng.gen_range(1_000..50_000);
            let clicks = impressions / rng.gen_range(20..60);
            // Meta reports spend in major units, already rounded to cents.
            let spend = (clicks as f64 * rng.gen_range(0.10..0.90) * 100.0).round() / 100.0;
            let ctr = if impressions > 0 {
                clicks as f64 / impressions as f64 * 100.0
            } else {
                0.0
            };
            let campaign_name = format!("Campaign {campaign_id}");

            records.push(MetricRecord {
                platform: AdPlatform::Meta,
                campaign_id: campaign_id.clone(),
                campaign_name: campaign_name.clone(),
                impressions,
                clicks,
                spend: SpendAmount::Major(spend),
                raw: serde_json::json!({
                    "request": request,
                    "campaign_name": campaign_name,
                    "impressions": impressions.to_string(),
                    "clicks": clicks.to_string(),
                    "spend": format!("{spend:.2}"),
                    "ctr": format!("{ctr:.6}"),
                }),
                fetched_at: Utc::now(),
            });
        }

        debug!(
            count = records.len(),
            date_preset = date_preset.meta_preset(),
            "Fetched Meta campaign insights"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbridge_core::types::CampaignObjective;

    fn meta_cred() -> PlatformCredential {
        PlatformCredential::Meta {
            access_token: "token-1".to_string(),
            ad_account_id: "act_123".to_string(),
        }
    }

    #[test]
    fn test_account_id_normalization() {
        assert_eq!(MetaAdapter::normalize_account_id("123"), "act_123");
        assert_eq!(MetaAdapter::normalize_account_id("act_123"), "act_123");
    }

    #[test]
    fn test_create_campaign_returns_id() {
        let adapter = MetaAdapter::new(MetaConfig::default());
        let spec = CampaignSpec {
            name: "Spring Sale (Meta)".to_string(),
            objective: CampaignObjective::LinkClicks,
            budget: 10.0,
        };
        let id = adapter.create_campaign(&meta_cred(), &spec).unwrap();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_create_campaign_rejects_wrong_credential() {
        let adapter = MetaAdapter::new(MetaConfig::default());
        let spec = CampaignSpec {
            name: "x".to_string(),
            objective: CampaignObjective::Traffic,
            budget: 1.0,
        };
        let wrong = PlatformCredential::Linkedin {
            access_token: "t".to_string(),
            organization_urn: "urn:li:organization:1".to_string(),
        };
        let err = adapter.create_campaign(&wrong, &spec).unwrap_err();
        assert!(matches!(err, BridgeError::AdapterInit(_)));
    }

    #[test]
    fn test_fetch_metrics_one_record_per_campaign() {
        let adapter = MetaAdapter::new(MetaConfig::default());
        let ids = vec!["111".to_string(), "222".to_string()];
        let records = adapter
            .fetch_metrics(&meta_cred(), &ids, DatePreset::Last7d)
            .unwrap();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.platform, AdPlatform::Meta);
            assert!(matches!(record.spend, SpendAmount::Major(_)));
            assert_eq!(record.raw["request"]["date_preset"], "last_7d");
        }
    }

    #[test]
    fn test_fetch_metrics_empty_ids() {
        let adapter = MetaAdapter::new(MetaConfig::default());
        let records = adapter
            .fetch_metrics(&meta_cred(), &[], DatePreset::Last7d)
            .unwrap();
        assert!(records.is_empty());
    }
}
