//! Campaign fan-out across platforms.
//!
//! One logical request becomes N independent per-platform attempts. A
//! platform failing never rolls back or blocks the others; the caller gets
//! every outcome keyed by platform.

use std::collections::HashMap;
use std::sync::Arc;

use adbridge_copygen::CopyGenerator;
use adbridge_core::config::AppConfig;
use adbridge_core::types::{
    AdPlatform, CampaignFanout, CampaignOutcome, CampaignRequest, CampaignSpec, PerformanceQuery,
    PerformanceReport, PlatformFetch,
};
use adbridge_core::{BridgeError, BridgeResult};
use adbridge_platforms::{create_adapter, CredentialProvider};
use tracing::{error, info, warn};

use crate::aggregator::summarize;

pub struct CampaignOrchestrator {
    credentials: Arc<dyn CredentialProvider>,
    generator: CopyGenerator,
    config: AppConfig,
}

impl CampaignOrchestrator {
    pub fn new(credentials: Arc<dyn CredentialProvider>, config: AppConfig) -> Self {
        Self {
            credentials,
            generator: CopyGenerator::new(),
            config,
        }
    }

    /// Create a campaign on every requested platform.
    ///
    /// Ad copy is generated once and shared across platforms; a generation
    /// failure aborts the whole request before any platform is touched.
    /// Platform attempts then run concurrently and independently, so the
    /// returned fan-out always carries one outcome per requested platform.
    pub async fn create_campaigns(
        &self,
        request: &CampaignRequest,
    ) -> BridgeResult<CampaignFanout> {
        let ad_copy = self
            .generator
            .generate(&request.ad_prompt, 1)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                BridgeError::ContentGeneration("generator produced no variations".to_string())
            })?;

        let platforms = dedup_platforms(&request.platforms);
        let mut handles = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let credentials = Arc::clone(&self.credentials);
            let config = self.config.clone();
            let spec = CampaignSpec {
                name: format!("{} ({})", request.campaign_name, platform.display_name()),
                objective: request.objective,
                budget: request.budget,
            };

            handles.push(tokio::spawn(async move {
                let outcome = match credentials.credential(platform) {
                    Some(credential) => {
                        let adapter = create_adapter(platform, &config);
                        match adapter.create_campaign(&credential, &spec) {
                            Ok(campaign_id) => CampaignOutcome::Created { campaign_id },
                            Err(e) => {
                                error!(platform = %platform, error = %e, "Campaign creation failed");
                                CampaignOutcome::Failed {
                                    reason: e.to_string(),
                                }
                            }
                        }
                    }
                    None => {
                        warn!(platform = %platform, "No usable credentials for campaign creation");
                        CampaignOutcome::Failed {
                            reason: BridgeError::MissingCredentials(platform).to_string(),
                        }
                    }
                };
                (platform, outcome)
            }));
        }

        let mut results = HashMap::new();
        for handle in handles {
            let (platform, outcome) = handle
                .await
                .map_err(|e| BridgeError::Internal(e.into()))?;
            let status = if outcome.is_created() { "created" } else { "failed" };
            metrics::counter!(
                "orchestrator.campaign_outcomes",
                "platform" => platform.wire_name(),
                "status" => status
            )
            .increment(1);
            results.insert(platform, outcome);
        }

        let fanout = CampaignFanout { ad_copy, results };
        info!(
            created = fanout.results.values().filter(|o| o.is_created()).count(),
            failed = fanout.results.values().filter(|o| !o.is_created()).count(),
            "Campaign fan-out complete"
        );
        Ok(fanout)
    }

    /// Fetch and aggregate performance metrics across platforms.
    ///
    /// Platforms whose precondition is not met (no credentials, or a vendor
    /// that needs explicit campaign ids given none) are reported as skipped;
    /// adapter errors are reported as failed. Only fetched rows feed the
    /// summary.
    pub async fn get_performance(
        &self,
        query: &PerformanceQuery,
    ) -> BridgeResult<PerformanceReport> {
        let platforms = dedup_platforms(&query.platforms);
        let mut handles = Vec::with_capacity(platforms.len());
        for platform in platforms {
            let credentials = Arc::clone(&self.credentials);
            let config = self.config.clone();
            let campaign_ids = query
                .campaign_ids
                .get(&platform)
                .cloned()
                .unwrap_or_default();
            let date_preset = query.date_preset;

            handles.push(tokio::spawn(async move {
                let fetch = match credentials.credential(platform) {
                    None => PlatformFetch::Skipped {
                        reason: BridgeError::MissingCredentials(platform).to_string(),
                    },
                    // Meta insights are queried per campaign; without ids
                    // there is nothing to ask for.
                    Some(_) if platform == AdPlatform::Meta && campaign_ids.is_empty() => {
                        PlatformFetch::Skipped {
                            reason: "campaign ids required for Meta insights".to_string(),
                        }
                    }
                    Some(credential) => {
                        let adapter = create_adapter(platform, &config);
                        match adapter.fetch_metrics(&credential, &campaign_ids, date_preset) {
                            Ok(records) => PlatformFetch::Fetched { records },
                            Err(e) => {
                                error!(platform = %platform, error = %e, "Metrics fetch failed");
                                PlatformFetch::Failed {
                                    reason: e.to_string(),
                                }
                            }
                        }
                    }
                };
                (platform, fetch)
            }));
        }

        let mut report = HashMap::new();
        for handle in handles {
            let (platform, fetch) = handle
                .await
                .map_err(|e| BridgeError::Internal(e.into()))?;
            report.insert(platform, fetch);
        }

        let summary = summarize(report.values().flat_map(|fetch| match fetch {
            PlatformFetch::Fetched { records } => records.as_slice(),
            _ => &[],
        }));

        Ok(PerformanceReport {
            platforms: report,
            summary,
        })
    }
}

/// Drop duplicate platforms while preserving first-seen order.
fn dedup_platforms(platforms: &[AdPlatform]) -> Vec<AdPlatform> {
    let mut seen = Vec::with_capacity(platforms.len());
    for &platform in platforms {
        if !seen.contains(&platform) {
            seen.push(platform);
        }
    }
    seen
}
