//! End-to-end orchestration tests against the in-memory credential store.

use std::collections::HashMap;
use std::sync::Arc;

use adbridge_core::config::AppConfig;
use adbridge_core::types::{
    AdPlatform, CampaignObjective, CampaignOutcome, CampaignRequest, DatePreset, PerformanceQuery,
    PlatformFetch,
};
use adbridge_core::BridgeError;
use adbridge_orchestrator::CampaignOrchestrator;
use adbridge_platforms::{CredentialUpdate, InMemoryCredentialStore};

fn store_with_meta_and_google() -> Arc<InMemoryCredentialStore> {
    let store = InMemoryCredentialStore::new();
    store.set_credentials(
        AdPlatform::Meta,
        CredentialUpdate {
            access_token: Some("meta-token".to_string()),
            ad_account_id: Some("act_123".to_string()),
            ..Default::default()
        },
    );
    store.set_credentials(
        AdPlatform::Google,
        CredentialUpdate {
            refresh_token: Some("google-refresh".to_string()),
            customer_id: Some("789".to_string()),
            ..Default::default()
        },
    );
    Arc::new(store)
}

fn config_with_google_token() -> AppConfig {
    let mut config = AppConfig::default();
    config.google.developer_token = Some("dev-token".to_string());
    config
}

fn campaign_request(platforms: Vec<AdPlatform>) -> CampaignRequest {
    CampaignRequest {
        platforms,
        campaign_name: "Spring Sale".to_string(),
        objective: CampaignObjective::Traffic,
        budget: 25.0,
        ad_prompt: "Product: Widget. Target Audience: Engineers.".to_string(),
    }
}

#[tokio::test]
async fn test_fanout_yields_one_outcome_per_platform() {
    let store = store_with_meta_and_google();
    let orchestrator = CampaignOrchestrator::new(
        store,
        config_with_google_token(),
    );

    let request = campaign_request(vec![AdPlatform::Meta, AdPlatform::Google]);
    let fanout = orchestrator.create_campaigns(&request).await.unwrap();

    assert_eq!(fanout.results.len(), 2);
    assert!(fanout.results[&AdPlatform::Meta].is_created());
    assert!(fanout.results[&AdPlatform::Google].is_created());
    assert!(!fanout.has_failures());
    assert!(fanout.ad_copy.contains("Widget"));
}

#[tokio::test]
async fn test_platform_failures_are_independent() {
    // LinkedIn has no credentials; Meta does. The Meta outcome must not be
    // affected by the LinkedIn failure.
    let store = store_with_meta_and_google();
    let orchestrator =
        CampaignOrchestrator::new(store, AppConfig::default());

    let request = campaign_request(vec![AdPlatform::Meta, AdPlatform::Linkedin]);
    let fanout = orchestrator.create_campaigns(&request).await.unwrap();

    assert!(fanout.results[&AdPlatform::Meta].is_created());
    match &fanout.results[&AdPlatform::Linkedin] {
        CampaignOutcome::Failed { reason } => {
            assert_eq!(reason, "missing credentials for linkedin");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(fanout.has_failures());
}

#[tokio::test]
async fn test_adapter_error_becomes_failed_outcome() {
    // Google without a developer token: adapter init fails, outcome is
    // recorded rather than propagated.
    let store = store_with_meta_and_google();
    let orchestrator =
        CampaignOrchestrator::new(store, AppConfig::default());

    let request = campaign_request(vec![AdPlatform::Google]);
    let fanout = orchestrator.create_campaigns(&request).await.unwrap();

    match &fanout.results[&AdPlatform::Google] {
        CampaignOutcome::Failed { reason } => {
            assert!(reason.contains("developer token"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_copy_generation_failure_aborts_fanout() {
    let store = store_with_meta_and_google();
    let orchestrator = CampaignOrchestrator::new(
        store,
        config_with_google_token(),
    );

    let mut request = campaign_request(vec![AdPlatform::Meta]);
    request.ad_prompt = "   ".to_string();
    let err = orchestrator.create_campaigns(&request).await.unwrap_err();
    assert!(matches!(err, BridgeError::ContentGeneration(_)));
}

#[tokio::test]
async fn test_duplicate_platforms_collapse() {
    let store = store_with_meta_and_google();
    let orchestrator = CampaignOrchestrator::new(
        store,
        config_with_google_token(),
    );

    let request = campaign_request(vec![AdPlatform::Meta, AdPlatform::Meta]);
    let fanout = orchestrator.create_campaigns(&request).await.unwrap();
    assert_eq!(fanout.results.len(), 1);
}

#[tokio::test]
async fn test_performance_skips_and_summarizes() {
    let store = store_with_meta_and_google();
    let orchestrator = CampaignOrchestrator::new(
        store,
        config_with_google_token(),
    );

    let mut campaign_ids = HashMap::new();
    campaign_ids.insert(AdPlatform::Google, vec!["4242".to_string()]);
    let query = PerformanceQuery {
        platforms: vec![AdPlatform::Meta, AdPlatform::Google, AdPlatform::Linkedin],
        date_preset: DatePreset::Last7d,
        campaign_ids,
    };

    let report = orchestrator.get_performance(&query).await.unwrap();
    assert_eq!(report.platforms.len(), 3);

    // Meta was queried without campaign ids: skipped, not failed.
    match &report.platforms[&AdPlatform::Meta] {
        PlatformFetch::Skipped { reason } => {
            assert!(reason.contains("campaign ids"));
        }
        other => panic!("expected skip, got {other:?}"),
    }

    // LinkedIn has no credentials: skipped with the missing-credentials
    // reason.
    match &report.platforms[&AdPlatform::Linkedin] {
        PlatformFetch::Skipped { reason } => {
            assert_eq!(reason, "missing credentials for linkedin");
        }
        other => panic!("expected skip, got {other:?}"),
    }

    // Google returned rows; the summary reflects only those.
    match &report.platforms[&AdPlatform::Google] {
        PlatformFetch::Fetched { records } => {
            assert_eq!(records.len(), 1);
            let expected_impressions: u64 = records.iter().map(|r| r.impressions).sum();
            assert_eq!(report.summary.impressions, expected_impressions);
            assert!(report.summary.spend > 0.0);
        }
        other => panic!("expected rows, got {other:?}"),
    }
}

#[tokio::test]
async fn test_performance_meta_with_ids_returns_rows() {
    let store = store_with_meta_and_google();
    let orchestrator =
        CampaignOrchestrator::new(store, AppConfig::default());

    let mut campaign_ids = HashMap::new();
    campaign_ids.insert(AdPlatform::Meta, vec!["120211234567890123".to_string()]);
    let query = PerformanceQuery {
        platforms: vec![AdPlatform::Meta],
        date_preset: DatePreset::Last30d,
        campaign_ids,
    };

    let report = orchestrator.get_performance(&query).await.unwrap();
    match &report.platforms[&AdPlatform::Meta] {
        PlatformFetch::Fetched { records } => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].campaign_id, "120211234567890123");
        }
        other => panic!("expected rows, got {other:?}"),
    }
}
