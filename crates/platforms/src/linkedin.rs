//! LinkedIn Marketing API adapter.
//!
//! Campaign-group creation and analytics retrieval are not wired to the real
//! API yet. Creation surfaces an explicit not-implemented error rather than
//! fabricating a campaign-group URN that looks real to callers; analytics
//! return no rows. The thin OAuth helpers used by the authorization callback
//! live here as well.

use adbridge_core::config::LinkedinConfig;
use adbridge_core::types::{AdPlatform, CampaignSpec, DatePreset, MetricRecord, PlatformCredential};
use adbridge_core::{BridgeError, BridgeResult};
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::adapter::PlatformAdapter;

/// Scopes requested for the marketing APIs.
pub const OAUTH_SCOPES: [&str; 4] = [
    "r_ads_reporting",
    "r_ads",
    "w_organization_social",
    "r_basicprofile",
];

const AUTHORIZATION_ENDPOINT: &str = "https://www.linkedin.com/oauth/v2/authorization";

pub struct LinkedinAdapter {
    config: LinkedinConfig,
}

impl LinkedinAdapter {
    pub fn new(config: LinkedinConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinkedinConfig {
        &self.config
    }
}

fn linkedin_credential(credential: &PlatformCredential) -> BridgeResult<(&str, &str)> {
    match credential {
        PlatformCredential::Linkedin {
            access_token,
            organization_urn,
        } => Ok((access_token, organization_urn)),
        other => Err(BridgeError::AdapterInit(format!(
            "expected LinkedIn credentials, got {}",
            other.platform()
        ))),
    }
}

impl PlatformAdapter for LinkedinAdapter {
    fn platform(&self) -> AdPlatform {
        AdPlatform::Linkedin
    }

    fn create_campaign(
        &self,
        credential: &PlatformCredential,
        spec: &CampaignSpec,
    ) -> BridgeResult<String> {
        let (_access_token, organization_urn) = linkedin_credential(credential)?;
        warn!(
            account = %organization_urn,
            name = %spec.name,
            "LinkedIn campaign group creation is not implemented"
        );
        Err(BridgeError::NotImplemented(
            "LinkedIn campaign group creation".to_string(),
        ))
    }

    fn fetch_metrics(
        &self,
        credential: &PlatformCredential,
        _campaign_ids: &[String],
        _date_preset: DatePreset,
    ) -> BridgeResult<Vec<MetricRecord>> {
        let (_access_token, organization_urn) = linkedin_credential(credential)?;
        info!(
            account = %organization_urn,
            version = %self.config.api_version,
            "LinkedIn analytics fetch is not implemented; returning no rows"
        );
        Ok(Vec::new())
    }
}

/// Build the member authorization URL for the LinkedIn OAuth consent flow.
pub fn authorization_url(config: &LinkedinConfig, state: &str) -> BridgeResult<Url> {
    let client_id = config.client_id.as_deref().ok_or_else(|| {
        BridgeError::AdapterInit("LinkedIn client id not configured".to_string())
    })?;

    let mut url = Url::parse(AUTHORIZATION_ENDPOINT)
        .map_err(|e| BridgeError::AdapterInit(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("state", state)
        .append_pair("scope", &OAUTH_SCOPES.join(" "));
    Ok(url)
}

/// Exchange an authorization code for an access token.
///
/// Placeholder: returns a token payload in the live endpoint's shape without
/// calling LinkedIn. Real deployments must perform the HTTPS exchange and
/// persist the token per authenticated user.
pub fn exchange_auth_code(
    config: &LinkedinConfig,
    code: &str,
) -> BridgeResult<serde_json::Value> {
    if code.trim().is_empty() {
        return Err(BridgeError::Validation(
            "authorization code must not be empty".to_string(),
        ));
    }
    if config.client_id.is_none() || config.client_secret.is_none() {
        return Err(BridgeError::AdapterInit(
            "LinkedIn client credentials not configured".to_string(),
        ));
    }

    info!("Exchanged LinkedIn authorization code for access token (placeholder)");
    Ok(serde_json::json!({
        "access_token": format!("li-placeholder-{}", Uuid::new_v4()),
        "expires_in": 5_184_000,
        "scope": OAUTH_SCOPES.join(","),
        "token_type": "Bearer",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbridge_core::types::CampaignObjective;

    fn linkedin_cred() -> PlatformCredential {
        PlatformCredential::Linkedin {
            access_token: "token-1".to_string(),
            organization_urn: "urn:li:organization:456".to_string(),
        }
    }

    #[test]
    fn test_create_campaign_is_not_implemented() {
        let adapter = LinkedinAdapter::new(LinkedinConfig::default());
        let spec = CampaignSpec {
            name: "Spring Sale (LinkedIn)".to_string(),
            objective: CampaignObjective::Awareness,
            budget: 10.0,
        };
        let err = adapter.create_campaign(&linkedin_cred(), &spec).unwrap_err();
        assert!(matches!(err, BridgeError::NotImplemented(_)));
    }

    #[test]
    fn test_fetch_metrics_returns_no_rows() {
        let adapter = LinkedinAdapter::new(LinkedinConfig::default());
        let records = adapter
            .fetch_metrics(&linkedin_cred(), &["urn:li:sponsoredCampaignGroup:1".to_string()], DatePreset::Last7d)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_authorization_url() {
        let config = LinkedinConfig {
            client_id: Some("client-1".to_string()),
            ..Default::default()
        };
        let url = authorization_url(&config, "csrf-state-1").unwrap();
        assert_eq!(url.domain(), Some("www.linkedin.com"));
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(query.contains(&("client_id".to_string(), "client-1".to_string())));
        assert!(query.contains(&("state".to_string(), "csrf-state-1".to_string())));
        assert!(query
            .iter()
            .any(|(k, v)| k == "scope" && v.contains("r_ads_reporting")));
    }

    #[test]
    fn test_authorization_url_requires_client_id() {
        let err = authorization_url(&LinkedinConfig::default(), "state").unwrap_err();
        assert!(matches!(err, BridgeError::AdapterInit(_)));
    }

    #[test]
    fn test_exchange_auth_code_placeholder() {
        let config = LinkedinConfig {
            client_id: Some("client-1".to_string()),
            client_secret: Some("secret-1".to_string()),
            ..Default::default()
        };
        let token = exchange_auth_code(&config, "auth-code").unwrap();
        assert!(token["access_token"]
            .as_str()
            .unwrap()
            .starts_with("li-placeholder-"));
        assert_eq!(token["token_type"], "Bearer");
    }

    #[test]
    fn test_exchange_auth_code_rejects_empty_code() {
        let config = LinkedinConfig {
            client_id: Some("client-1".to_string()),
            client_secret: Some("secret-1".to_string()),
            ..Default::default()
        };
        let err = exchange_auth_code(&config, "  ").unwrap_err();
        assert!(matches!(err, BridgeError::Validation(_)));
    }

    #[test]
    fn test_exchange_auth_code_requires_client_config() {
        let err = exchange_auth_code(&LinkedinConfig::default(), "auth-code").unwrap_err();
        assert!(matches!(err, BridgeError::AdapterInit(_)));
    }
}
