//! Process-lifetime credential storage.
//!
//! The store keeps partial per-platform field sets and applies shallow-merge
//! updates; a typed [`PlatformCredential`] is only handed out once every
//! required field for the platform is present. Callers that get `None` must
//! treat the platform as having no usable credentials — partial records are
//! never attempted against a vendor API.

use adbridge_core::config::CredentialSeeds;
use adbridge_core::types::{AdPlatform, PlatformCredential};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A partial credential update. Present fields overwrite the stored value;
/// absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialUpdate {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub ad_account_id: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub login_customer_id: Option<String>,
    #[serde(default)]
    pub organization_urn: Option<String>,
}

impl CredentialUpdate {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none()
            && self.ad_account_id.is_none()
            && self.refresh_token.is_none()
            && self.customer_id.is_none()
            && self.login_customer_id.is_none()
            && self.organization_urn.is_none()
    }

    fn merge_from(&mut self, update: CredentialUpdate) {
        if let Some(v) = update.access_token {
            self.access_token = Some(v);
        }
        if let Some(v) = update.ad_account_id {
            self.ad_account_id = Some(v);
        }
        if let Some(v) = update.refresh_token {
            self.refresh_token = Some(v);
        }
        if let Some(v) = update.customer_id {
            self.customer_id = Some(v);
        }
        if let Some(v) = update.login_customer_id {
            self.login_customer_id = Some(v);
        }
        if let Some(v) = update.organization_urn {
            self.organization_urn = Some(v);
        }
    }
}

/// Source of per-platform credentials for orchestration calls.
///
/// Injected into the orchestrator rather than read from a global, so a
/// future implementation can resolve credentials per authenticated caller
/// instead of per process.
pub trait CredentialProvider: Send + Sync {
    /// The fully-populated credential for `platform`, or `None` when the
    /// required fields are not all present.
    fn credential(&self, platform: AdPlatform) -> Option<PlatformCredential>;
}

/// In-memory credential store shared by every in-flight request.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: DashMap<AdPlatform, CredentialUpdate>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merge `update` into the record for `platform`. Field content
    /// is not validated here; only presence gates use downstream.
    pub fn set_credentials(&self, platform: AdPlatform, update: CredentialUpdate) {
        self.records.entry(platform).or_default().merge_from(update);
        info!(platform = %platform, "Updated credentials");
    }

    /// String-keyed variant of [`set_credentials`](Self::set_credentials):
    /// unknown platform names are logged and ignored.
    pub fn set_credentials_by_name(&self, platform: &str, update: CredentialUpdate) {
        match platform.parse::<AdPlatform>() {
            Ok(parsed) => self.set_credentials(parsed, update),
            Err(_) => warn!(platform = %platform, "Ignoring credentials for unknown platform"),
        }
    }

    /// Drop the stored record for `platform`.
    pub fn clear(&self, platform: AdPlatform) {
        self.records.remove(&platform);
    }

    /// Seed the store from optional config values — the development path.
    pub fn seed_from_config(&self, seeds: &CredentialSeeds) {
        let meta = CredentialUpdate {
            access_token: seeds.meta_access_token.clone(),
            ad_account_id: seeds.meta_ad_account_id.clone(),
            ..Default::default()
        };
        if !meta.is_empty() {
            self.set_credentials(AdPlatform::Meta, meta);
        }

        let google = CredentialUpdate {
            refresh_token: seeds.google_refresh_token.clone(),
            customer_id: seeds.google_customer_id.clone(),
            login_customer_id: seeds.google_login_customer_id.clone(),
            ..Default::default()
        };
        if !google.is_empty() {
            self.set_credentials(AdPlatform::Google, google);
        }

        let linkedin = CredentialUpdate {
            access_token: seeds.linkedin_access_token.clone(),
            organization_urn: seeds.linkedin_organization_urn.clone(),
            ..Default::default()
        };
        if !linkedin.is_empty() {
            self.set_credentials(AdPlatform::Linkedin, linkedin);
        }
    }
}

impl CredentialProvider for InMemoryCredentialStore {
    fn credential(&self, platform: AdPlatform) -> Option<PlatformCredential> {
        let record = self.records.get(&platform)?;
        match platform {
            AdPlatform::Meta => Some(PlatformCredential::Meta {
                access_token: record.access_token.clone()?,
                ad_account_id: record.ad_account_id.clone()?,
            }),
            AdPlatform::Google => Some(PlatformCredential::Google {
                refresh_token: record.refresh_token.clone()?,
                customer_id: record.customer_id.clone()?,
                login_customer_id: record.login_customer_id.clone(),
            }),
            AdPlatform::Linkedin => Some(PlatformCredential::Linkedin {
                access_token: record.access_token.clone()?,
                organization_urn: record.organization_urn.clone()?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_is_absent() {
        let store = InMemoryCredentialStore::new();
        store.set_credentials(
            AdPlatform::Meta,
            CredentialUpdate {
                access_token: Some("token-1".to_string()),
                ..Default::default()
            },
        );
        // access_token alone is not a usable Meta credential.
        assert!(store.credential(AdPlatform::Meta).is_none());
    }

    #[test]
    fn test_shallow_merge_retains_existing_fields() {
        let store = InMemoryCredentialStore::new();
        store.set_credentials(
            AdPlatform::Meta,
            CredentialUpdate {
                access_token: Some("token-1".to_string()),
                ..Default::default()
            },
        );
        store.set_credentials(
            AdPlatform::Meta,
            CredentialUpdate {
                ad_account_id: Some("act_123".to_string()),
                ..Default::default()
            },
        );

        let credential = store.credential(AdPlatform::Meta).unwrap();
        assert_eq!(
            credential,
            PlatformCredential::Meta {
                access_token: "token-1".to_string(),
                ad_account_id: "act_123".to_string(),
            }
        );

        // New values overwrite, untouched fields survive.
        store.set_credentials(
            AdPlatform::Meta,
            CredentialUpdate {
                access_token: Some("token-2".to_string()),
                ..Default::default()
            },
        );
        let credential = store.credential(AdPlatform::Meta).unwrap();
        assert_eq!(
            credential,
            PlatformCredential::Meta {
                access_token: "token-2".to_string(),
                ad_account_id: "act_123".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_platform_name_ignored() {
        let store = InMemoryCredentialStore::new();
        store.set_credentials_by_name(
            "myspace",
            CredentialUpdate {
                access_token: Some("token".to_string()),
                ..Default::default()
            },
        );
        for platform in AdPlatform::ALL {
            assert!(store.credential(platform).is_none());
        }
    }

    #[test]
    fn test_google_login_customer_id_optional() {
        let store = InMemoryCredentialStore::new();
        store.set_credentials(
            AdPlatform::Google,
            CredentialUpdate {
                refresh_token: Some("refresh-1".to_string()),
                customer_id: Some("789".to_string()),
                ..Default::default()
            },
        );
        match store.credential(AdPlatform::Google).unwrap() {
            PlatformCredential::Google {
                login_customer_id, ..
            } => assert!(login_customer_id.is_none()),
            other => panic!("unexpected credential: {other:?}"),
        }
    }

    #[test]
    fn test_seed_from_config() {
        let seeds = CredentialSeeds {
            meta_access_token: Some("token-1".to_string()),
            meta_ad_account_id: Some("act_123".to_string()),
            ..Default::default()
        };
        let store = InMemoryCredentialStore::new();
        store.seed_from_config(&seeds);
        assert!(store.credential(AdPlatform::Meta).is_some());
        assert!(store.credential(AdPlatform::Google).is_none());
        assert!(store.credential(AdPlatform::Linkedin).is_none());
    }

    #[test]
    fn test_clear() {
        let store = InMemoryCredentialStore::new();
        store.set_credentials(
            AdPlatform::Linkedin,
            CredentialUpdate {
                access_token: Some("token".to_string()),
                organization_urn: Some("urn:li:organization:456".to_string()),
                ..Default::default()
            },
        );
        assert!(store.credential(AdPlatform::Linkedin).is_some());
        store.clear(AdPlatform::Linkedin);
        assert!(store.credential(AdPlatform::Linkedin).is_none());
    }
}
