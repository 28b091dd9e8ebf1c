use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Supported advertising platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdPlatform {
    Meta,
    Google,
    Linkedin,
}

impl AdPlatform {
    pub const ALL: [AdPlatform; 3] = [AdPlatform::Meta, AdPlatform::Google, AdPlatform::Linkedin];

    /// Human-readable display name for this platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            AdPlatform::Meta => "Meta",
            AdPlatform::Google => "Google",
            AdPlatform::Linkedin => "LinkedIn",
        }
    }

    /// Wire name used in request bodies and credential records.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AdPlatform::Meta => "meta",
            AdPlatform::Google => "google",
            AdPlatform::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for AdPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AdPlatform {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meta" => Ok(AdPlatform::Meta),
            "google" => Ok(AdPlatform::Google),
            "linkedin" => Ok(AdPlatform::Linkedin),
            other => Err(BridgeError::Validation(format!(
                "unknown platform '{other}' (supported: meta, google, linkedin)"
            ))),
        }
    }
}

/// Normalized campaign objective, independent of any vendor's taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignObjective {
    LinkClicks,
    Conversions,
    Traffic,
    Awareness,
    LeadGeneration,
}

impl CampaignObjective {
    pub fn wire_name(&self) -> &'static str {
        match self {
            CampaignObjective::LinkClicks => "link_clicks",
            CampaignObjective::Conversions => "conversions",
            CampaignObjective::Traffic => "traffic",
            CampaignObjective::Awareness => "awareness",
            CampaignObjective::LeadGeneration => "lead_generation",
        }
    }

    /// Objective string sent to the Meta API.
    ///
    /// Deliberately an identity mapping — the normalized name uppercased,
    /// with no per-vendor translation table.
    pub fn meta_objective(&self) -> String {
        self.wire_name().to_uppercase()
    }
}

impl fmt::Display for CampaignObjective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for CampaignObjective {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link_clicks" => Ok(CampaignObjective::LinkClicks),
            "conversions" => Ok(CampaignObjective::Conversions),
            "traffic" => Ok(CampaignObjective::Traffic),
            "awareness" => Ok(CampaignObjective::Awareness),
            "lead_generation" => Ok(CampaignObjective::LeadGeneration),
            other => Err(BridgeError::Validation(format!(
                "unknown objective '{other}' (supported: link_clicks, conversions, traffic, \
                 awareness, lead_generation)"
            ))),
        }
    }
}

/// Fully-populated auth material for one platform.
///
/// A value of this type only exists when every required field for the
/// platform is present. Partial records live inside the credential store and
/// never leave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum PlatformCredential {
    Meta {
        access_token: String,
        ad_account_id: String,
    },
    Google {
        refresh_token: String,
        customer_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        login_customer_id: Option<String>,
    },
    Linkedin {
        access_token: String,
        organization_urn: String,
    },
}

impl PlatformCredential {
    pub fn platform(&self) -> AdPlatform {
        match self {
            PlatformCredential::Meta { .. } => AdPlatform::Meta,
            PlatformCredential::Google { .. } => AdPlatform::Google,
            PlatformCredential::Linkedin { .. } => AdPlatform::Linkedin,
        }
    }
}

/// A logical multi-platform campaign creation request. Constructed per API
/// call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRequest {
    pub platforms: Vec<AdPlatform>,
    pub campaign_name: String,
    pub objective: CampaignObjective,
    /// Daily budget in major currency units (not micros).
    pub budget: f64,
    pub ad_prompt: String,
}

/// Per-platform campaign creation parameters handed to an adapter.
#[derive(Debug, Clone)]
pub struct CampaignSpec {
    pub name: String,
    pub objective: CampaignObjective,
    /// Daily budget in major currency units.
    pub budget: f64,
}

/// Outcome of one platform's campaign creation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CampaignOutcome {
    Created { campaign_id: String },
    Failed { reason: String },
}

impl CampaignOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CampaignOutcome::Created { .. })
    }
}

/// Result of a multi-platform campaign creation fan-out: the ad copy used
/// everywhere plus one outcome per requested platform. Outcomes are
/// independent — there is no atomicity across platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignFanout {
    pub ad_copy: String,
    pub results: HashMap<AdPlatform, CampaignOutcome>,
}

impl CampaignFanout {
    pub fn has_failures(&self) -> bool {
        self.results.values().any(|outcome| !outcome.is_created())
    }
}

/// Reporting date-range preset, normalized across vendors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[default]
    #[serde(rename = "last_7d")]
    Last7d,
    #[serde(rename = "last_30d")]
    Last30d,
}

impl DatePreset {
    /// Meta insights `date_preset` parameter.
    pub fn meta_preset(&self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::Last7d => "last_7d",
            DatePreset::Last30d => "last_30d",
        }
    }

    /// Google Ads GAQL `DURING` keyword.
    pub fn google_keyword(&self) -> &'static str {
        match self {
            DatePreset::Today => "TODAY",
            DatePreset::Yesterday => "YESTERDAY",
            DatePreset::Last7d => "LAST_7_DAYS",
            DatePreset::Last30d => "LAST_30_DAYS",
        }
    }
}

impl FromStr for DatePreset {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DatePreset::Today),
            "yesterday" => Ok(DatePreset::Yesterday),
            "last_7d" => Ok(DatePreset::Last7d),
            "last_30d" => Ok(DatePreset::Last30d),
            other => Err(BridgeError::Validation(format!(
                "unknown date preset '{other}' (supported: today, yesterday, last_7d, last_30d)"
            ))),
        }
    }
}

/// A multi-platform performance query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceQuery {
    pub platforms: Vec<AdPlatform>,
    #[serde(default)]
    pub date_preset: DatePreset,
    /// Optional per-platform campaign-id filters.
    #[serde(default)]
    pub campaign_ids: HashMap<AdPlatform, Vec<String>>,
}

/// Platform-native spend value. Google reports micros, Meta reports major
/// currency units. Conversion to major units happens in the aggregator,
/// never inside an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendAmount {
    /// Spend in major currency units (e.g. dollars).
    Major(f64),
    /// Spend in micros (1 unit = 1,000,000 micros).
    Micros(u64),
}

impl SpendAmount {
    /// Convert to major currency units.
    pub fn to_major(self) -> f64 {
        match self {
            SpendAmount::Major(value) => value,
            SpendAmount::Micros(micros) => micros as f64 / 1_000_000.0,
        }
    }
}

/// One platform-native metrics row, with the raw vendor payload retained for
/// passthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    pub platform: AdPlatform,
    pub campaign_id: String,
    pub campaign_name: String,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: SpendAmount,
    pub raw: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
}

/// Normalized totals across every successfully-fetched platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub impressions: u64,
    pub clicks: u64,
    /// Total spend in major units, rounded to 2 decimals exactly once.
    pub spend: f64,
}

/// Per-platform outcome of a performance fetch. Distinguishes "failed" and
/// "skipped" from "not requested" (absent from the report map).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlatformFetch {
    Fetched { records: Vec<MetricRecord> },
    Skipped { reason: String },
    Failed { reason: String },
}

/// Aggregated performance response: raw per-platform outcomes plus the
/// normalized summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub platforms: HashMap<AdPlatform, PlatformFetch>,
    pub summary: PerformanceSummary,
}
