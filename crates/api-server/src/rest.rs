//! REST API handlers for campaign, copy and reporting endpoints.
//!
//! Request bodies arrive with loosely-typed string fields; everything is
//! parsed and validated here at the API boundary so downstream code only
//! ever sees well-formed domain values.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use adbridge_copygen::{CopyGenerator, MAX_VARIATIONS};
use adbridge_core::config::{AppConfig, CopyConfig};
use adbridge_core::types::{
    AdPlatform, CampaignFanout, CampaignRequest, DatePreset, PerformanceQuery, PerformanceReport,
};
use adbridge_core::BridgeError;
use adbridge_orchestrator::CampaignOrchestrator;
use adbridge_platforms::linkedin;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Fields a create-campaign request must carry.
const CREATE_REQUIRED_FIELDS: [&str; 5] =
    ["platforms", "campaign_name", "objective", "budget", "ad_prompt"];

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<CampaignOrchestrator>,
    pub generator: CopyGenerator,
    pub config: AppConfig,
    pub start_time: Instant,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    metrics::counter!("api.validation_errors").increment(1);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_request".to_string(),
            details: Some(message.into()),
        }),
    )
}

fn internal_error(error: &str, details: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    metrics::counter!("api.errors").increment(1);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
            details: Some(details.into()),
        }),
    )
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — readiness probe for Kubernetes.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — liveness probe for Kubernetes.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Effective variation limit: the configured maximum, capped at what the
/// generator's template pools support.
fn variation_limit(config: &CopyConfig) -> usize {
    config.max_variations.min(MAX_VARIATIONS)
}

#[derive(Debug, Deserialize)]
pub struct GenerateCopyRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub num_variations: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GenerateCopyResponse {
    pub variations: Vec<String>,
}

/// POST /api/generate-copy
pub async fn generate_copy(
    State(state): State<AppState>,
    Json(request): Json<GenerateCopyRequest>,
) -> Result<Json<GenerateCopyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let prompt = match request.prompt.as_deref() {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(bad_request("'prompt' must be a non-empty string")),
    };
    let count = request
        .num_variations
        .unwrap_or(state.config.copy.default_variations);
    let limit = variation_limit(&state.config.copy);
    if count == 0 || count > limit {
        return Err(bad_request(format!(
            "'num_variations' must be between 1 and {limit}"
        )));
    }

    match state.generator.generate(prompt, count) {
        Ok(variations) => {
            metrics::counter!("api.copy_generated").increment(1);
            Ok(Json(GenerateCopyResponse { variations }))
        }
        Err(BridgeError::Validation(msg)) => Err(bad_request(msg)),
        Err(e) => {
            error!(error = %e, "Ad copy generation failed");
            Err(internal_error("copy_generation_failed", e.to_string()))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCampaignRequest {
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub ad_prompt: Option<String>,
}

/// Validate a create-campaign body into a domain request.
fn parse_create_request(body: CreateCampaignRequest) -> Result<CampaignRequest, String> {
    let mut missing = Vec::new();
    if body.platforms.as_ref().map_or(true, |p| p.is_empty()) {
        missing.push("platforms");
    }
    if body
        .campaign_name
        .as_deref()
        .map_or(true, |n| n.trim().is_empty())
    {
        missing.push("campaign_name");
    }
    if body.objective.is_none() {
        missing.push("objective");
    }
    if body.budget.is_none() {
        missing.push("budget");
    }
    if body
        .ad_prompt
        .as_deref()
        .map_or(true, |p| p.trim().is_empty())
    {
        missing.push("ad_prompt");
    }
    if !missing.is_empty() {
        return Err(format!(
            "missing required fields: {} (required: {})",
            missing.join(", "),
            CREATE_REQUIRED_FIELDS.join(", ")
        ));
    }

    // All present past this point.
    let platforms = body
        .platforms
        .unwrap_or_default()
        .iter()
        .map(|name| name.parse::<AdPlatform>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    let objective = body
        .objective
        .unwrap_or_default()
        .parse()
        .map_err(|e: BridgeError| e.to_string())?;
    let budget = body.budget.unwrap_or_default();
    if budget <= 0.0 || !budget.is_finite() {
        return Err("'budget' must be a positive number".to_string());
    }

    Ok(CampaignRequest {
        platforms,
        campaign_name: body.campaign_name.unwrap_or_default(),
        objective,
        budget,
        ad_prompt: body.ad_prompt.unwrap_or_default(),
    })
}

/// POST /api/create-campaign
///
/// Returns 200 when every platform created its campaign and 500 when any
/// platform failed; both carry the full per-platform result map so callers
/// can always see which platforms succeeded.
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(body): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignFanout>), (StatusCode, Json<ErrorResponse>)> {
    let request = match parse_create_request(body) {
        Ok(request) => request,
        Err(msg) => {
            warn!(error = %msg, "Create-campaign validation failed");
            return Err(bad_request(msg));
        }
    };

    match state.orchestrator.create_campaigns(&request).await {
        Ok(fanout) => {
            let status = if fanout.has_failures() {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::OK
            };
            Ok((status, Json(fanout)))
        }
        Err(e) => {
            error!(error = %e, "Campaign fan-out failed");
            Err(internal_error("campaign_creation_failed", e.to_string()))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GetPerformanceRequest {
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    #[serde(default)]
    pub date_preset: Option<String>,
    #[serde(default)]
    pub campaign_ids: Option<HashMap<String, Vec<String>>>,
}

/// Validate a get-performance body into a domain query. Unknown platform
/// keys inside `campaign_ids` are ignored with a warning rather than
/// rejected, since they only narrow the fetch.
fn parse_performance_query(body: GetPerformanceRequest) -> Result<PerformanceQuery, String> {
    let names = body
        .platforms
        .filter(|p| !p.is_empty())
        .ok_or_else(|| "'platforms' must be a non-empty list".to_string())?;
    let platforms = names
        .iter()
        .map(|name| name.parse::<AdPlatform>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let date_preset = match body.date_preset.as_deref() {
        Some(raw) => raw.parse::<DatePreset>().map_err(|e| e.to_string())?,
        None => DatePreset::default(),
    };

    let mut campaign_ids = HashMap::new();
    for (name, ids) in body.campaign_ids.unwrap_or_default() {
        match name.parse::<AdPlatform>() {
            Ok(platform) => {
                campaign_ids.insert(platform, ids);
            }
            Err(_) => {
                warn!(platform = %name, "Ignoring campaign ids for unknown platform");
            }
        }
    }

    Ok(PerformanceQuery {
        platforms,
        date_preset,
        campaign_ids,
    })
}

/// POST /api/get-performance
pub async fn get_performance(
    State(state): State<AppState>,
    Json(body): Json<GetPerformanceRequest>,
) -> Result<Json<PerformanceReport>, (StatusCode, Json<ErrorResponse>)> {
    let query = match parse_performance_query(body) {
        Ok(query) => query,
        Err(msg) => {
            warn!(error = %msg, "Get-performance validation failed");
            return Err(bad_request(msg));
        }
    };

    match state.orchestrator.get_performance(&query).await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            error!(error = %e, "Performance fetch failed");
            Err(internal_error("performance_fetch_failed", e.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LinkedinCallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Serialize)]
pub struct LinkedinCallbackResponse {
    pub message: String,
    pub data: serde_json::Value,
}

/// GET /callback/linkedin — LinkedIn OAuth redirect target.
pub async fn linkedin_callback(
    State(state): State<AppState>,
    Query(params): Query<LinkedinCallbackParams>,
) -> Result<Json<LinkedinCallbackResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(denial) = params.error {
        warn!(error = %denial, "LinkedIn authorization denied");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: denial,
                details: params.error_description,
            }),
        ));
    }

    let code = match params.code.as_deref() {
        Some(code) if !code.trim().is_empty() => code,
        _ => return Err(bad_request("missing 'code' query parameter")),
    };

    match linkedin::exchange_auth_code(&state.config.linkedin, code) {
        Ok(token) => Ok(Json(LinkedinCallbackResponse {
            message: "LinkedIn authorization successful".to_string(),
            data: token,
        })),
        Err(e) => {
            error!(error = %e, "LinkedIn token exchange failed");
            Err(internal_error("token_exchange_failed", e.to_string()))
        }
    }
}
