use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `ADBRIDGE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub google: GoogleAdsConfig,
    #[serde(default)]
    pub linkedin: LinkedinConfig,
    #[serde(default)]
    pub copy: CopyConfig,
    #[serde(default)]
    pub credentials: CredentialSeeds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// App-level Meta (Graph API) configuration. Per-user auth material lives in
/// the credential store, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaConfig {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub app_secret: Option<String>,
    #[serde(default = "default_meta_api_version")]
    pub api_version: String,
}

/// App-level Google Ads API configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleAdsConfig {
    #[serde(default)]
    pub developer_token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// App-level LinkedIn Marketing API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedinConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_linkedin_redirect_uri")]
    pub redirect_uri: String,
    #[serde(default = "default_linkedin_api_version")]
    pub api_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CopyConfig {
    #[serde(default = "default_copy_variations")]
    pub default_variations: usize,
    #[serde(default = "default_copy_max_variations")]
    pub max_variations: usize,
}

/// Optional credential seeds for development deployments. Production
/// deployments populate the credential store per authenticated user instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialSeeds {
    #[serde(default)]
    pub meta_access_token: Option<String>,
    #[serde(default)]
    pub meta_ad_account_id: Option<String>,
    #[serde(default)]
    pub google_refresh_token: Option<String>,
    #[serde(default)]
    pub google_customer_id: Option<String>,
    #[serde(default)]
    pub google_login_customer_id: Option<String>,
    #[serde(default)]
    pub linkedin_access_token: Option<String>,
    #[serde(default)]
    pub linkedin_organization_urn: Option<String>,
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_meta_api_version() -> String {
    "v19.0".to_string()
}
fn default_linkedin_redirect_uri() -> String {
    "http://localhost:8080/callback/linkedin".to_string()
}
fn default_linkedin_api_version() -> String {
    "202405".to_string()
}
fn default_copy_variations() -> usize {
    3
}
fn default_copy_max_variations() -> usize {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_secret: None,
            api_version: default_meta_api_version(),
        }
    }
}

impl Default for LinkedinConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: default_linkedin_redirect_uri(),
            api_version: default_linkedin_api_version(),
        }
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            default_variations: default_copy_variations(),
            max_variations: default_copy_max_variations(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            meta: MetaConfig::default(),
            google: GoogleAdsConfig::default(),
            linkedin: LinkedinConfig::default(),
            copy: CopyConfig::default(),
            credentials: CredentialSeeds::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("ADBRIDGE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
