use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::cli::Cli;
use crate::domain::validate_phone;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub dispatch: DispatchSettings,
}

/// Which provider implementation the service is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Real OmniDimension HTTP API (requires a credential)
    Live,
    /// Locally synthesized responses, no network
    Mock,
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderMode::Live => write!(f, "live"),
            ProviderMode::Mock => write!(f, "mock"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default = "default_mode")]
    pub mode: ProviderMode,
    /// API credential; when absent the environment variable named by
    /// `api_key_env` is consulted at provider construction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            api_key: None,
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchSettings {
    /// Number dialed when a call is dispatched without an explicit target
    #[serde(default = "default_fallback_phone")]
    pub fallback_phone: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            fallback_phone: default_fallback_phone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderSettings::default(),
            retry: RetrySettings::default(),
            dispatch: DispatchSettings::default(),
        }
    }
}

fn default_mode() -> ProviderMode {
    ProviderMode::Live
}

fn default_api_key_env() -> String {
    "OMNIDIMENSION_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://backend.omnidim.io/api/v1".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    2000
}

fn default_fallback_phone() -> String {
    "+919548999129".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file(Path::new("concierge.toml"))
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_file(&cli.config)?;

        // Apply CLI overrides (CLI > env vars > config file)
        settings.apply_cli_overrides(cli);

        settings.validate().map_err(|errors| {
            anyhow::anyhow!("Configuration validation failed:\n{}", errors.join("\n"))
        })?;

        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .set_default("provider.mode", "live")?
            .set_default("provider.base_url", default_base_url())?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(mock) = cli.mock {
            self.provider.mode = if mock {
                ProviderMode::Mock
            } else {
                ProviderMode::Live
            };
        }
        if let Some(phone) = &cli.phone {
            self.dispatch.fallback_phone = phone.clone();
        }
    }

    /// Check settings invariants, collecting every violation
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.retry.max_attempts == 0 {
            errors.push("retry.max_attempts must be at least 1".to_string());
        }
        if self.provider.base_url.is_empty() {
            errors.push("provider.base_url must not be empty".to_string());
        }
        if !validate_phone(&self.dispatch.fallback_phone) {
            errors.push(format!(
                "dispatch.fallback_phone is not a plausible phone number: {}",
                self.dispatch.fallback_phone
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
