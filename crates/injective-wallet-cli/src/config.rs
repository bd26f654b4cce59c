/*
[INPUT]:  Optional YAML configuration file and INJ_WALLET__* environment variables
[OUTPUT]: Parsed CLI configuration with per-network endpoints
[POS]:    Configuration layer - network, endpoints and session storage
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use injective_wallet_core::authz::{DEFAULT_AUTO_SIGN_DURATION_SECS, DEFAULT_AUTO_SIGN_MESSAGE_TYPES};
use injective_wallet_core::{Network, NetworkEndpoints};

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "INJ_WALLET";
const ENV_SEPARATOR: &str = "__";

/// Top-level configuration for the wallet CLI
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub network: Network,
    /// Directory holding persisted auto-sign sessions
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
    #[serde(default)]
    pub endpoints: EndpointOverrides,
    #[serde(default)]
    pub auto_sign: AutoSignConfig,
}

/// Replacements for the per-network service URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_registry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coingecko: Option<String>,
}

/// Permissions used when planning auto-sign grants
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AutoSignConfig {
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: u64,
    #[serde(default = "default_message_types")]
    pub message_types: Vec<String>,
}

impl Default for AutoSignConfig {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration_seconds(),
            message_types: default_message_types(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            session_dir: default_session_dir(),
            endpoints: EndpointOverrides::default(),
            auto_sign: AutoSignConfig::default(),
        }
    }
}

fn default_session_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("injective-wallet").join("sessions"))
        .unwrap_or_else(|| PathBuf::from(".injective-wallet").join("sessions"))
}

fn default_duration_seconds() -> u64 {
    DEFAULT_AUTO_SIGN_DURATION_SECS
}

fn default_message_types() -> Vec<String> {
    DEFAULT_AUTO_SIGN_MESSAGE_TYPES
        .iter()
        .map(|t| t.to_string())
        .collect()
}

impl CliConfig {
    /// Load configuration from an optional YAML file layered with environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()
            .context("build configuration")?
            .try_deserialize()
            .context("parse configuration")
    }

    /// Write this configuration as YAML, refusing to clobber unless `force`
    pub fn write_to(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self).context("serialize config to YAML")?;
        std::fs::write(path, yaml).with_context(|| format!("write config to {}", path.display()))
    }

    /// Network defaults with any configured overrides applied
    pub fn endpoints(&self) -> NetworkEndpoints {
        let mut endpoints = NetworkEndpoints::for_network(self.network);
        if let Some(url) = &self.endpoints.cache_api {
            endpoints.cache_api = url.clone();
        }
        if let Some(url) = &self.endpoints.token_registry {
            endpoints.token_registry = url.clone();
        }
        if let Some(url) = &self.endpoints.coingecko {
            endpoints.coingecko = url.clone();
        }
        endpoints
    }
}
