use crate::error::ContractError;
use crate::schema::Schema;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Hosted mock API project the suite was written against.
pub const DEFAULT_BASE_URL: &str = "https://682ad119ab2b5004cb37d298.mockapi.io";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Id assumed never to exist on the server.
    #[serde(default = "default_absent_id")]
    pub absent_id: String,
    #[serde(default)]
    pub schema: Schema,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_absent_id() -> String {
    "99999".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            absent_id: default_absent_id(),
            schema: Schema::default(),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CONTRACT")
        .prefix_separator("_")
        .separator("__")
}

impl Config {
    /// Load from an optional `contract.{toml,yaml,json}` file and
    /// `CONTRACT_*` environment variables (`CONTRACT_SCHEMA__MOVIE_TITLE`
    /// for nested keys).
    pub fn load() -> Result<Self, ContractError> {
        dotenvy::dotenv().ok();
        Self::from_environment(environment())
    }

    fn from_environment(env: Environment) -> Result<Self, ContractError> {
        let config = Cfg::builder()
            .add_source(File::with_name("contract").required(false))
            .add_source(env)
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Same defaults as [`Config::load`], pointed at another base URL.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ContractError::Config(anyhow::anyhow!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ContractError::Config(anyhow::anyhow!(
                "timeouts must be greater than zero"
            )));
        }
        if self.absent_id.trim().is_empty() {
            return Err(ContractError::Config(anyhow::anyhow!(
                "absent_id must not be empty"
            )));
        }
        self.schema
            .validate()
            .map_err(|e| ContractError::Config(anyhow::anyhow!(e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
