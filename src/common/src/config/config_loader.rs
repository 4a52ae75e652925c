use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::target::{Target, Timeouts};
use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_PUBLIC_BASE_URL, DEFAULT_READ_TIMEOUT_MS, ENV_PREFIX,
};
use config::builder::DefaultState;
use config::{Config as RConfig, ConfigBuilder, Environment, File, FileFormat};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Self-hosted test run engine, read from `TESMON_TRE_BASE_URL`
    pub tre_base_url: Option<String>,

    pub base_url: Option<String>,
    pub environment_id: Option<String>,
    pub api_token: Option<String>,

    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    /// Overall deadline per request; none unless set
    pub request_timeout_ms: Option<u64>,
}

impl Config {
    /// An environment ID or API token selects the multi-tenant target;
    /// otherwise events go to the self-hosted engine.
    pub fn target(&self) -> Target {
        if self.environment_id.is_some() || self.api_token.is_some() {
            Target::Environment {
                base_url: self
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
                environment_id: self.environment_id.clone().unwrap_or_default(),
                api_token: self.api_token.clone().unwrap_or_default(),
            }
        } else {
            Target::SelfHosted {
                base_url: self
                    .tre_base_url
                    .clone()
                    .or_else(|| self.base_url.clone())
                    .unwrap_or_default(),
            }
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_millis(self.connect_timeout_ms),
            read: Duration::from_millis(self.read_timeout_ms),
            request: self.request_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Every configured timeout must be positive.
    pub fn check_timeouts(&self) -> Result<()> {
        let timeouts = [
            ("connect_timeout_ms", Some(self.connect_timeout_ms)),
            ("read_timeout_ms", Some(self.read_timeout_ms)),
            ("request_timeout_ms", self.request_timeout_ms),
        ];
        for (name, value) in timeouts {
            if value == Some(0) {
                bail!("{} must be greater than zero", name);
            }
        }
        Ok(())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = RConfig::builder()
            .set_default("connect_timeout_ms", DEFAULT_CONNECT_TIMEOUT_MS)?
            .set_default("read_timeout_ms", DEFAULT_READ_TIMEOUT_MS)?;
        Ok(builder)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).prefix_separator("_")
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config> {
        let config: Config = builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
            .context("failed to parse config")?;
        config.check_timeouts().context("invalid timeout")?;
        Ok(config)
    }

    /// Defaults overridden by `TESMON_*` environment variables.
    pub fn load_default_config() -> Result<Config> {
        Self::finish(Self::builder_with_defaults()?)
    }

    /// Like [`ConfigLoader::load_default_config`], with a TOML file layered
    /// between the defaults and the environment.
    pub fn load_config_at(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let builder = Self::builder_with_defaults()?.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(true),
        );
        Self::finish(builder).with_context(|| format!("failed to load {}", path.display()))
    }
}
