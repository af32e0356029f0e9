use crate::errors::BanditError;
use crate::policies::{MultiObjectivePolicy, MultiObjectivePolicyType, Policy, PolicyType};

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Policy settings, read from a `bandit.{toml,yaml,json}` file and `BANDIT_*`
/// environment variables.
///
/// ```toml
/// num_arms = 5
/// horizon = 10000
///
/// [policy.kl_ucb]
/// c = 0.0
/// ```
///
/// Nested keys are separated by `__` in the environment, e.g.
/// `BANDIT_POLICY__UCB__ALPHA=1.5`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct BanditConfig {
    pub num_arms: usize,
    pub horizon: u64,
    pub policy: PolicyType,
}

/// Same layout as [`BanditConfig`] for policies over two reward streams.
///
/// ```toml
/// num_arms = 5
/// horizon = 10000
///
/// [policy.thompson_sampling]
/// seed = 42
/// ```
#[derive(Debug, Deserialize, PartialEq)]
pub struct MultiObjectiveBanditConfig {
    pub num_arms: usize,
    pub horizon: u64,
    pub policy: MultiObjectivePolicyType,
}

fn environment() -> Environment {
    Environment::with_prefix("BANDIT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn default_file() -> impl Source + Send + Sync + 'static {
    File::with_name("bandit").required(false)
}

fn load<T, S>(file: S, environment: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    S: Source + Send + Sync + 'static,
{
    let builder = Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()?;

    builder.try_deserialize()
}

fn parse_toml<T: DeserializeOwned>(contents: &str) -> Result<T, ConfigError> {
    Config::builder()
        .add_source(File::from_str(contents, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

impl BanditConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load(default_file(), environment())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load(File::from(path.as_ref()), environment())
    }

    /// Parse inline TOML, without environment overrides.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        parse_toml(contents)
    }

    pub fn build_policy(&self) -> Result<Box<dyn Policy>, BanditError> {
        Ok(self.policy.build(self.num_arms, self.horizon)?)
    }
}

impl MultiObjectiveBanditConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load(default_file(), environment())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load(File::from(path.as_ref()), environment())
    }

    /// Parse inline TOML, without environment overrides.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        parse_toml(contents)
    }

    pub fn build_policy(&self) -> Result<Box<dyn MultiObjectivePolicy>, BanditError> {
        Ok(self.policy.build(self.num_arms, self.horizon)?)
    }
}

/// Load the configuration from the environment and build the policy it describes.
pub fn policy_from_env() -> Result<Box<dyn Policy>, BanditError> {
    BanditConfig::from_env()?.build_policy()
}

pub fn multi_objective_policy_from_env() -> Result<Box<dyn MultiObjectivePolicy>, BanditError> {
    MultiObjectiveBanditConfig::from_env()?.build_policy()
}
