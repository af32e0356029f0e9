use crate::policies::errors::PolicyError;

use config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BanditError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
