use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Policy requires at least one arm")]
    NoArms,
    #[error("Horizon must be a positive number of rounds")]
    InvalidHorizon,
    #[error("Arm {0} not found")]
    ArmNotFound(usize),
    #[error("Objective {0} not found, expected 0 or 1")]
    ObjectiveNotFound(usize),
    #[error("Invalid value {value} for parameter {name}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("Error while sampling arm: {0}")]
    SamplingError(String),
}
