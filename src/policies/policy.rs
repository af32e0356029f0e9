use super::arm::ArmStats;
use super::epsilon_greedy::{EpsilonGreedy, DEFAULT_EPSILON};
use super::errors::PolicyError;
use super::kl_ucb::{KlUcb, DEFAULT_C};
use super::multi_objective::{MultiObjectiveThompsonSampling, Objective};
use super::thompson_sampling::ThompsonSampling;
use super::ucb::{Ucb, DEFAULT_ALPHA};

use serde::{Deserialize, Serialize};
use tracing::warn;

pub type BatchUpdateElement = (usize, f64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyStats {
    pub arms: Vec<ArmStats>,
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_c() -> f64 {
    DEFAULT_C
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    EpsilonGreedy {
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
    Ucb {
        #[serde(default = "default_alpha")]
        alpha: f64,
    },
    KlUcb {
        #[serde(default = "default_c")]
        c: f64,
    },
    ThompsonSampling {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl PolicyType {
    pub fn build(&self, num_arms: usize, horizon: u64) -> Result<Box<dyn Policy>, PolicyError> {
        let policy: Box<dyn Policy> = match *self {
            PolicyType::EpsilonGreedy { epsilon, seed } => {
                Box::new(EpsilonGreedy::new(num_arms, horizon, epsilon, seed)?)
            }
            PolicyType::Ucb { alpha } => Box::new(Ucb::new(num_arms, horizon, alpha)?),
            PolicyType::KlUcb { c } => Box::new(KlUcb::new(num_arms, horizon, c)?),
            PolicyType::ThompsonSampling { seed } => {
                Box::new(ThompsonSampling::new(num_arms, horizon, seed)?)
            }
        };

        Ok(policy)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiObjectivePolicyType {
    ThompsonSampling {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl MultiObjectivePolicyType {
    pub fn build(
        &self,
        num_arms: usize,
        horizon: u64,
    ) -> Result<Box<dyn MultiObjectivePolicy>, PolicyError> {
        let policy: Box<dyn MultiObjectivePolicy> = match *self {
            MultiObjectivePolicyType::ThompsonSampling { seed } => Box::new(
                MultiObjectiveThompsonSampling::new(num_arms, horizon, seed)?,
            ),
        };

        Ok(policy)
    }
}

impl Clone for Box<dyn Policy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub trait CloneBoxedPolicy {
    fn clone_box(&self) -> Box<dyn Policy>;
}

/// Single-objective arm selection rule.
///
/// A caller drives a policy one round at a time: `select` picks an arm, the
/// reward observed for that arm is then reported through `update`. Arms are
/// the indices `0..num_arms()`.
#[typetag::serde(tag = "type")]
pub trait Policy: Send + CloneBoxedPolicy {
    fn policy_type(&self) -> PolicyType;
    fn num_arms(&self) -> usize;
    /// Number of rounds the policy is expected to run for. Informational only.
    fn horizon(&self) -> u64;
    /// Drop every observation while keeping the configuration.
    fn reset(&mut self);
    fn select(&mut self) -> Result<usize, PolicyError>;
    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError>;
    fn stats(&self) -> PolicyStats;

    /// Apply several updates in order. Nothing is applied if any arm is out of range.
    fn update_batch(&mut self, updates: &[BatchUpdateElement]) -> Result<(), PolicyError> {
        if let Some(&(arm_id, _)) = updates
            .iter()
            .find(|(arm_id, _)| *arm_id >= self.num_arms())
        {
            return Err(PolicyError::ArmNotFound(arm_id));
        }

        updates
            .iter()
            .try_for_each(|&(arm_id, reward)| self.update(arm_id, reward))
    }
}

impl Clone for Box<dyn MultiObjectivePolicy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub trait CloneBoxedMultiObjectivePolicy {
    fn clone_box(&self) -> Box<dyn MultiObjectivePolicy>;
}

/// Arm selection rule balancing two reward streams.
///
/// Same round trip as [`Policy`], except that each reward is reported together
/// with the stream it was observed on (`set_pulled`, 0 or 1). Which stream is
/// active on a round is decided by the caller.
#[typetag::serde(tag = "type")]
pub trait MultiObjectivePolicy: Send + CloneBoxedMultiObjectivePolicy {
    fn policy_type(&self) -> MultiObjectivePolicyType;
    fn num_arms(&self) -> usize;
    fn horizon(&self) -> u64;
    fn reset(&mut self);
    fn select(&mut self) -> Result<usize, PolicyError>;
    fn update(&mut self, arm_id: usize, set_pulled: usize, reward: f64)
        -> Result<(), PolicyError>;
    fn stats(&self, objective: Objective) -> PolicyStats;
}

pub(crate) fn check_dimensions(num_arms: usize, horizon: u64) -> Result<(), PolicyError> {
    if num_arms == 0 {
        return Err(PolicyError::NoArms);
    }
    if horizon == 0 {
        return Err(PolicyError::InvalidHorizon);
    }
    Ok(())
}

pub(crate) fn check_arm(num_arms: usize, arm_id: usize) -> Result<(), PolicyError> {
    if arm_id < num_arms {
        Ok(())
    } else {
        warn!(arm_id, num_arms, "Rejected update for unknown arm");
        Err(PolicyError::ArmNotFound(arm_id))
    }
}

/// Index of the first maximum, NaN ranking below every number.
pub(crate) fn argmax<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (arm_id, value) in values.into_iter().enumerate() {
        let value = if value.is_nan() {
            f64::NEG_INFINITY
        } else {
            value
        };
        if best.map_or(true, |(_, current)| value > current) {
            best = Some((arm_id, value));
        }
    }
    best.map(|(arm_id, _)| arm_id)
}
