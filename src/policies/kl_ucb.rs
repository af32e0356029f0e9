use super::arm::MeanArm;
use super::errors::PolicyError;
use super::kl::find_q;
use super::policy::{
    argmax, check_arm, check_dimensions, CloneBoxedPolicy, Policy, PolicyStats, PolicyType,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub const DEFAULT_C: f64 = 0.0;

/// KL-UCB for rewards bounded in `[0, 1]`.
///
/// Each arm is scored by the largest mean `q` whose Bernoulli divergence from
/// the empirical mean stays within `(ln t + c ln ln t) / pulls`. Rewards
/// outside `[0, 1]` push the empirical mean out of the divergence's domain and
/// are not rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KlUcb {
    arms: Vec<MeanArm>,
    c: f64,
    horizon: u64,
    time_step: u64,
}

impl KlUcb {
    pub fn new(num_arms: usize, horizon: u64, c: f64) -> Result<Self, PolicyError> {
        check_dimensions(num_arms, horizon)?;
        if !c.is_finite() || c < 0.0 {
            return Err(PolicyError::InvalidParameter {
                name: "c",
                value: c,
            });
        }
        debug!(num_arms, horizon, c, "Created KL-UCB policy");

        Ok(Self {
            arms: vec![MeanArm::default(); num_arms],
            c,
            horizon,
            time_step: 0,
        })
    }

    pub fn arms(&self) -> &[MeanArm] {
        &self.arms
    }

    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    fn exploration_budget(&self) -> f64 {
        let log_t = (self.time_step as f64).ln();
        // ln ln t is -inf at t = 1
        if self.c != 0.0 && self.time_step > 1 {
            log_t + self.c * log_t.ln()
        } else {
            log_t
        }
    }

    fn upper_bound(&self, arm: &MeanArm, budget: f64) -> f64 {
        find_q(budget / (arm.pulls() as f64), arm.mean_reward())
    }
}

impl CloneBoxedPolicy for KlUcb {
    fn clone_box(&self) -> Box<dyn Policy> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl Policy for KlUcb {
    fn policy_type(&self) -> PolicyType {
        PolicyType::KlUcb { c: self.c }
    }

    fn num_arms(&self) -> usize {
        self.arms.len()
    }

    fn horizon(&self) -> u64 {
        self.horizon
    }

    fn reset(&mut self) {
        debug!("Resetting KL-UCB policy");
        self.arms.iter_mut().for_each(MeanArm::reset);
        self.time_step = 0;
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        if let Some(arm_id) = self.arms.iter().position(|arm| arm.pulls() == 0) {
            trace!(arm_id, "Pulling unexplored arm");
            return Ok(arm_id);
        }

        let budget = self.exploration_budget();
        argmax(self.arms.iter().map(|arm| self.upper_bound(arm, budget)))
            .ok_or(PolicyError::NoArms)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        check_arm(self.arms.len(), arm_id)?;
        trace!(arm_id, reward, time_step = self.time_step, "Updating arm");
        self.arms[arm_id].update(reward);
        self.time_step += 1;

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self.arms.iter().map(MeanArm::stats).collect(),
        }
    }
}
