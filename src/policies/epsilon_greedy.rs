use super::arm::MeanArm;
use super::errors::PolicyError;
use super::policy::{
    argmax, check_arm, check_dimensions, CloneBoxedPolicy, Policy, PolicyStats, PolicyType,
};
use super::rng::MaybeSeededRng;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub const DEFAULT_EPSILON: f64 = 0.1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    arms: Vec<MeanArm>,
    epsilon: f64,
    horizon: u64,
    rng: MaybeSeededRng,
}

impl EpsilonGreedy {
    pub fn new(
        num_arms: usize,
        horizon: u64,
        epsilon: f64,
        seed: Option<u64>,
    ) -> Result<Self, PolicyError> {
        check_dimensions(num_arms, horizon)?;
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(PolicyError::InvalidParameter {
                name: "epsilon",
                value: epsilon,
            });
        }
        debug!(num_arms, horizon, epsilon, "Created epsilon-greedy policy");

        Ok(Self {
            arms: vec![MeanArm::default(); num_arms],
            epsilon,
            horizon,
            rng: MaybeSeededRng::new(seed),
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn arms(&self) -> &[MeanArm] {
        &self.arms
    }
}

impl CloneBoxedPolicy for EpsilonGreedy {
    fn clone_box(&self) -> Box<dyn Policy> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl Policy for EpsilonGreedy {
    fn policy_type(&self) -> PolicyType {
        PolicyType::EpsilonGreedy {
            epsilon: self.epsilon,
            seed: self.rng.seed,
        }
    }

    fn num_arms(&self) -> usize {
        self.arms.len()
    }

    fn horizon(&self) -> u64 {
        self.horizon
    }

    fn reset(&mut self) {
        debug!("Resetting epsilon-greedy policy");
        self.arms.iter_mut().for_each(MeanArm::reset);
        self.rng.reseed();
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        let num_arms = self.arms.len();
        let rng = self.rng.get_rng();

        let arm_id = if rng.random::<f64>() < self.epsilon {
            let arm_id = rng.random_range(0..num_arms);
            trace!(arm_id, "Exploring random arm");
            arm_id
        } else {
            argmax(self.arms.iter().map(MeanArm::mean_reward)).ok_or(PolicyError::NoArms)?
        };

        Ok(arm_id)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        check_arm(self.arms.len(), arm_id)?;
        trace!(arm_id, reward, "Updating arm");
        self.arms[arm_id].update(reward);

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self.arms.iter().map(MeanArm::stats).collect(),
        }
    }
}
