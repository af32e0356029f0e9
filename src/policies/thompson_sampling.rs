use super::arm::BetaArm;
use super::errors::PolicyError;
use super::policy::{
    argmax, check_arm, check_dimensions, CloneBoxedPolicy, Policy, PolicyStats, PolicyType,
};
use super::rng::MaybeSeededRng;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Beta-Bernoulli Thompson Sampling. Rewards are read as binary, any non-zero
/// value being a success.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThompsonSampling {
    arms: Vec<BetaArm>,
    horizon: u64,
    rng: MaybeSeededRng,
}

impl ThompsonSampling {
    pub fn new(num_arms: usize, horizon: u64, seed: Option<u64>) -> Result<Self, PolicyError> {
        check_dimensions(num_arms, horizon)?;
        debug!(num_arms, horizon, "Created Thompson sampling policy");

        Ok(Self {
            arms: vec![BetaArm::default(); num_arms],
            horizon,
            rng: MaybeSeededRng::new(seed),
        })
    }

    pub fn arms(&self) -> &[BetaArm] {
        &self.arms
    }
}

impl CloneBoxedPolicy for ThompsonSampling {
    fn clone_box(&self) -> Box<dyn Policy> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl Policy for ThompsonSampling {
    fn policy_type(&self) -> PolicyType {
        PolicyType::ThompsonSampling {
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
        debug!("Resetting Thompson sampling policy");
        self.arms.iter_mut().for_each(BetaArm::reset);
        self.rng.reseed();
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        // sample from the beta distribution for each arm and select the arm with the best statistic
        let rng = self.rng.get_rng();
        let samples = self
            .arms
            .iter()
            .map(|arm| arm.sample(&mut *rng))
            .collect::<Result<Vec<f64>, PolicyError>>()?;

        argmax(samples).ok_or(PolicyError::NoArms)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        check_arm(self.arms.len(), arm_id)?;
        trace!(arm_id, reward, "Updating arm");
        self.arms[arm_id].update(reward);

        Ok(())
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self.arms.iter().map(BetaArm::stats).collect(),
        }
    }
}
