use super::errors::PolicyError;

use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub mean_reward: f64,
}

/// Running mean of the rewards observed for one arm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanArm {
    pulls: u64,
    mean_reward: f64,
}

impl MeanArm {
    pub fn pulls(&self) -> u64 {
        self.pulls
    }

    pub fn mean_reward(&self) -> f64 {
        self.mean_reward
    }

    pub fn update(&mut self, reward: f64) {
        self.pulls += 1;
        self.mean_reward += (reward - self.mean_reward) / (self.pulls as f64);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.pulls,
            mean_reward: self.mean_reward,
        }
    }
}

/// Success and failure counts of a Bernoulli arm under a uniform Beta(1, 1) prior.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BetaArm {
    successes: u64,
    failures: u64,
}

impl BetaArm {
    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    fn alpha(&self) -> f64 {
        self.successes as f64 + 1.0
    }

    fn beta(&self) -> f64 {
        self.failures as f64 + 1.0
    }

    // any non-zero reward counts as a success
    pub fn update(&mut self, reward: f64) {
        if reward != 0.0 {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, PolicyError> {
        let s = Beta::new(self.alpha(), self.beta())
            .map_err(|e| PolicyError::SamplingError(e.to_string()))?
            .sample(rng);

        Ok(s)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Observed success rate, zero before the first pull.
    pub fn stats(&self) -> ArmStats {
        let pulls = self.successes + self.failures;
        let mean_reward = if pulls == 0 {
            0.0
        } else {
            self.successes as f64 / pulls as f64
        };

        ArmStats { pulls, mean_reward }
    }
}
