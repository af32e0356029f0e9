use super::arm::MeanArm;
use super::errors::PolicyError;
use super::policy::{
    argmax, check_arm, check_dimensions, CloneBoxedPolicy, Policy, PolicyStats, PolicyType,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// With this coefficient the bound is the classic `mean + sqrt(2 ln t / n)`.
pub const DEFAULT_ALPHA: f64 = 2.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ucb {
    arms: Vec<MeanArm>,
    alpha: f64,
    horizon: u64,
    time_step: u64,
}

impl Ucb {
    pub fn new(num_arms: usize, horizon: u64, alpha: f64) -> Result<Self, PolicyError> {
        check_dimensions(num_arms, horizon)?;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(PolicyError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }
        debug!(num_arms, horizon, alpha, "Created UCB policy");

        Ok(Self {
            arms: vec![MeanArm::default(); num_arms],
            alpha,
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

    fn upper_bound(&self, arm: &MeanArm) -> f64 {
        let t = self.time_step as f64;
        arm.mean_reward() + (self.alpha * t.ln() / (arm.pulls() as f64)).sqrt()
    }
}

impl CloneBoxedPolicy for Ucb {
    fn clone_box(&self) -> Box<dyn Policy> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl Policy for Ucb {
    fn policy_type(&self) -> PolicyType {
        PolicyType::Ucb { alpha: self.alpha }
    }

    fn num_arms(&self) -> usize {
        self.arms.len()
    }

    fn horizon(&self) -> u64 {
        self.horizon
    }

    fn reset(&mut self) {
        debug!("Resetting UCB policy");
        self.arms.iter_mut().for_each(MeanArm::reset);
        self.time_step = 0;
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        // every arm gets one pull before the bound is used, so ln(t) and the division are defined
        if let Some(arm_id) = self.arms.iter().position(|arm| arm.pulls() == 0) {
            trace!(arm_id, "Pulling unexplored arm");
            return Ok(arm_id);
        }

        argmax(self.arms.iter().map(|arm| self.upper_bound(arm))).ok_or(PolicyError::NoArms)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn make_policy(num_arms: usize) -> Ucb {
        Ucb::new(num_arms, 100, DEFAULT_ALPHA).unwrap()
    }

    #[test]
    fn create_invalid() {
        assert_eq!(Ucb::new(0, 100, 2.0).err(), Some(PolicyError::NoArms));
        assert_eq!(Ucb::new(2, 0, 2.0).err(), Some(PolicyError::InvalidHorizon));
        assert!(Ucb::new(2, 100, -1.0).is_err());
        assert!(Ucb::new(2, 100, f64::INFINITY).is_err());
    }

    #[test]
    fn warm_up_in_order() {
        let mut policy = make_policy(4);
        for expected in 0..4 {
            let arm_id = policy.select().unwrap();
            assert_eq!(arm_id, expected);
            policy.update(arm_id, 0.0).unwrap();
        }
    }

    #[test]
    fn warm_up_skips_pulled_arms() {
        let mut policy = make_policy(3);
        policy.update(0, 1.0).unwrap();
        policy.update(2, 1.0).unwrap();
        assert_eq!(policy.select(), Ok(1));
    }

    #[test]
    fn draw_best() {
        let mut policy = make_policy(2);
        policy.update(0, 1.0).unwrap();
        policy.update(1, 0.0).unwrap();
        assert_eq!(policy.select(), Ok(0));
    }

    #[test]
    fn bound_value() {
        let mut policy = make_policy(2);
        policy.update(0, 1.0).unwrap();
        policy.update(0, 0.0).unwrap();
        policy.update(1, 0.5).unwrap();

        let t = 3.0_f64;
        let expected = 0.5 + (2.0 * t.ln() / 2.0).sqrt();
        assert!((policy.upper_bound(&policy.arms()[0]) - expected).abs() < 1e-12);
    }

    #[test]
    fn bound_favours_less_pulled_arm() {
        let mut policy = make_policy(2);
        (0..10).for_each(|_| policy.update(0, 0.5).unwrap());
        policy.update(1, 0.5).unwrap();
        assert_eq!(policy.select(), Ok(1));
    }

    #[test]
    fn update() {
        let mut policy = make_policy(2);
        assert!(policy.update(1, 1.0).is_ok());
        assert_eq!(policy.arms()[1].mean_reward(), 1.0);
        assert_eq!(policy.time_step(), 1);
        assert_eq!(policy.update(2, 1.0), Err(PolicyError::ArmNotFound(2)));
        assert_eq!(policy.time_step(), 1);
    }

    #[test]
    fn single_arm() {
        let mut policy = make_policy(1);
        for _ in 0..5 {
            let arm_id = policy.select().unwrap();
            assert_eq!(arm_id, 0);
            policy.update(arm_id, 1.0).unwrap();
        }
    }

    #[test]
    fn reset() {
        let mut policy = make_policy(2);
        policy.update(0, 1.0).unwrap();
        policy.update(1, 1.0).unwrap();
        policy.reset();

        assert_eq!(policy.time_step(), 0);
        assert_eq!(policy.select(), Ok(0));
    }
}
