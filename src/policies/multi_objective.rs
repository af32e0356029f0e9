use super::arm::BetaArm;
use super::errors::PolicyError;
use super::policy::{
    argmax, check_arm, check_dimensions, CloneBoxedMultiObjectivePolicy, MultiObjectivePolicy,
    MultiObjectivePolicyType, PolicyStats,
};
use super::rng::MaybeSeededRng;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

/// One of the two reward streams observed for every arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    First,
    Second,
}

impl Objective {
    fn index(self) -> usize {
        match self {
            Objective::First => 0,
            Objective::Second => 1,
        }
    }
}

impl TryFrom<usize> for Objective {
    type Error = PolicyError;

    fn try_from(set_pulled: usize) -> Result<Self, Self::Error> {
        match set_pulled {
            0 => Ok(Objective::First),
            1 => Ok(Objective::Second),
            other => Err(PolicyError::ObjectiveNotFound(other)),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Thompson Sampling over two binary reward streams.
///
/// Each arm keeps an independent Beta posterior per objective. Arms are ranked
/// by the mean of one sample from each posterior. The caller decides which
/// stream a reward belongs to, the policy only records it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultiObjectiveThompsonSampling {
    objectives: [Vec<BetaArm>; 2],
    horizon: u64,
    rng: MaybeSeededRng,
}

impl MultiObjectiveThompsonSampling {
    pub fn new(num_arms: usize, horizon: u64, seed: Option<u64>) -> Result<Self, PolicyError> {
        check_dimensions(num_arms, horizon)?;
        debug!(num_arms, horizon, "Created multi-objective Thompson sampling policy");

        Ok(Self {
            objectives: [
                vec![BetaArm::default(); num_arms],
                vec![BetaArm::default(); num_arms],
            ],
            horizon,
            rng: MaybeSeededRng::new(seed),
        })
    }

    pub fn arms(&self, objective: Objective) -> &[BetaArm] {
        &self.objectives[objective.index()]
    }

    fn sample_objective(&mut self, objective: Objective) -> Result<Vec<f64>, PolicyError> {
        let rng = self.rng.get_rng();
        self.objectives[objective.index()]
            .iter()
            .map(|arm| arm.sample(&mut *rng))
            .collect()
    }
}

impl CloneBoxedMultiObjectivePolicy for MultiObjectiveThompsonSampling {
    fn clone_box(&self) -> Box<dyn MultiObjectivePolicy> {
        Box::new(self.clone())
    }
}

#[typetag::serde]
impl MultiObjectivePolicy for MultiObjectiveThompsonSampling {
    fn policy_type(&self) -> MultiObjectivePolicyType {
        MultiObjectivePolicyType::ThompsonSampling {
            seed: self.rng.seed,
        }
    }

    fn num_arms(&self) -> usize {
        self.objectives[0].len()
    }

    fn horizon(&self) -> u64 {
        self.horizon
    }

    fn reset(&mut self) {
        debug!("Resetting multi-objective Thompson sampling policy");
        self.objectives
            .iter_mut()
            .flat_map(|arms| arms.iter_mut())
            .for_each(BetaArm::reset);
        self.rng.reseed();
    }

    fn select(&mut self) -> Result<usize, PolicyError> {
        let first = self.sample_objective(Objective::First)?;
        let second = self.sample_objective(Objective::Second)?;

        argmax(first.iter().zip(&second).map(|(a, b)| (a + b) / 2.0)).ok_or(PolicyError::NoArms)
    }

    fn update(&mut self, arm_id: usize, set_pulled: usize, reward: f64) -> Result<(), PolicyError> {
        check_arm(self.num_arms(), arm_id)?;
        let objective = Objective::try_from(set_pulled).inspect_err(|_| {
            warn!(arm_id, set_pulled, "Rejected update for unknown objective");
        })?;
        trace!(arm_id, %objective, reward, "Updating arm");
        self.objectives[objective.index()][arm_id].update(reward);

        Ok(())
    }

    fn stats(&self, objective: Objective) -> PolicyStats {
        PolicyStats {
            arms: self.arms(objective).iter().map(BetaArm::stats).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const DEFAULT_SEED: Option<u64> = Some(1234);

    fn make_policy(num_arms: usize) -> MultiObjectiveThompsonSampling {
        MultiObjectiveThompsonSampling::new(num_arms, 1000, DEFAULT_SEED).unwrap()
    }

    #[test]
    fn objective_from_set() {
        assert_eq!(Objective::try_from(0usize), Ok(Objective::First));
        assert_eq!(Objective::try_from(1usize), Ok(Objective::Second));
        assert_eq!(
            Objective::try_from(2usize),
            Err(PolicyError::ObjectiveNotFound(2))
        );
    }

    #[test]
    fn create_invalid() {
        assert!(MultiObjectiveThompsonSampling::new(0, 10, None).is_err());
        assert!(MultiObjectiveThompsonSampling::new(2, 0, None).is_err());
    }

    #[test]
    fn update_selected_objective_only() {
        let mut policy = make_policy(3);
        policy.update(1, 0, 1.0).unwrap();
        policy.update(1, 0, 0.0).unwrap();
        policy.update(1, 1, 1.0).unwrap();

        let first = &policy.arms(Objective::First)[1];
        let second = &policy.arms(Objective::Second)[1];
        assert_eq!((first.successes(), first.failures()), (1, 1));
        assert_eq!((second.successes(), second.failures()), (1, 0));
        assert_eq!(policy.arms(Objective::Second)[0], BetaArm::default());
    }

    #[test]
    fn update_rejects_bad_input() {
        let mut policy = make_policy(2);
        assert_eq!(
            policy.update(0, 2, 1.0),
            Err(PolicyError::ObjectiveNotFound(2))
        );
        assert_eq!(policy.update(2, 0, 1.0), Err(PolicyError::ArmNotFound(2)));
        assert!(policy
            .arms(Objective::First)
            .iter()
            .chain(policy.arms(Objective::Second))
            .all(|arm| *arm == BetaArm::default()));
    }

    #[test]
    fn draw_in_range() {
        let mut policy = make_policy(3);
        for _ in 0..100 {
            assert!(policy.select().unwrap() < 3);
        }
    }

    #[test]
    fn draw_best_on_both_objectives() {
        let mut policy = make_policy(2);
        for set in 0..2 {
            (0..200).for_each(|_| policy.update(0, set, 1.0).unwrap());
            (0..200).for_each(|_| policy.update(1, set, 0.0).unwrap());
        }

        for _ in 0..20 {
            assert_eq!(policy.select(), Ok(0));
        }
    }

    #[test]
    fn draw_balances_objectives() {
        // arm 0 is perfect on the first stream only, arm 1 is good on both
        let mut policy = make_policy(2);
        (0..300).for_each(|_| policy.update(0, 0, 1.0).unwrap());
        (0..300).for_each(|_| policy.update(0, 1, 0.0).unwrap());
        (0..300).for_each(|i| policy.update(1, 0, (i % 10 != 0) as u8 as f64).unwrap());
        (0..300).for_each(|i| policy.update(1, 1, (i % 10 != 0) as u8 as f64).unwrap());

        for _ in 0..20 {
            assert_eq!(policy.select(), Ok(1));
        }
    }

    #[test]
    fn reset() {
        let mut policy = make_policy(2);
        policy.update(0, 1, 1.0).unwrap();
        policy.reset();
        assert_eq!(policy.stats(Objective::Second).arms[0].pulls, 0);
        assert_eq!(policy.num_arms(), 2);
    }

    #[test]
    fn reset_replays_draws() {
        let mut policy = make_policy(4);
        let fresh: Vec<usize> = (0..20).map(|_| policy.select().unwrap()).collect();

        (0..10).for_each(|_| policy.update(3, 0, 1.0).unwrap());
        (0..10).for_each(|_| policy.update(3, 1, 1.0).unwrap());
        policy.reset();
        let replayed: Vec<usize> = (0..20).map(|_| policy.select().unwrap()).collect();

        assert_eq!(replayed, fresh);
    }

    #[test]
    fn policy_type_keeps_seed() {
        assert_eq!(
            make_policy(2).policy_type(),
            MultiObjectivePolicyType::ThompsonSampling { seed: DEFAULT_SEED }
        );
    }
}
