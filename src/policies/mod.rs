pub mod arm;
pub mod epsilon_greedy;
pub mod errors;
pub mod kl;
pub mod kl_ucb;
pub mod multi_objective;
mod policy;
mod rng;
pub mod thompson_sampling;
pub mod ucb;

pub use epsilon_greedy::EpsilonGreedy;
pub use kl_ucb::KlUcb;
pub use multi_objective::{MultiObjectiveThompsonSampling, Objective};
pub use policy::{
    BatchUpdateElement, CloneBoxedMultiObjectivePolicy, CloneBoxedPolicy, MultiObjectivePolicy,
    MultiObjectivePolicyType, Policy, PolicyStats, PolicyType,
};
pub use thompson_sampling::ThompsonSampling;
pub use ucb::Ucb;
