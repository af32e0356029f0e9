//! Multi-armed bandit policies.
//!
//! Every policy is driven one round at a time by the caller: `select` returns
//! the index of the arm to pull, and the reward observed for that arm is then
//! fed back through `update`.
//!
//! ```
//! use bandit_policies::policies::{Policy, Ucb};
//!
//! let mut policy = Ucb::new(3, 100, 2.0).unwrap();
//! for _ in 0..100 {
//!     let arm_id = policy.select().unwrap();
//!     let reward = if arm_id == 2 { 1.0 } else { 0.0 };
//!     policy.update(arm_id, reward).unwrap();
//! }
//! assert_eq!(policy.select().unwrap(), 2);
//! ```

pub mod config;
pub mod errors;
pub mod policies;

pub use config::{BanditConfig, MultiObjectiveBanditConfig};
pub use errors::BanditError;
pub use policies::errors::PolicyError;
pub use policies::{
    MultiObjectivePolicy, MultiObjectivePolicyType, Policy, PolicyStats, PolicyType,
};
