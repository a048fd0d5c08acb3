//! Single-round, multi-round, milestone and streak probabilities.
//!
//! Rounds are treated as independent draws from the same score
//! distribution; that assumption is stated, not tested.

pub mod milestones;
pub mod normal;
pub mod rounds;
pub mod streak;

pub use milestones::standard_milestones;
pub use normal::{single_round_probability, standard_normal_cdf, SingleRoundOdds, CONTINUITY_CORRECTION};
pub use rounds::{binomial_tail, multi_round_at_least_once};
pub use streak::{probability_all_consecutive, probability_streak_within_matches};
