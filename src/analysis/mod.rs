//! Statistical scoring of rounds that have already been played.

pub mod completed;
pub mod round;

pub use completed::{analyze_completed_round, analyze_completed_rounds, AnalyzedRound, CompletedRoundsReport};
pub use round::{
    analyze_round, joint_probability_independent_rounds, overall_performance_descriptor, sample_std_dev,
    OverallPerformance, PerformanceTier, RoundAnalysis,
};
