//! Detection of score histories that look too good for the stated handicap.
//!
//! Five independent detectors each raise an optional [`RedFlag`]; an
//! additive, threshold-tiered risk score then combines the tournament
//! averages with the flags. Every threshold and point tier lives in
//! [`SandbaggingConfig`].
pub mod config;
pub mod detectors;
pub mod engine;
pub mod factors;
pub mod narrative;
pub mod validation;

pub use config::*;
pub use detectors::{
    detect_casual_tournament_disparity, detect_improbable_consistency, detect_low_volatility,
    detect_perfect_record, detect_tournament_excellence, FlagType, RedFlag, RoundGroup, Severity,
};
pub use engine::{
    calculate_risk_score, calculate_sandbagging_risk, CasualComparison, FactorContribution, RiskInputs,
    RiskLevel, RiskScoreResult, SandbaggingReport, ScoreBreakdown, VolatilityComparison, VolatilityLabel,
};
pub use factors::{Effect, RangeOp};
pub use validation::validate_sandbagging;
