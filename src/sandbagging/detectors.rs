use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::DetectorThresholds;
use crate::analysis::round::mean;
use crate::probability::standard_normal_cdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagType {
    TournamentExcellence,
    LowVolatility,
    ImprobableConsistency,
    PerfectTournamentRecord,
    CasualTournamentDisparity,
}

/// One suspicious pattern found in a score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    pub flag_type: FlagType,
    pub severity: Severity,
    pub description: String,
    pub evidence: String,
    pub probability_note: Option<String>,
}

impl RedFlag {
    fn new(flag_type: FlagType, severity: Severity, description: impl Into<String>, evidence: String) -> Self {
        Self {
            flag_type,
            severity,
            description: description.into(),
            evidence,
            probability_note: None,
        }
    }

    fn with_note(mut self, note: impl Into<String>) -> Self {
        self.probability_note = Some(note.into());
        self
    }
}

/// Tournament rounds consistently beating the handicap.
///
/// `avg_vs_expected` is in strokes (negative is better); severity rises as
/// it falls past each stroke threshold while the average percentile stays
/// under the matching percentile threshold.
pub fn detect_tournament_excellence(
    avg_vs_expected: f64,
    avg_percentile: f64,
    num_rounds: usize,
    thresholds: &DetectorThresholds,
) -> Option<RedFlag> {
    if avg_vs_expected >= thresholds.excellence_trigger_strokes {
        return None;
    }

    let strokes_better = avg_vs_expected.abs();
    let chance = standard_normal_cdf(avg_vs_expected) * 100.0;

    if avg_vs_expected <= thresholds.excellence_critical_strokes
        && avg_percentile < thresholds.excellence_critical_percentile
    {
        Some(
            RedFlag::new(
                FlagType::TournamentExcellence,
                Severity::Critical,
                "Exceptionally consistent tournament performance far exceeds handicap",
                format!(
                    "Averages {:.1} strokes better than expected in {} tournaments (top {:.1}%)",
                    strokes_better, num_rounds, avg_percentile
                ),
            )
            .with_note(format!(
                "Probability of this consistent excellence: {:.2}% - Highly unusual",
                chance
            )),
        )
    } else if avg_vs_expected <= thresholds.excellence_high_strokes
        && avg_percentile < thresholds.excellence_high_percentile
    {
        Some(
            RedFlag::new(
                FlagType::TournamentExcellence,
                Severity::High,
                "Strong tournament performance consistently exceeds handicap",
                format!(
                    "Averages {:.1} strokes better than expected in {} tournaments (top {:.1}%)",
                    strokes_better, num_rounds, avg_percentile
                ),
            )
            .with_note(format!("Probability of this performance: {:.2}%", chance)),
        )
    } else if avg_vs_expected <= thresholds.excellence_medium_strokes
        && avg_percentile < thresholds.excellence_medium_percentile
    {
        Some(RedFlag::new(
            FlagType::TournamentExcellence,
            Severity::Medium,
            "Tournament performance notably better than expected",
            format!(
                "Averages {:.1} strokes better than expected in {} tournaments",
                strokes_better, num_rounds
            ),
        ))
    } else {
        None
    }
}

/// Scores spread much less than the model predicts for this handicap.
pub fn detect_low_volatility(
    actual_volatility: f64,
    expected_volatility: f64,
    volatility_ratio: f64,
    thresholds: &DetectorThresholds,
) -> Option<RedFlag> {
    if volatility_ratio >= thresholds.low_volatility_trigger_ratio {
        return None;
    }

    let evidence = format!(
        "Score volatility ({:.1}) is {:.0}% lower than expected ({:.1})",
        actual_volatility,
        (1.0 - volatility_ratio) * 100.0,
        expected_volatility
    );

    if volatility_ratio < thresholds.low_volatility_high_ratio {
        Some(
            RedFlag::new(
                FlagType::LowVolatility,
                Severity::High,
                "Unusually consistent scoring pattern",
                evidence,
            )
            .with_note("Consistent excellence suggests possible handicap inflation"),
        )
    } else {
        Some(RedFlag::new(
            FlagType::LowVolatility,
            Severity::Medium,
            "Lower than expected scoring variance",
            evidence,
        ))
    }
}

/// The whole tournament history is jointly too good to be likely.
pub fn detect_improbable_consistency(
    joint_probability: f64,
    num_rounds: usize,
    thresholds: &DetectorThresholds,
) -> Option<RedFlag> {
    if joint_probability >= thresholds.improbable_medium_probability {
        return None;
    }

    let percent = joint_probability * 100.0;
    if joint_probability < thresholds.improbable_critical_probability {
        Some(
            RedFlag::new(
                FlagType::ImprobableConsistency,
                Severity::Critical,
                "Statistically improbable consistent excellence",
                format!(
                    "Combined probability of all {} tournament performances: {:.4}%",
                    num_rounds, percent
                ),
            )
            .with_note("This level of consistent excellence is extremely rare - less than 1 in 10,000 golfers"),
        )
    } else if joint_probability < thresholds.improbable_high_probability {
        Some(
            RedFlag::new(
                FlagType::ImprobableConsistency,
                Severity::High,
                "Highly improbable performance consistency",
                format!(
                    "Combined probability of all {} tournament performances: {:.3}%",
                    num_rounds, percent
                ),
            )
            .with_note("This level of excellence is very rare"),
        )
    } else {
        Some(RedFlag::new(
            FlagType::ImprobableConsistency,
            Severity::Medium,
            "Unlikely performance consistency",
            format!(
                "Combined probability of all {} tournament performances: {:.2}%",
                num_rounds, percent
            ),
        ))
    }
}

/// Every tournament round beat its expected score.
///
/// `strokes_vs_expected` holds one entry per round, negative when the round
/// beat expectation. Each round is treated as a coin flip, so the chance of
/// a perfect record is `0.5^n`.
pub fn detect_perfect_record(strokes_vs_expected: &[f64], thresholds: &DetectorThresholds) -> Option<RedFlag> {
    let num_rounds = strokes_vs_expected.len();
    if num_rounds < thresholds.perfect_record_medium_rounds || strokes_vs_expected.iter().any(|s| *s >= 0.0) {
        return None;
    }

    if num_rounds >= thresholds.perfect_record_high_rounds {
        let avg_better = mean(strokes_vs_expected).unwrap_or_default().abs();
        let probability = 0.5f64.powi(num_rounds as i32);
        Some(
            RedFlag::new(
                FlagType::PerfectTournamentRecord,
                Severity::High,
                format!("Every single tournament round ({}) exceeded expectations", num_rounds),
                format!(
                    "All {} rounds beat expected score by average of {:.1} strokes",
                    num_rounds, avg_better
                ),
            )
            .with_note(format!(
                "Probability of this: {:.3}% (1 in {})",
                probability * 100.0,
                (1.0 / probability).round()
            )),
        )
    } else {
        Some(RedFlag::new(
            FlagType::PerfectTournamentRecord,
            Severity::Medium,
            format!("All {} tournament rounds exceeded expectations", num_rounds),
            "Perfect record of beating expected score".to_string(),
        ))
    }
}

/// Averages for one group of rounds (casual or tournament).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundGroup {
    pub average_score: f64,
    pub average_expected: f64,
    pub num_rounds: usize,
}

impl RoundGroup {
    /// Strokes vs expected; negative is better.
    pub fn vs_expected(&self) -> f64 {
        self.average_score - self.average_expected
    }
}

/// Worse than expected in casual rounds while better than expected in
/// tournaments.
pub fn detect_casual_tournament_disparity(
    casual: &RoundGroup,
    tournament: &RoundGroup,
    thresholds: &DetectorThresholds,
) -> Option<RedFlag> {
    let casual_vs_expected = casual.vs_expected();
    let tournament_vs_expected = tournament.vs_expected();
    let disparity = casual_vs_expected - tournament_vs_expected;

    if disparity < thresholds.disparity_medium_strokes {
        return None;
    }

    let detail = format!(
        "Casual rounds avg {:+.1} vs expected, tournaments {:+.1} vs expected (difference: {:.1} strokes)",
        casual_vs_expected, tournament_vs_expected, disparity
    );
    let basis = format!(
        "Based on {} casual rounds and {} tournament rounds",
        casual.num_rounds, tournament.num_rounds
    );

    if disparity >= thresholds.disparity_critical_strokes {
        Some(
            RedFlag::new(
                FlagType::CasualTournamentDisparity,
                Severity::Critical,
                "Major performance disparity between casual and tournament play",
                detail,
            )
            .with_note(basis),
        )
    } else if disparity >= thresholds.disparity_high_strokes {
        Some(
            RedFlag::new(
                FlagType::CasualTournamentDisparity,
                Severity::High,
                "Significant performance difference between casual and competitive rounds",
                detail,
            )
            .with_note(basis),
        )
    } else {
        Some(RedFlag::new(
            FlagType::CasualTournamentDisparity,
            Severity::Medium,
            "Notable performance variance between casual and tournament play",
            format!("Performance {:.1} strokes better in tournaments than casual rounds", disparity),
        ))
    }
}
