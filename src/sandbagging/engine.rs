use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::config::{DetectorThresholds, RiskBucket, RiskScoring, SandbaggingConfig};
use super::detectors::{
    detect_casual_tournament_disparity, detect_improbable_consistency, detect_low_volatility,
    detect_perfect_record, detect_tournament_excellence, RedFlag, RoundGroup, Severity,
};
use super::factors::{Effect, RangeOp};
use super::narrative::{recommendation, summary};
use crate::analysis::round::mean;
use crate::analysis::{analyze_completed_round, joint_probability_independent_rounds, sample_std_dev, AnalyzedRound};
use crate::error::{OddsError, Result};
use crate::model::{CompletedRoundScore, CourseSetup, GolferProfile, Holes, ScoreModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    pub fn from_score(score: f64, risk: &RiskScoring) -> Self {
        if score >= risk.severe_at {
            RiskLevel::Severe
        } else if score >= risk.high_at {
            RiskLevel::High
        } else if score >= risk.moderate_at {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Severe => "SEVERE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Performance", "Percentile", "Red flags"
    pub description: String, // e.g. "-3.0 strokes, matched '<-2.0' -> +40"
    pub before: f64,         // Score before this factor
    pub after: f64,          // Score after this factor
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub score: f64,
    pub level: RiskLevel,
    pub breakdown: ScoreBreakdown,
}

/// Measurements the risk score is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    /// Average strokes vs expected; negative is better.
    pub avg_vs_expected: f64,
    pub avg_percentile: f64,
    /// `None` when there are too few rounds to measure spread.
    pub volatility_ratio: Option<f64>,
    pub num_flags: usize,
    pub critical_flags: usize,
}

/// Additive risk score from the configured point tiers, capped at
/// `max_score`.
pub fn calculate_risk_score(inputs: &RiskInputs, risk: &RiskScoring) -> RiskScoreResult {
    let base_score = 0.0;
    let mut score = base_score;
    let mut factors = Vec::new();

    let mut bucket_factor = |label: &str, value: f64, buckets: &[RiskBucket], score: &mut f64| {
        let before = *score;
        let result = apply_bucket_effect(*score, value, buckets, |b| &b.range, |b| &b.effect);
        *score = result.score;

        // Only add contribution if a bucket matched
        if let (Some(range), Some(effect)) = (result.matched_range, result.matched_effect) {
            factors.push(FactorContribution {
                label: label.to_string(),
                description: format!("{:.2}, matched '{}' -> {}", value, range, effect),
                before,
                after: *score,
            });
        }
    };

    bucket_factor("Performance", inputs.avg_vs_expected, &risk.performance, &mut score);
    bucket_factor("Percentile", inputs.avg_percentile, &risk.percentile, &mut score);
    if let Some(ratio) = inputs.volatility_ratio {
        bucket_factor("Volatility", ratio, &risk.volatility, &mut score);
    }

    if inputs.num_flags > 0 {
        let before = score;
        score += (inputs.num_flags as f64 * risk.points_per_flag).min(risk.flag_points_cap);
        factors.push(FactorContribution {
            label: "Red flags".to_string(),
            description: format!(
                "{} flags x {} (max {})",
                inputs.num_flags, risk.points_per_flag, risk.flag_points_cap
            ),
            before,
            after: score,
        });
    }

    if inputs.critical_flags > 0 {
        let before = score;
        score += inputs.critical_flags as f64 * risk.points_per_critical_flag;
        factors.push(FactorContribution {
            label: "Critical flags".to_string(),
            description: format!("{} critical x {}", inputs.critical_flags, risk.points_per_critical_flag),
            before,
            after: score,
        });
    }

    // Cap
    let score = score.min(risk.max_score);
    RiskScoreResult {
        score,
        level: RiskLevel::from_score(score, risk),
        breakdown: ScoreBreakdown { base_score, factors },
    }
}

struct BucketResult {
    score: f64,
    matched_range: Option<String>,
    matched_effect: Option<String>,
}

fn apply_bucket_effect<T, F1, F2>(
    score: f64,
    value: f64,
    buckets: &[T],
    get_range: F1,
    get_effect: F2,
) -> BucketResult
where
    F1: Fn(&T) -> &str,
    F2: Fn(&T) -> &str,
{
    for bucket in buckets {
        let range_str = get_range(bucket);
        let effect_str = get_effect(bucket);
        if let Ok(range) = RangeOp::parse(range_str) {
            if range.matches(value) {
                if let Ok(effect) = Effect::parse(effect_str) {
                    return BucketResult {
                        score: effect.apply(score),
                        matched_range: Some(range_str.to_string()),
                        matched_effect: Some(effect_str.to_string()),
                    };
                }
            }
        }
    }
    BucketResult {
        score,
        matched_range: None,
        matched_effect: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityLabel {
    Low,
    Normal,
    High,
}

impl VolatilityLabel {
    pub fn from_ratio(ratio: f64, thresholds: &DetectorThresholds) -> Self {
        if ratio < thresholds.low_volatility_trigger_ratio {
            VolatilityLabel::Low
        } else if ratio > thresholds.high_volatility_label_ratio {
            VolatilityLabel::High
        } else {
            VolatilityLabel::Normal
        }
    }
}

/// Tournament spread against the model's 18-hole spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityComparison {
    pub actual: f64,
    pub expected: f64,
    pub ratio: f64,
    pub label: VolatilityLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasualComparison {
    pub casual: RoundGroup,
    /// Casual average minus tournament average; positive when tournament
    /// scores are lower.
    pub casual_vs_tournament_diff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandbaggingReport {
    pub golfer_name: String,
    pub handicap_index: f64,
    pub course_name: String,
    pub tournament_rounds: Vec<AnalyzedRound>,
    pub tournament: RoundGroup,
    pub tournament_avg_vs_expected: f64,
    pub tournament_avg_percentile: f64,
    pub tournament_avg_z_score: f64,
    /// Spread is 0.0 for a single tournament round.
    pub volatility: VolatilityComparison,
    pub joint_probability: f64,
    pub casual_comparison: Option<CasualComparison>,
    pub red_flags: Vec<RedFlag>,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub breakdown: ScoreBreakdown,
    pub summary: String,
    pub recommendation: String,
}

/// Score a tournament history (and optional casual history) for signs of
/// handicap manipulation.
pub fn calculate_sandbagging_risk(
    model: &ScoreModel,
    golfer: &GolferProfile,
    course: &CourseSetup,
    tournament_rounds: &[CompletedRoundScore],
    casual_rounds: Option<&[CompletedRoundScore]>,
    config: &SandbaggingConfig,
) -> Result<SandbaggingReport> {
    if tournament_rounds.is_empty() {
        return Err(OddsError::InsufficientData { needed: 1, got: 0 });
    }
    let thresholds = &config.detectors;

    let analyses = analyze_all(model, golfer, course, tournament_rounds)?;
    let tournament = round_group(&analyses);
    let num_rounds = analyses.len();

    let strokes: Vec<f64> = analyses.iter().map(|a| a.strokes_from_expected).collect();
    let percentiles: Vec<f64> = analyses.iter().map(|a| a.percentile).collect();
    let z_scores: Vec<f64> = analyses.iter().map(|a| a.z_score).collect();
    let probabilities: Vec<f64> = analyses.iter().map(|a| a.probability_at_or_below).collect();

    let avg_vs_expected = mean(&strokes).unwrap_or_default();
    let avg_percentile = mean(&percentiles).unwrap_or_default();
    let avg_z_score = mean(&z_scores).unwrap_or_default();
    let joint_probability = joint_probability_independent_rounds(&probabilities);

    // a single round has no spread, so it reads as 0.0 and trips the
    // low-volatility tiers
    let actual_scores: Vec<f64> = analyses.iter().map(|a| a.actual_score as f64).collect();
    let actual = sample_std_dev(&actual_scores);
    let expected = model.score_std(golfer.handicap_index, Holes::Eighteen)?;
    let ratio = actual / expected;
    let volatility = VolatilityComparison {
        actual,
        expected,
        ratio,
        label: VolatilityLabel::from_ratio(ratio, thresholds),
    };

    let casual_comparison = match casual_rounds {
        Some(rounds) if !rounds.is_empty() => {
            let casual = round_group(&analyze_all(model, golfer, course, rounds)?);
            Some(CasualComparison {
                casual_vs_tournament_diff: casual.average_score - tournament.average_score,
                casual,
            })
        }
        _ => None,
    };

    let red_flags: Vec<RedFlag> = [
        detect_tournament_excellence(avg_vs_expected, avg_percentile, num_rounds, thresholds),
        detect_low_volatility(volatility.actual, volatility.expected, volatility.ratio, thresholds),
        detect_improbable_consistency(joint_probability, num_rounds, thresholds),
        detect_perfect_record(&strokes, thresholds),
        casual_comparison
            .as_ref()
            .and_then(|c| detect_casual_tournament_disparity(&c.casual, &tournament, thresholds)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let critical_flags = red_flags.iter().filter(|f| f.severity == Severity::Critical).count();
    let risk = calculate_risk_score(
        &RiskInputs {
            avg_vs_expected,
            avg_percentile,
            volatility_ratio: Some(volatility.ratio),
            num_flags: red_flags.len(),
            critical_flags,
        },
        &config.risk,
    );

    debug!(
        golfer = %golfer.name,
        rounds = num_rounds,
        avg_vs_expected,
        joint_probability,
        flags = red_flags.len(),
        score = risk.score,
        level = %risk.level,
        "sandbagging risk scored"
    );

    Ok(SandbaggingReport {
        golfer_name: golfer.name.clone(),
        handicap_index: golfer.handicap_index,
        course_name: course.course_name.clone(),
        tournament_rounds: analyses,
        tournament,
        tournament_avg_vs_expected: avg_vs_expected,
        tournament_avg_percentile: avg_percentile,
        tournament_avg_z_score: avg_z_score,
        volatility,
        joint_probability,
        casual_comparison,
        red_flags,
        risk_score: risk.score,
        risk_level: risk.level,
        breakdown: risk.breakdown,
        summary: summary(risk.level, avg_vs_expected),
        recommendation: recommendation(risk.level).to_string(),
    })
}

fn analyze_all(
    model: &ScoreModel,
    golfer: &GolferProfile,
    course: &CourseSetup,
    rounds: &[CompletedRoundScore],
) -> Result<Vec<AnalyzedRound>> {
    rounds
        .iter()
        .map(|round| analyze_completed_round(model, golfer.handicap_index, course, round))
        .collect()
}

// Expected score is averaged per round so mixed 9/18-hole histories compare
// like with like.
fn round_group(analyses: &[AnalyzedRound]) -> RoundGroup {
    let scores: Vec<f64> = analyses.iter().map(|a| a.actual_score as f64).collect();
    let expected: Vec<f64> = analyses.iter().map(|a| a.expected_score).collect();
    RoundGroup {
        average_score: mean(&scores).unwrap_or_default(),
        average_expected: mean(&expected).unwrap_or_default(),
        num_rounds: analyses.len(),
    }
}
