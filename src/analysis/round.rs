use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::{check_finite, check_sigma, Result};
use crate::probability::normal::{standard_normal_cdf, CONTINUITY_CORRECTION};

// Percentile cut-offs for round tiers; a low percentile is a rare good round.
pub const EXCEPTIONAL_BELOW: f64 = 10.0;
pub const ABOVE_AVERAGE_BELOW: f64 = 30.0;
pub const AVERAGE_BELOW: f64 = 70.0;
pub const BELOW_AVERAGE_BELOW: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceTier {
    Exceptional,
    AboveAverage,
    Average,
    BelowAverage,
    Poor,
}

impl PerformanceTier {
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile < EXCEPTIONAL_BELOW {
            PerformanceTier::Exceptional
        } else if percentile < ABOVE_AVERAGE_BELOW {
            PerformanceTier::AboveAverage
        } else if percentile < AVERAGE_BELOW {
            PerformanceTier::Average
        } else if percentile < BELOW_AVERAGE_BELOW {
            PerformanceTier::BelowAverage
        } else {
            PerformanceTier::Poor
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceTier::Exceptional => "Exceptional",
            PerformanceTier::AboveAverage => "Above Average",
            PerformanceTier::Average => "Average",
            PerformanceTier::BelowAverage => "Below Average",
            PerformanceTier::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// How one played round compares to the score model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundAnalysis {
    /// `(actual - expected) / sigma`; negative means better than expected.
    pub z_score: f64,
    /// Chance of shooting this score or better.
    pub probability_at_or_below: f64,
    pub percentile: f64,
    pub descriptor: PerformanceTier,
}

pub fn analyze_round(actual_score: f64, expected_score: f64, sigma: f64) -> Result<RoundAnalysis> {
    check_finite("actual_score", actual_score)?;
    check_finite("expected_score", expected_score)?;
    check_sigma(sigma)?;

    let z_score = (actual_score - expected_score) / sigma;
    let probability_at_or_below =
        standard_normal_cdf((actual_score + CONTINUITY_CORRECTION - expected_score) / sigma);
    let percentile = probability_at_or_below * 100.0;

    Ok(RoundAnalysis {
        z_score,
        probability_at_or_below,
        percentile,
        descriptor: PerformanceTier::from_percentile(percentile),
    })
}

/// Product of per-round probabilities: the chance of this exact set of
/// outcomes or better, assuming independent rounds. This is not a
/// goodness-of-fit p-value. An empty set yields 1.0.
pub fn joint_probability_independent_rounds(probabilities: &[f64]) -> f64 {
    probabilities.iter().product()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallPerformance {
    SignificantlyBetterThanHandicap,
    BetterThanHandicap,
    ConsistentWithHandicap,
    WorseThanHandicap,
    SignificantlyWorseThanHandicap,
}

impl fmt::Display for OverallPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OverallPerformance::SignificantlyBetterThanHandicap => "Significantly better than handicap",
            OverallPerformance::BetterThanHandicap => "Better than handicap",
            OverallPerformance::ConsistentWithHandicap => "Consistent with handicap",
            OverallPerformance::WorseThanHandicap => "Worse than handicap",
            OverallPerformance::SignificantlyWorseThanHandicap => "Significantly worse than handicap",
        };
        f.write_str(label)
    }
}

/// Label a set of rounds by their average z-score.
///
/// The average is scaled by `sqrt(num_rounds)` so that a small edge held
/// over many rounds counts as much as a large one in a single round.
pub fn overall_performance_descriptor(avg_z_score: f64, num_rounds: usize) -> OverallPerformance {
    let evidence = avg_z_score * (num_rounds.max(1) as f64).sqrt();
    if evidence <= -2.0 {
        OverallPerformance::SignificantlyBetterThanHandicap
    } else if evidence <= -1.0 {
        OverallPerformance::BetterThanHandicap
    } else if evidence < 1.0 {
        OverallPerformance::ConsistentWithHandicap
    } else if evidence < 2.0 {
        OverallPerformance::WorseThanHandicap
    } else {
        OverallPerformance::SignificantlyWorseThanHandicap
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1 denominator); 0.0 with fewer than two
/// values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        warn!(samples = values.len(), "fewer than two samples, volatility reported as 0.0");
        return 0.0;
    }
    let Some(avg) = mean(values) else {
        return 0.0;
    };
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_at_expected() {
        let analysis = analyze_round(90.0, 90.0, 5.0).unwrap();
        assert_eq!(analysis.z_score, 0.0);
        // continuity correction nudges above 50
        assert!(analysis.percentile > 50.0 && analysis.percentile < 54.0);
        assert_eq!(analysis.descriptor, PerformanceTier::Average);
    }

    #[test]
    fn test_great_round() {
        let analysis = analyze_round(80.0, 90.0, 5.0).unwrap();
        assert_eq!(analysis.z_score, -2.0);
        assert!(analysis.probability_at_or_below < 0.05);
        assert_eq!(analysis.descriptor, PerformanceTier::Exceptional);
    }

    #[test]
    fn test_bad_round() {
        let analysis = analyze_round(100.0, 90.0, 5.0).unwrap();
        assert_eq!(analysis.descriptor, PerformanceTier::Poor);
    }

    #[test]
    fn test_zero_sigma_rejected() {
        assert!(analyze_round(90.0, 90.0, 0.0).is_err());
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(PerformanceTier::from_percentile(9.99), PerformanceTier::Exceptional);
        assert_eq!(PerformanceTier::from_percentile(10.0), PerformanceTier::AboveAverage);
        assert_eq!(PerformanceTier::from_percentile(69.9), PerformanceTier::Average);
        assert_eq!(PerformanceTier::from_percentile(89.9), PerformanceTier::BelowAverage);
        assert_eq!(PerformanceTier::from_percentile(95.0), PerformanceTier::Poor);
        assert_eq!(PerformanceTier::AboveAverage.to_string(), "Above Average");
    }

    #[test]
    fn test_joint_probability() {
        assert_eq!(joint_probability_independent_rounds(&[]), 1.0);
        assert_eq!(joint_probability_independent_rounds(&[0.5, 0.5]), 0.25);
    }

    #[test]
    fn test_overall_descriptor_uses_sample_size() {
        assert_eq!(
            overall_performance_descriptor(-0.6, 1),
            OverallPerformance::ConsistentWithHandicap
        );
        assert_eq!(
            overall_performance_descriptor(-0.6, 12),
            OverallPerformance::SignificantlyBetterThanHandicap
        );
        assert_eq!(
            overall_performance_descriptor(1.5, 1),
            OverallPerformance::WorseThanHandicap
        );
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[88.0]), 0.0);
        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.138_089_935).abs() < 1e-8);
    }
}
