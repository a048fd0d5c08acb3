use serde::{Deserialize, Serialize};

// Tournament excellence: average strokes vs expected and average percentile.
pub const EXCELLENCE_TRIGGER_STROKES: f64 = -0.5;
pub const EXCELLENCE_MEDIUM_STROKES: f64 = -1.0;
pub const EXCELLENCE_MEDIUM_PERCENTILE: f64 = 30.0;
pub const EXCELLENCE_HIGH_STROKES: f64 = -1.5;
pub const EXCELLENCE_HIGH_PERCENTILE: f64 = 20.0;
pub const EXCELLENCE_CRITICAL_STROKES: f64 = -2.5;
pub const EXCELLENCE_CRITICAL_PERCENTILE: f64 = 10.0;

// Actual / expected standard deviation.
pub const LOW_VOLATILITY_TRIGGER_RATIO: f64 = 0.7;
pub const LOW_VOLATILITY_HIGH_RATIO: f64 = 0.5;
pub const HIGH_VOLATILITY_LABEL_RATIO: f64 = 1.3;

// Joint probability of the tournament history.
pub const IMPROBABLE_MEDIUM_PROBABILITY: f64 = 0.01;
pub const IMPROBABLE_HIGH_PROBABILITY: f64 = 0.001;
pub const IMPROBABLE_CRITICAL_PROBABILITY: f64 = 0.0001;

pub const PERFECT_RECORD_MEDIUM_ROUNDS: usize = 3;
pub const PERFECT_RECORD_HIGH_ROUNDS: usize = 5;

// Strokes of casual-vs-tournament disparity.
pub const DISPARITY_MEDIUM_STROKES: f64 = 2.0;
pub const DISPARITY_HIGH_STROKES: f64 = 3.5;
pub const DISPARITY_CRITICAL_STROKES: f64 = 5.0;

pub const POINTS_PER_FLAG: f64 = 3.0;
pub const FLAG_POINTS_CAP: f64 = 15.0;
pub const POINTS_PER_CRITICAL_FLAG: f64 = 10.0;
pub const MAX_RISK_SCORE: f64 = 100.0;

pub const SEVERE_RISK_AT: f64 = 75.0;
pub const HIGH_RISK_AT: f64 = 50.0;
pub const MODERATE_RISK_AT: f64 = 25.0;

pub const PERFORMANCE_BUCKETS: [(&str, &str); 4] =
    [("<-2.0", "+40"), ("<-1.0", "+30"), ("<-0.5", "+20"), ("<0", "+10")];
pub const PERCENTILE_BUCKETS: [(&str, &str); 4] =
    [("<5", "+25"), ("<15", "+20"), ("<25", "+15"), ("<40", "+10")];
pub const VOLATILITY_BUCKETS: [(&str, &str); 3] = [("<0.5", "+20"), ("<0.7", "+15"), ("<0.9", "+10")];

/// Sandbagging configuration.
///
/// Example YAML:
/// ```yaml
/// sandbagging:
///   risk:
///     performance:
///       - { range: "<-2.0", effect: "+40" }
///       - { range: "<0", effect: "+10" }
///     severe_at: 80
///   detectors:
///     improbable_critical_probability: 0.00005
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SandbaggingConfig {
    pub risk: RiskScoring,
    pub detectors: DetectorThresholds,
}

/// Risk-score point allocation.
///
/// Each bucket list is checked in order and the first matching range wins.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RiskScoring {
    /// Keyed on average strokes vs expected (negative is better).
    pub performance: Vec<RiskBucket>,
    /// Keyed on average tournament percentile.
    pub percentile: Vec<RiskBucket>,
    /// Keyed on actual / expected volatility.
    pub volatility: Vec<RiskBucket>,
    pub points_per_flag: f64,
    pub flag_points_cap: f64,
    pub points_per_critical_flag: f64,
    pub max_score: f64,
    pub severe_at: f64,
    pub high_at: f64,
    pub moderate_at: f64,
}

impl Default for RiskScoring {
    fn default() -> Self {
        Self {
            performance: buckets(&PERFORMANCE_BUCKETS),
            percentile: buckets(&PERCENTILE_BUCKETS),
            volatility: buckets(&VOLATILITY_BUCKETS),
            points_per_flag: POINTS_PER_FLAG,
            flag_points_cap: FLAG_POINTS_CAP,
            points_per_critical_flag: POINTS_PER_CRITICAL_FLAG,
            max_score: MAX_RISK_SCORE,
            severe_at: SEVERE_RISK_AT,
            high_at: HIGH_RISK_AT,
            moderate_at: MODERATE_RISK_AT,
        }
    }
}

/// Maps a range of a measured value to a change in risk score.
/// Range format: "<N", "<=N", ">N", ">=N", "N..M" (inclusive range)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RiskBucket {
    /// Range expression (e.g., "<-2.0", ">=0.9", "0.5..0.7")
    pub range: String,

    /// Effect on score (e.g., "+40", "x1.5")
    pub effect: String,
}

fn buckets(table: &[(&str, &str)]) -> Vec<RiskBucket> {
    table
        .iter()
        .map(|(range, effect)| RiskBucket {
            range: range.to_string(),
            effect: effect.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorThresholds {
    pub excellence_trigger_strokes: f64,
    pub excellence_medium_strokes: f64,
    pub excellence_medium_percentile: f64,
    pub excellence_high_strokes: f64,
    pub excellence_high_percentile: f64,
    pub excellence_critical_strokes: f64,
    pub excellence_critical_percentile: f64,
    pub low_volatility_trigger_ratio: f64,
    pub low_volatility_high_ratio: f64,
    /// Ratios above this are labelled HIGH volatility.
    pub high_volatility_label_ratio: f64,
    pub improbable_medium_probability: f64,
    pub improbable_high_probability: f64,
    pub improbable_critical_probability: f64,
    pub perfect_record_medium_rounds: usize,
    pub perfect_record_high_rounds: usize,
    pub disparity_medium_strokes: f64,
    pub disparity_high_strokes: f64,
    pub disparity_critical_strokes: f64,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            excellence_trigger_strokes: EXCELLENCE_TRIGGER_STROKES,
            excellence_medium_strokes: EXCELLENCE_MEDIUM_STROKES,
            excellence_medium_percentile: EXCELLENCE_MEDIUM_PERCENTILE,
            excellence_high_strokes: EXCELLENCE_HIGH_STROKES,
            excellence_high_percentile: EXCELLENCE_HIGH_PERCENTILE,
            excellence_critical_strokes: EXCELLENCE_CRITICAL_STROKES,
            excellence_critical_percentile: EXCELLENCE_CRITICAL_PERCENTILE,
            low_volatility_trigger_ratio: LOW_VOLATILITY_TRIGGER_RATIO,
            low_volatility_high_ratio: LOW_VOLATILITY_HIGH_RATIO,
            high_volatility_label_ratio: HIGH_VOLATILITY_LABEL_RATIO,
            improbable_medium_probability: IMPROBABLE_MEDIUM_PROBABILITY,
            improbable_high_probability: IMPROBABLE_HIGH_PROBABILITY,
            improbable_critical_probability: IMPROBABLE_CRITICAL_PROBABILITY,
            perfect_record_medium_rounds: PERFECT_RECORD_MEDIUM_ROUNDS,
            perfect_record_high_rounds: PERFECT_RECORD_HIGH_ROUNDS,
            disparity_medium_strokes: DISPARITY_MEDIUM_STROKES,
            disparity_high_strokes: DISPARITY_HIGH_STROKES,
            disparity_critical_strokes: DISPARITY_CRITICAL_STROKES,
        }
    }
}
