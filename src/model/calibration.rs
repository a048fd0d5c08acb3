use serde::{Deserialize, Serialize};

/// Tunable constants of the score model.
///
/// These are calibration choices, not rules of golf. Every field has a
/// default so a partial YAML section only overrides what it names.
///
/// Example YAML:
/// ```yaml
/// calibration:
///   score_std:
///     scratch_sigma: 2.8
///   nine_hole:
///     std_factor: 0.7
///   team_allowance_percent: 90
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelCalibration {
    pub score_std: ScoreStdCurve,
    pub nine_hole: NineHoleScaling,
    pub milestones: MilestoneConfig,
    /// Share of course handicap received in team best-ball play.
    pub team_allowance_percent: f64,
}

impl Default for ModelCalibration {
    fn default() -> Self {
        Self {
            score_std: ScoreStdCurve::default(),
            nine_hole: NineHoleScaling::default(),
            milestones: MilestoneConfig::default(),
            team_allowance_percent: 85.0,
        }
    }
}

/// 18-hole scoring spread as a function of handicap index.
///
/// Rises linearly from `scratch_sigma` until `peak_handicap`, then declines
/// gently; the result is clamped to `[min_sigma, max_sigma]`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreStdCurve {
    pub scratch_sigma: f64,
    pub sigma_per_stroke: f64,
    pub peak_handicap: f64,
    pub decline_per_stroke: f64,
    pub min_sigma: f64,
    pub max_sigma: f64,
}

impl Default for ScoreStdCurve {
    fn default() -> Self {
        Self {
            scratch_sigma: 3.0,
            sigma_per_stroke: 0.12,
            peak_handicap: 30.0,
            decline_per_stroke: 0.02,
            min_sigma: 2.0,
            max_sigma: 12.0,
        }
    }
}

/// Factors mapping 18-hole inputs onto their 9-hole equivalents.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NineHoleScaling {
    pub handicap_index_factor: f64,
    pub course_rating_factor: f64,
    pub par_factor: f64,
    pub slope_factor: f64,
    /// 9-hole sigma = 18-hole sigma x this; must stay below 1.
    pub std_factor: f64,
}

impl Default for NineHoleScaling {
    fn default() -> Self {
        Self {
            handicap_index_factor: 0.5,
            course_rating_factor: 0.5,
            par_factor: 0.5,
            slope_factor: 1.0,
            std_factor: 0.65,
        }
    }
}

/// Candidate milestone scores and the band around the expected score in
/// which they are reported.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MilestoneConfig {
    pub candidates: Vec<u32>,
    /// Strokes below the expected score still considered reachable.
    pub band_below: f64,
    /// Strokes above the expected score still considered interesting.
    pub band_above: f64,
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            candidates: vec![
                130, 120, 110, 100, 95, 90, 85, 80, 75, 72, 70, 65, 60, 55, 50, 45, 42, 40, 38,
                36, 35,
            ],
            band_below: 12.0,
            band_above: 6.0,
        }
    }
}
