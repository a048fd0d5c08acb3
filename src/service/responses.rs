use serde::{Deserialize, Serialize};

use crate::analysis::CompletedRoundsReport;
use crate::sandbagging::{FactorContribution, RedFlag, RiskLevel, SandbaggingReport, VolatilityLabel};

/// All values are full precision; rounding for display is left to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionType {
    NormalApproximation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleRoundResponse {
    pub expected_score: f64,
    pub score_std: f64,
    pub target_score: u32,
    pub probability_score_at_or_below_target: f64,
    pub distribution_type: DistributionType,
    pub z_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRoundResponse {
    pub expected_score: f64,
    pub score_std: f64,
    pub target_score: u32,
    pub num_rounds: u32,
    pub min_success_rounds: u32,
    pub probability_at_least_min_success_rounds: f64,
    pub probability_at_least_once: f64,
    pub single_round_probability: f64,
    pub binomial_model_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneResult {
    pub target_score: u32,
    pub prob_single_round_at_or_below: f64,
    pub prob_at_least_once_in_event: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneResponse {
    pub expected_score: f64,
    pub score_std: f64,
    pub num_rounds: u32,
    pub milestones: Vec<MilestoneResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsecutiveResponse {
    pub expected_score: f64,
    pub score_std: f64,
    pub target_score: u32,
    pub consecutive_count: u32,
    pub holes_per_round: u8,
    pub single_round_probability: f64,
    pub probability_all_consecutive: f64,
    pub total_matches: Option<u32>,
    pub probability_streak_in_matches: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSingleRoundResponse {
    pub target_net_score: u32,
    pub handicap_allowance_percent: f64,
    pub player_a_net_expected_score: f64,
    pub player_b_net_expected_score: f64,
    pub expected_team_bestball_score_single_round: f64,
    pub std_team_bestball_score_single_round: f64,
    pub probability_net_bestball_at_or_below_target_single_round: f64,
    pub standard_error: f64,
    pub closed_form_expected_score: f64,
    pub num_simulations_used: u32,
    pub seed: u64,
    pub approximation_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMultiRoundResponse {
    pub target_net_score: u32,
    pub handicap_allowance_percent: f64,
    pub num_rounds: u32,
    pub min_success_rounds: u32,
    pub probability_net_bestball_at_or_below_target_single_round: f64,
    pub probability_at_least_once_in_event: f64,
    pub probability_at_least_min_success_rounds: f64,
    pub consecutive_count: Option<u32>,
    pub probability_streak_in_event: Option<f64>,
    pub expected_team_bestball_score_single_round: f64,
    pub std_team_bestball_score_single_round: f64,
    pub num_simulations_used: u32,
    pub seed: u64,
    pub approximation_notes: String,
}

pub type CompletedRoundsResponse = CompletedRoundsReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandbaggingResponse {
    pub golfer_name: String,
    pub handicap_index: f64,
    pub sandbagging_risk_score: f64,
    pub risk_level: RiskLevel,
    pub tournament_avg_score: f64,
    pub tournament_avg_vs_expected: f64,
    pub tournament_performance_percentile: f64,
    /// Sample standard deviation of tournament scores; 0.0 for one round.
    pub score_volatility: f64,
    pub volatility_vs_expected: VolatilityLabel,
    pub red_flags: Vec<RedFlag>,
    pub has_casual_comparison: bool,
    pub casual_vs_tournament_diff: Option<f64>,
    pub probability_all_tournament_scores: f64,
    pub score_breakdown: Vec<FactorContribution>,
    pub summary: String,
    pub recommendation: String,
}

impl From<SandbaggingReport> for SandbaggingResponse {
    fn from(report: SandbaggingReport) -> Self {
        Self {
            golfer_name: report.golfer_name,
            handicap_index: report.handicap_index,
            sandbagging_risk_score: report.risk_score,
            risk_level: report.risk_level,
            tournament_avg_score: report.tournament.average_score,
            tournament_avg_vs_expected: report.tournament_avg_vs_expected,
            tournament_performance_percentile: report.tournament_avg_percentile,
            score_volatility: report.volatility.actual,
            volatility_vs_expected: report.volatility.label,
            red_flags: report.red_flags,
            has_casual_comparison: report.casual_comparison.is_some(),
            casual_vs_tournament_diff: report.casual_comparison.map(|c| c.casual_vs_tournament_diff),
            probability_all_tournament_scores: report.joint_probability,
            score_breakdown: report.breakdown.factors,
            summary: report.summary,
            recommendation: report.recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_type_wire_name() {
        let json = serde_json::to_string(&DistributionType::NormalApproximation).unwrap();
        assert_eq!(json, "\"normal_approximation\"");
    }

    #[test]
    fn test_risk_level_wire_name() {
        assert_eq!(serde_json::to_string(&RiskLevel::Moderate).unwrap(), "\"MODERATE\"");
    }
}
