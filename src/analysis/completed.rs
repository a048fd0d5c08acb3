use serde::{Deserialize, Serialize};
use tracing::debug;

use super::round::{
    analyze_round, joint_probability_independent_rounds, mean, overall_performance_descriptor,
    OverallPerformance, PerformanceTier,
};
use crate::error::{OddsError, Result};
use crate::model::{CompletedRoundScore, CourseSetup, GolferProfile, Holes, ScoreModel};

/// A played round scored against the golfer's model for that round length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRound {
    pub round_number: u32,
    pub actual_score: u32,
    pub holes_played: Holes,
    pub expected_score: f64,
    pub sigma: f64,
    /// Negative is better than expected.
    pub strokes_from_expected: f64,
    pub z_score: f64,
    pub probability_at_or_below: f64,
    pub percentile: f64,
    pub performance_descriptor: PerformanceTier,
}

pub fn analyze_completed_round(
    model: &ScoreModel,
    handicap_index: f64,
    course: &CourseSetup,
    round: &CompletedRoundScore,
) -> Result<AnalyzedRound> {
    round.validate()?;
    let dist = model.distribution(handicap_index, course, round.holes_played)?;
    let actual = round.gross_score as f64;
    let analysis = analyze_round(actual, dist.expected_score, dist.sigma)?;

    Ok(AnalyzedRound {
        round_number: round.round_number,
        actual_score: round.gross_score,
        holes_played: round.holes_played,
        expected_score: dist.expected_score,
        sigma: dist.sigma,
        strokes_from_expected: actual - dist.expected_score,
        z_score: analysis.z_score,
        probability_at_or_below: analysis.probability_at_or_below,
        percentile: analysis.percentile,
        performance_descriptor: analysis.descriptor,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedRoundsReport {
    pub golfer_name: String,
    pub handicap_index: f64,
    pub course_name: String,
    /// 18-hole reference values for the golfer on this course.
    pub expected_score_per_round: f64,
    pub score_std: f64,
    pub num_rounds_analyzed: usize,
    pub round_analyses: Vec<AnalyzedRound>,
    pub average_actual_score: f64,
    pub total_strokes_from_expected: f64,
    pub average_z_score: f64,
    /// Joint probability of all these scores or better.
    pub overall_probability: f64,
    pub overall_performance_descriptor: OverallPerformance,
    pub best_round: AnalyzedRound,
    pub worst_round: AnalyzedRound,
}

/// Score a set of played rounds and summarise them.
///
/// Rounds may mix 9 and 18 holes; each is measured against its own model
/// and the average z-score is taken over per-round z-scores.
pub fn analyze_completed_rounds(
    model: &ScoreModel,
    golfer: &GolferProfile,
    course: &CourseSetup,
    rounds: &[CompletedRoundScore],
) -> Result<CompletedRoundsReport> {
    let analyses = rounds
        .iter()
        .map(|round| analyze_completed_round(model, golfer.handicap_index, course, round))
        .collect::<Result<Vec<_>>>()?;

    // ties go to the earliest round played
    let best_round = analyses
        .iter()
        .reduce(|best, r| if r.actual_score < best.actual_score { r } else { best })
        .cloned()
        .ok_or(OddsError::InsufficientData { needed: 1, got: 0 })?;
    let worst_round = analyses
        .iter()
        .reduce(|worst, r| if r.actual_score > worst.actual_score { r } else { worst })
        .cloned()
        .ok_or(OddsError::InsufficientData { needed: 1, got: 0 })?;

    let reference = model.distribution(golfer.handicap_index, course, Holes::Eighteen)?;
    let actual: Vec<f64> = analyses.iter().map(|a| a.actual_score as f64).collect();
    let z_scores: Vec<f64> = analyses.iter().map(|a| a.z_score).collect();
    let probabilities: Vec<f64> = analyses.iter().map(|a| a.probability_at_or_below).collect();

    let average_actual_score = mean(&actual).unwrap_or_default();
    let average_z_score = mean(&z_scores).unwrap_or_default();
    let total_strokes_from_expected: f64 = analyses.iter().map(|a| a.strokes_from_expected).sum();
    let overall_probability = joint_probability_independent_rounds(&probabilities);

    debug!(
        golfer = %golfer.name,
        rounds = analyses.len(),
        average_actual_score,
        overall_probability,
        "completed rounds analysed"
    );

    Ok(CompletedRoundsReport {
        golfer_name: golfer.name.clone(),
        handicap_index: golfer.handicap_index,
        course_name: course.course_name.clone(),
        expected_score_per_round: reference.expected_score,
        score_std: reference.sigma,
        num_rounds_analyzed: analyses.len(),
        average_actual_score,
        total_strokes_from_expected,
        average_z_score,
        overall_probability,
        overall_performance_descriptor: overall_performance_descriptor(average_z_score, analyses.len()),
        best_round,
        worst_round,
        round_analyses: analyses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ScoreModel, GolferProfile, CourseSetup) {
        (
            ScoreModel::default(),
            GolferProfile::new("Alex", 18.0),
            CourseSetup::new("Municipal", 72.0, 113, 72),
        )
    }

    #[test]
    fn test_report_summary() {
        let (model, golfer, course) = setup();
        let rounds = vec![
            CompletedRoundScore::new(1, 92, Holes::Eighteen),
            CompletedRoundScore::new(2, 85, Holes::Eighteen),
            CompletedRoundScore::new(3, 97, Holes::Eighteen),
        ];
        let report = analyze_completed_rounds(&model, &golfer, &course, &rounds).unwrap();
        assert_eq!(report.num_rounds_analyzed, 3);
        assert_eq!(report.expected_score_per_round, 90.0);
        assert!((report.average_actual_score - 91.333_333).abs() < 1e-5);
        assert!((report.total_strokes_from_expected - 4.0).abs() < 1e-9);
        assert_eq!(report.best_round.round_number, 2);
        assert_eq!(report.worst_round.round_number, 3);
        let product: f64 = report
            .round_analyses
            .iter()
            .map(|r| r.probability_at_or_below)
            .product();
        assert_eq!(report.overall_probability, product);
    }

    #[test]
    fn test_ties_pick_first_round_played() {
        let (model, golfer, course) = setup();
        let rounds = vec![
            CompletedRoundScore::new(1, 95, Holes::Eighteen),
            CompletedRoundScore::new(2, 84, Holes::Eighteen),
            CompletedRoundScore::new(3, 95, Holes::Eighteen),
            CompletedRoundScore::new(4, 84, Holes::Eighteen),
        ];
        let report = analyze_completed_rounds(&model, &golfer, &course, &rounds).unwrap();
        assert_eq!(report.best_round.round_number, 2);
        assert_eq!(report.worst_round.round_number, 1);
    }

    #[test]
    fn test_mixed_round_lengths() {
        let (model, golfer, course) = setup();
        let rounds = vec![
            CompletedRoundScore::new(1, 45, Holes::Nine),
            CompletedRoundScore::new(2, 90, Holes::Eighteen),
        ];
        let report = analyze_completed_rounds(&model, &golfer, &course, &rounds).unwrap();
        assert_eq!(report.round_analyses[0].expected_score, 45.0);
        assert!(report.round_analyses[0].sigma < report.round_analyses[1].sigma);
        assert_eq!(
            report.overall_performance_descriptor,
            OverallPerformance::ConsistentWithHandicap
        );
    }

    #[test]
    fn test_empty_rounds_is_insufficient() {
        let (model, golfer, course) = setup();
        let result = analyze_completed_rounds(&model, &golfer, &course, &[]);
        assert!(matches!(result, Err(OddsError::InsufficientData { .. })));
    }

    #[test]
    fn test_invalid_round_rejected() {
        let (model, golfer, course) = setup();
        let rounds = vec![CompletedRoundScore::new(1, 10, Holes::Eighteen)];
        assert!(analyze_completed_rounds(&model, &golfer, &course, &rounds).is_err());
    }
}
