use crate::error::{OddsError, Result};
use crate::model::score_model::round_half_up;
use crate::model::{CourseSetup, GolferProfile, Holes, ScoreDistribution, ScoreModel};

/// Strokes received in allowance play: course handicap scaled by the
/// allowance percentage, rounded to the nearest whole stroke.
pub fn playing_handicap(course_handicap: f64, allowance_percent: f64) -> f64 {
    round_half_up(course_handicap * allowance_percent / 100.0)
}

/// Net 18-hole score model for one team member.
///
/// The spread is the player's gross spread; only the mean moves by the
/// strokes received.
pub fn net_distribution(model: &ScoreModel, golfer: &GolferProfile, course: &CourseSetup) -> Result<ScoreDistribution> {
    let allowance = model.calibration().team_allowance_percent;
    if !(0.0..=100.0).contains(&allowance) {
        return Err(OddsError::invalid(
            "team_allowance_percent",
            format!("{} is outside 0..=100", allowance),
        ));
    }

    let gross = model.distribution(golfer.handicap_index, course, Holes::Eighteen)?;
    let course_handicap = ScoreModel::course_handicap(
        golfer.handicap_index,
        course.slope_rating as f64,
        course.course_rating,
        course.par as f64,
    );
    let strokes = playing_handicap(course_handicap, allowance);

    Ok(ScoreDistribution {
        expected_score: gross.expected_score - strokes,
        ..gross
    })
}
