use tracing::debug;

use super::calibration::ModelCalibration;
use super::types::{check_handicap_index, CourseSetup, Holes, ScoreDistribution, SLOPE_RATING_NEUTRAL};
use crate::error::Result;

/// Maps handicap index and course difficulty onto a normal score model.
///
/// Every method is a pure function of its arguments and the calibration the
/// model was built with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreModel {
    calibration: ModelCalibration,
}

impl ScoreModel {
    pub fn new(calibration: ModelCalibration) -> Self {
        Self { calibration }
    }

    pub fn calibration(&self) -> &ModelCalibration {
        &self.calibration
    }

    /// `index * slope / 113 + (course rating - par)`, rounded to the nearest
    /// whole stroke with halves rounding up.
    pub fn course_handicap(handicap_index: f64, slope_rating: f64, course_rating: f64, par: f64) -> f64 {
        round_half_up(handicap_index * slope_rating / SLOPE_RATING_NEUTRAL + (course_rating - par))
    }

    /// Expected gross score: par plus course handicap.
    ///
    /// For nine holes the index, rating, par and slope are first scaled to
    /// their half-round equivalents and the handicap is recomputed, so the
    /// result is generally not half of the 18-hole value.
    pub fn expected_score(&self, handicap_index: f64, course: &CourseSetup, holes: Holes) -> Result<f64> {
        check_handicap_index(handicap_index)?;
        course.validate()?;

        let (index, slope, rating, par) = match holes {
            Holes::Eighteen => (
                handicap_index,
                course.slope_rating as f64,
                course.course_rating,
                course.par as f64,
            ),
            Holes::Nine => {
                let nine = &self.calibration.nine_hole;
                (
                    handicap_index * nine.handicap_index_factor,
                    course.slope_rating as f64 * nine.slope_factor,
                    course.course_rating * nine.course_rating_factor,
                    course.par as f64 * nine.par_factor,
                )
            }
        };

        let course_handicap = Self::course_handicap(index, slope, rating, par);
        Ok(par + course_handicap)
    }

    /// Scoring standard deviation for a handicap index.
    pub fn score_std(&self, handicap_index: f64, holes: Holes) -> Result<f64> {
        check_handicap_index(handicap_index)?;
        let sigma = self.eighteen_hole_std(handicap_index);
        Ok(match holes {
            Holes::Eighteen => sigma,
            Holes::Nine => sigma * self.calibration.nine_hole.std_factor,
        })
    }

    pub fn distribution(&self, handicap_index: f64, course: &CourseSetup, holes: Holes) -> Result<ScoreDistribution> {
        let expected_score = self.expected_score(handicap_index, course, holes)?;
        let sigma = self.score_std(handicap_index, holes)?;
        debug!(
            handicap_index,
            course = %course.course_name,
            holes = holes.count(),
            expected_score,
            sigma,
            "score distribution"
        );
        Ok(ScoreDistribution {
            expected_score,
            sigma,
            holes,
        })
    }

    fn eighteen_hole_std(&self, handicap_index: f64) -> f64 {
        let curve = &self.calibration.score_std;
        let raw = if handicap_index <= curve.peak_handicap {
            curve.scratch_sigma + curve.sigma_per_stroke * handicap_index
        } else {
            curve.scratch_sigma + curve.sigma_per_stroke * curve.peak_handicap
                - curve.decline_per_stroke * (handicap_index - curve.peak_handicap)
        };
        raw.clamp(curve.min_sigma, curve.max_sigma)
    }
}

pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_course() -> CourseSetup {
        CourseSetup::new("Municipal", 72.0, 113, 72)
    }

    #[test]
    fn test_course_handicap_neutral_course() {
        assert_eq!(ScoreModel::course_handicap(18.0, 113.0, 72.0, 72.0), 18.0);
    }

    #[test]
    fn test_course_handicap_rounds_half_up() {
        // 10 * 130 / 113 = 11.504...; + (70.5 - 72) = 10.004
        assert_eq!(ScoreModel::course_handicap(10.0, 130.0, 70.5, 72.0), 10.0);
        // plus handicap: -2.5 rounds to -2
        assert_eq!(ScoreModel::course_handicap(-2.5, 113.0, 72.0, 72.0), -2.0);
    }

    #[test]
    fn test_expected_score_eighteen() {
        let model = ScoreModel::default();
        let expected = model.expected_score(18.0, &neutral_course(), Holes::Eighteen).unwrap();
        assert_eq!(expected, 90.0);
    }

    #[test]
    fn test_nine_hole_is_recomputed_not_halved() {
        let model = ScoreModel::default();
        let course = CourseSetup::new("Hilly", 71.4, 130, 72);
        let eighteen = model.expected_score(15.3, &course, Holes::Eighteen).unwrap();
        let nine = model.expected_score(15.3, &course, Holes::Nine).unwrap();
        assert_eq!(eighteen, 89.0);
        assert_eq!(nine, 45.0);
        assert_ne!(nine, eighteen / 2.0);
    }

    #[test]
    fn test_score_std_shape() {
        let model = ScoreModel::default();
        let s0 = model.score_std(0.0, Holes::Eighteen).unwrap();
        let s10 = model.score_std(10.0, Holes::Eighteen).unwrap();
        let s30 = model.score_std(30.0, Holes::Eighteen).unwrap();
        let s54 = model.score_std(54.0, Holes::Eighteen).unwrap();
        assert!(s0 < s10 && s10 < s30);
        assert!(s54 < s30, "high handicaps should flatten or decline");
        assert!(s54 > s10);
    }

    #[test]
    fn test_score_std_bounded() {
        let model = ScoreModel::default();
        let mut h = -10.0;
        while h <= 54.0 {
            let sigma = model.score_std(h, Holes::Eighteen).unwrap();
            assert!((2.0..=12.0).contains(&sigma), "sigma {} at {}", sigma, h);
            h += 0.5;
        }
    }

    #[test]
    fn test_nine_hole_std_smaller() {
        let model = ScoreModel::default();
        for h in [-10.0, 0.0, 12.0, 36.0, 54.0] {
            let eighteen = model.score_std(h, Holes::Eighteen).unwrap();
            let nine = model.score_std(h, Holes::Nine).unwrap();
            assert!(nine > 0.0 && nine < eighteen);
        }
    }

    #[test]
    fn test_rejects_out_of_range_handicap() {
        let model = ScoreModel::default();
        assert!(model.score_std(60.0, Holes::Eighteen).is_err());
        assert!(model.expected_score(-11.0, &neutral_course(), Holes::Eighteen).is_err());
    }

    #[test]
    fn test_distribution_is_deterministic() {
        let model = ScoreModel::default();
        let a = model.distribution(12.4, &neutral_course(), Holes::Nine).unwrap();
        let b = model.distribution(12.4, &neutral_course(), Holes::Nine).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.holes, Holes::Nine);
    }
}
