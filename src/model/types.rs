use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{OddsError, Result};

pub const HANDICAP_INDEX_MIN: f64 = -10.0;
pub const HANDICAP_INDEX_MAX: f64 = 54.0;
pub const SLOPE_RATING_MIN: u32 = 55;
pub const SLOPE_RATING_MAX: u32 = 155;
/// Slope of a course of average difficulty.
pub const SLOPE_RATING_NEUTRAL: f64 = 113.0;
pub const SCORE_MIN: u32 = 25;
pub const SCORE_MAX: u32 = 200;

/// Round length. Serialized as the plain hole count (`9` or `18`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Holes {
    Nine,
    #[default]
    Eighteen,
}

impl Holes {
    pub fn count(self) -> u8 {
        match self {
            Holes::Nine => 9,
            Holes::Eighteen => 18,
        }
    }
}

impl TryFrom<u8> for Holes {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            9 => Ok(Holes::Nine),
            18 => Ok(Holes::Eighteen),
            other => Err(format!("holes must be 9 or 18, got {}", other)),
        }
    }
}

impl From<Holes> for u8 {
    fn from(holes: Holes) -> u8 {
        holes.count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolferProfile {
    pub name: String,
    /// Lower is better; plus handicaps are negative.
    pub handicap_index: f64,
}

impl GolferProfile {
    pub fn new(name: impl Into<String>, handicap_index: f64) -> Self {
        Self {
            name: name.into(),
            handicap_index,
        }
    }
}

/// Validate a handicap index against the supported range.
pub fn check_handicap_index(handicap_index: f64) -> Result<()> {
    if (HANDICAP_INDEX_MIN..=HANDICAP_INDEX_MAX).contains(&handicap_index) {
        Ok(())
    } else {
        Err(OddsError::invalid(
            "handicap_index",
            format!(
                "{} is outside {}..={}",
                handicap_index, HANDICAP_INDEX_MIN, HANDICAP_INDEX_MAX
            ),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSetup {
    pub course_name: String,
    /// Expected score of a scratch golfer.
    pub course_rating: f64,
    pub slope_rating: u32,
    pub par: u32,
}

impl CourseSetup {
    pub fn new(course_name: impl Into<String>, course_rating: f64, slope_rating: u32, par: u32) -> Self {
        Self {
            course_name: course_name.into(),
            course_rating,
            slope_rating,
            par,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(SLOPE_RATING_MIN..=SLOPE_RATING_MAX).contains(&self.slope_rating) {
            return Err(OddsError::invalid(
                "slope_rating",
                format!(
                    "{} is outside {}..={}",
                    self.slope_rating, SLOPE_RATING_MIN, SLOPE_RATING_MAX
                ),
            ));
        }
        if !self.course_rating.is_finite() || self.course_rating <= 0.0 {
            return Err(OddsError::invalid(
                "course_rating",
                format!("{} must be a positive number", self.course_rating),
            ));
        }
        if self.par == 0 {
            return Err(OddsError::invalid("par", "must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub player_a: GolferProfile,
    pub player_b: GolferProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTarget {
    pub target_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestBallTarget {
    pub target_net_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStructure {
    pub num_rounds: u32,
}

pub type TeamEventStructure = EventStructure;

/// A round that has already been played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedRoundScore {
    pub round_number: u32,
    pub gross_score: u32,
    #[serde(default)]
    pub holes_played: Holes,
    #[serde(default)]
    pub round_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CompletedRoundScore {
    pub fn new(round_number: u32, gross_score: u32, holes_played: Holes) -> Self {
        Self {
            round_number,
            gross_score,
            holes_played,
            round_date: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.round_number == 0 {
            return Err(OddsError::invalid("round_number", "must be at least 1"));
        }
        if !(SCORE_MIN..=SCORE_MAX).contains(&self.gross_score) {
            return Err(OddsError::invalid(
                "gross_score",
                format!(
                    "{} is outside {}..={}",
                    self.gross_score, SCORE_MIN, SCORE_MAX
                ),
            ));
        }
        Ok(())
    }
}

/// Normal model of a round's score. Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub expected_score: f64,
    pub sigma: f64,
    pub holes: Holes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holes_serde_as_number() {
        let json = serde_json::to_string(&Holes::Nine).unwrap();
        assert_eq!(json, "9");
        let parsed: Holes = serde_json::from_str("18").unwrap();
        assert_eq!(parsed, Holes::Eighteen);
        assert!(serde_json::from_str::<Holes>("12").is_err());
    }

    #[test]
    fn test_completed_round_defaults() {
        let round: CompletedRoundScore =
            serde_json::from_str(r#"{"round_number": 1, "gross_score": 88}"#).unwrap();
        assert_eq!(round.holes_played, Holes::Eighteen);
        assert!(round.round_date.is_none());
        assert!(round.validate().is_ok());
    }

    #[test]
    fn test_completed_round_with_date() {
        let round: CompletedRoundScore = serde_json::from_str(
            r#"{"round_number": 2, "gross_score": 44, "holes_played": 9, "round_date": "2024-06-01"}"#,
        )
        .unwrap();
        assert_eq!(round.holes_played, Holes::Nine);
        assert_eq!(round.round_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn test_completed_round_rejects_bad_values() {
        assert!(CompletedRoundScore::new(0, 90, Holes::Eighteen).validate().is_err());
        assert!(CompletedRoundScore::new(1, 20, Holes::Eighteen).validate().is_err());
        assert!(CompletedRoundScore::new(1, 201, Holes::Eighteen).validate().is_err());
    }

    #[test]
    fn test_course_validation() {
        assert!(CourseSetup::new("Pebble", 72.0, 113, 72).validate().is_ok());
        assert!(CourseSetup::new("Too Easy", 72.0, 54, 72).validate().is_err());
        assert!(CourseSetup::new("Too Hard", 72.0, 156, 72).validate().is_err());
        assert!(CourseSetup::new("No Par", 72.0, 113, 0).validate().is_err());
    }

    #[test]
    fn test_handicap_range() {
        assert!(check_handicap_index(-10.0).is_ok());
        assert!(check_handicap_index(54.0).is_ok());
        assert!(check_handicap_index(54.1).is_err());
        assert!(check_handicap_index(f64::NAN).is_err());
    }
}
