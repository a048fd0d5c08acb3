use serde::{Deserialize, Serialize};

use crate::error::{OddsError, Result};
use crate::model::{
    BestBallTarget, CompletedRoundScore, CourseSetup, EventStructure, GolferProfile, Holes, ScoringTarget,
    TeamEventStructure, TeamProfile,
};

pub const MAX_CONSECUTIVE_COUNT: u32 = 20;
pub const MAX_TOTAL_MATCHES: u32 = 100;

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleRoundRequest {
    pub golfer: GolferProfile,
    pub course: CourseSetup,
    pub target: ScoringTarget,
    #[serde(default)]
    pub holes_played: Holes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRoundRequest {
    pub golfer: GolferProfile,
    pub course: CourseSetup,
    pub target: ScoringTarget,
    pub event: EventStructure,
    #[serde(default = "one")]
    pub min_success_rounds: u32,
    #[serde(default)]
    pub holes_played: Holes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneRequest {
    pub golfer: GolferProfile,
    pub course: CourseSetup,
    pub event: EventStructure,
    #[serde(default)]
    pub holes_played: Holes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsecutiveRequest {
    pub golfer: GolferProfile,
    pub course: CourseSetup,
    pub target: ScoringTarget,
    /// 1..=20
    pub consecutive_count: u32,
    /// 1..=100; when set, also report the chance of a streak somewhere in
    /// this many matches.
    #[serde(default)]
    pub total_matches: Option<u32>,
    #[serde(default)]
    pub holes_per_round: Holes,
}

impl ConsecutiveRequest {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CONSECUTIVE_COUNT).contains(&self.consecutive_count) {
            return Err(OddsError::invalid(
                "consecutive_count",
                format!("{} is outside 1..={}", self.consecutive_count, MAX_CONSECUTIVE_COUNT),
            ));
        }
        if let Some(total) = self.total_matches {
            if !(1..=MAX_TOTAL_MATCHES).contains(&total) {
                return Err(OddsError::invalid(
                    "total_matches",
                    format!("{} is outside 1..={}", total, MAX_TOTAL_MATCHES),
                ));
            }
        }
        Ok(())
    }
}

/// Simulation controls shared by the team requests. Unset values fall back
/// to the configured default count and a fixed seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    #[serde(default)]
    pub num_simulations: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSingleRoundRequest {
    pub team: TeamProfile,
    pub course: CourseSetup,
    pub bestball_target: BestBallTarget,
    #[serde(flatten)]
    pub simulation: SimulationOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMultiRoundRequest {
    pub team: TeamProfile,
    pub course: CourseSetup,
    pub bestball_target: BestBallTarget,
    pub event: TeamEventStructure,
    #[serde(default = "one")]
    pub min_success_rounds: u32,
    #[serde(default)]
    pub consecutive_count: Option<u32>,
    #[serde(flatten)]
    pub simulation: SimulationOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedRoundsRequest {
    pub golfer: GolferProfile,
    pub course: CourseSetup,
    pub completed_scores: Vec<CompletedRoundScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandbaggingRequest {
    pub golfer: GolferProfile,
    pub course: CourseSetup,
    pub tournament_scores: Vec<CompletedRoundScore>,
    #[serde(default)]
    pub casual_scores: Option<Vec<CompletedRoundScore>>,
}
