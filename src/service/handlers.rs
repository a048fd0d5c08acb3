use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::requests::{
    CompletedRoundsRequest, ConsecutiveRequest, MilestoneRequest, MultiRoundRequest, SandbaggingRequest,
    SimulationOptions, SingleRoundRequest, TeamMultiRoundRequest, TeamSingleRoundRequest,
};
use super::responses::{
    CompletedRoundsResponse, ConsecutiveResponse, DistributionType, MilestoneResponse, MilestoneResult,
    MultiRoundResponse, SandbaggingResponse, SingleRoundResponse, TeamMultiRoundResponse, TeamSingleRoundResponse,
};
use crate::analysis::analyze_completed_rounds;
use crate::cache::{fingerprint, ResponseCache};
use crate::config::Config;
use crate::error::{OddsError, Result};
use crate::model::{CourseSetup, ScoreDistribution, ScoreModel, TeamProfile};
use crate::probability::{
    binomial_tail, multi_round_at_least_once, probability_all_consecutive, probability_streak_within_matches,
    single_round_probability, standard_milestones,
};
use crate::sandbagging::{calculate_sandbagging_risk, SandbaggingConfig};
use crate::team::{net_distribution, simulate_team_best_ball, team_event_odds, SimulationBounds, TeamSimulation};

/// Seed used when a team request does not name one, so repeated requests
/// give repeated answers.
pub const DEFAULT_SEED: u64 = 42;

/// Entry points for every supported query.
///
/// Holds only configuration and an optional response cache; each call is
/// an independent computation.
#[derive(Default)]
pub struct OddsService {
    model: ScoreModel,
    simulation: SimulationBounds,
    sandbagging: SandbaggingConfig,
    cache: Option<ResponseCache<serde_json::Value>>,
}

impl OddsService {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = if config.cache.enabled {
            Some(ResponseCache::from_settings(&config.cache)?)
        } else {
            None
        };
        Ok(Self {
            model: ScoreModel::new(config.calibration.clone()),
            simulation: config.simulation.clone(),
            sandbagging: config.sandbagging.clone(),
            cache,
        })
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }

    pub fn single_round(&self, request: &SingleRoundRequest) -> Result<SingleRoundResponse> {
        info!(
            handicap = request.golfer.handicap_index,
            target = request.target.target_score,
            course = %request.course.course_name,
            holes = request.holes_played.count(),
            "single round calculation"
        );
        self.cached("single_round", request, || {
            let dist = self
                .model
                .distribution(request.golfer.handicap_index, &request.course, request.holes_played)?;
            let odds = single_round_probability(dist.expected_score, dist.sigma, request.target.target_score)?;
            Ok(SingleRoundResponse {
                expected_score: dist.expected_score,
                score_std: dist.sigma,
                target_score: request.target.target_score,
                probability_score_at_or_below_target: odds.probability,
                distribution_type: DistributionType::NormalApproximation,
                z_score: odds.z_score,
            })
        })
    }

    pub fn multi_round(&self, request: &MultiRoundRequest) -> Result<MultiRoundResponse> {
        info!(
            handicap = request.golfer.handicap_index,
            target = request.target.target_score,
            rounds = request.event.num_rounds,
            min_success = request.min_success_rounds,
            holes = request.holes_played.count(),
            "multi-round calculation"
        );
        check_min_success(request.min_success_rounds)?;
        self.cached("multi_round", request, || {
            let dist = self
                .model
                .distribution(request.golfer.handicap_index, &request.course, request.holes_played)?;
            let odds = single_round_probability(dist.expected_score, dist.sigma, request.target.target_score)?;
            let num_rounds = request.event.num_rounds;
            Ok(MultiRoundResponse {
                expected_score: dist.expected_score,
                score_std: dist.sigma,
                target_score: request.target.target_score,
                num_rounds,
                min_success_rounds: request.min_success_rounds,
                probability_at_least_min_success_rounds: binomial_tail(
                    num_rounds,
                    odds.probability,
                    request.min_success_rounds,
                )?,
                probability_at_least_once: multi_round_at_least_once(odds.probability, num_rounds)?,
                single_round_probability: odds.probability,
                binomial_model_used: true,
            })
        })
    }

    pub fn milestones(&self, request: &MilestoneRequest) -> Result<MilestoneResponse> {
        info!(
            handicap = request.golfer.handicap_index,
            rounds = request.event.num_rounds,
            course = %request.course.course_name,
            holes = request.holes_played.count(),
            "milestone calculation"
        );
        self.cached("milestones", request, || {
            let dist = self
                .model
                .distribution(request.golfer.handicap_index, &request.course, request.holes_played)?;
            let milestones = standard_milestones(dist.expected_score, &self.model.calibration().milestones)
                .into_iter()
                .map(|target_score| -> Result<MilestoneResult> {
                    let single = single_round_probability(dist.expected_score, dist.sigma, target_score)?;
                    Ok(MilestoneResult {
                        target_score,
                        prob_single_round_at_or_below: single.probability,
                        prob_at_least_once_in_event: multi_round_at_least_once(
                            single.probability,
                            request.event.num_rounds,
                        )?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            debug!(count = milestones.len(), "milestones computed");

            Ok(MilestoneResponse {
                expected_score: dist.expected_score,
                score_std: dist.sigma,
                num_rounds: request.event.num_rounds,
                milestones,
            })
        })
    }

    pub fn consecutive(&self, request: &ConsecutiveRequest) -> Result<ConsecutiveResponse> {
        info!(
            handicap = request.golfer.handicap_index,
            target = request.target.target_score,
            consecutive = request.consecutive_count,
            total_matches = ?request.total_matches,
            holes = request.holes_per_round.count(),
            "consecutive scores calculation"
        );
        request.validate()?;
        self.cached("consecutive", request, || {
            let dist = self
                .model
                .distribution(request.golfer.handicap_index, &request.course, request.holes_per_round)?;
            let odds = single_round_probability(dist.expected_score, dist.sigma, request.target.target_score)?;
            let k = request.consecutive_count;
            Ok(ConsecutiveResponse {
                expected_score: dist.expected_score,
                score_std: dist.sigma,
                target_score: request.target.target_score,
                consecutive_count: k,
                holes_per_round: request.holes_per_round.count(),
                single_round_probability: odds.probability,
                probability_all_consecutive: probability_all_consecutive(odds.probability, k)?,
                total_matches: request.total_matches,
                probability_streak_in_matches: request
                    .total_matches
                    .map(|m| probability_streak_within_matches(odds.probability, k, m))
                    .transpose()?,
            })
        })
    }

    pub fn team_single_round(&self, request: &TeamSingleRoundRequest) -> Result<TeamSingleRoundResponse> {
        info!(
            player_a = request.team.player_a.handicap_index,
            player_b = request.team.player_b.handicap_index,
            target = request.bestball_target.target_net_score,
            simulations = ?request.simulation.num_simulations,
            "team best-ball single round calculation"
        );
        self.cached("team_single_round", request, || {
            let (a, b, sim) = self.simulate(
                &request.team,
                &request.course,
                request.bestball_target.target_net_score,
                request.simulation,
            )?;
            Ok(TeamSingleRoundResponse {
                target_net_score: sim.target_net_score,
                handicap_allowance_percent: self.model.calibration().team_allowance_percent,
                player_a_net_expected_score: a.expected_score,
                player_b_net_expected_score: b.expected_score,
                expected_team_bestball_score_single_round: sim.mean,
                std_team_bestball_score_single_round: sim.std_dev,
                probability_net_bestball_at_or_below_target_single_round: sim.probability_at_or_below,
                standard_error: sim.standard_error,
                closed_form_expected_score: sim.closed_form_mean,
                num_simulations_used: sim.num_simulations,
                seed: sim.seed,
                approximation_notes: sim.approximation_notes,
            })
        })
    }

    pub fn team_multi_round(&self, request: &TeamMultiRoundRequest) -> Result<TeamMultiRoundResponse> {
        info!(
            player_a = request.team.player_a.handicap_index,
            player_b = request.team.player_b.handicap_index,
            target = request.bestball_target.target_net_score,
            rounds = request.event.num_rounds,
            min_success = request.min_success_rounds,
            "team best-ball multi-round calculation"
        );
        self.cached("team_multi_round", request, || {
            let (_, _, sim) = self.simulate(
                &request.team,
                &request.course,
                request.bestball_target.target_net_score,
                request.simulation,
            )?;
            let odds = team_event_odds(
                sim.probability_at_or_below,
                request.event.num_rounds,
                request.min_success_rounds,
                request.consecutive_count,
            )?;
            Ok(TeamMultiRoundResponse {
                target_net_score: sim.target_net_score,
                handicap_allowance_percent: self.model.calibration().team_allowance_percent,
                num_rounds: odds.num_rounds,
                min_success_rounds: odds.min_success_rounds,
                probability_net_bestball_at_or_below_target_single_round: odds.single_round_probability,
                probability_at_least_once_in_event: odds.probability_at_least_once,
                probability_at_least_min_success_rounds: odds.probability_at_least_min_success_rounds,
                consecutive_count: odds.consecutive_count,
                probability_streak_in_event: odds.probability_streak_in_event,
                expected_team_bestball_score_single_round: sim.mean,
                std_team_bestball_score_single_round: sim.std_dev,
                num_simulations_used: sim.num_simulations,
                seed: sim.seed,
                approximation_notes: sim.approximation_notes,
            })
        })
    }

    pub fn completed_rounds(&self, request: &CompletedRoundsRequest) -> Result<CompletedRoundsResponse> {
        info!(
            golfer = %request.golfer.name,
            handicap = request.golfer.handicap_index,
            rounds = request.completed_scores.len(),
            "completed rounds analysis"
        );
        self.cached("completed_rounds", request, || {
            analyze_completed_rounds(&self.model, &request.golfer, &request.course, &request.completed_scores)
        })
    }

    pub fn sandbagging(&self, request: &SandbaggingRequest) -> Result<SandbaggingResponse> {
        info!(
            golfer = %request.golfer.name,
            handicap = request.golfer.handicap_index,
            tournament_rounds = request.tournament_scores.len(),
            casual_rounds = request.casual_scores.as_ref().map_or(0, Vec::len),
            "sandbagging analysis"
        );
        self.cached("sandbagging", request, || {
            let report = calculate_sandbagging_risk(
                &self.model,
                &request.golfer,
                &request.course,
                &request.tournament_scores,
                request.casual_scores.as_deref(),
                &self.sandbagging,
            )?;
            info!(
                score = report.risk_score,
                level = %report.risk_level,
                flags = report.red_flags.len(),
                "sandbagging analysis complete"
            );
            Ok(SandbaggingResponse::from(report))
        })
    }

    fn simulate(
        &self,
        team: &TeamProfile,
        course: &CourseSetup,
        target_net_score: u32,
        options: SimulationOptions,
    ) -> Result<(ScoreDistribution, ScoreDistribution, TeamSimulation)> {
        let a = net_distribution(&self.model, &team.player_a, course)?;
        let b = net_distribution(&self.model, &team.player_b, course)?;
        let sim = simulate_team_best_ball(
            &a,
            &b,
            target_net_score,
            options.num_simulations.unwrap_or(self.simulation.default_simulations),
            options.seed.unwrap_or(DEFAULT_SEED),
            &self.simulation,
        )?;
        Ok((a, b, sim))
    }

    /// Serve from the cache when possible. Cache problems never fail a
    /// request; they only cost a recomputation.
    fn cached<Req, Resp>(&self, operation: &str, request: &Req, compute: impl FnOnce() -> Result<Resp>) -> Result<Resp>
    where
        Req: Serialize,
        Resp: Serialize + DeserializeOwned,
    {
        let Some(cache) = &self.cache else {
            return compute();
        };
        let key = match fingerprint(operation, request) {
            Ok(key) => key,
            Err(e) => {
                warn!(operation, error = %e, "could not fingerprint request, skipping cache");
                return compute();
            }
        };

        if let Some(hit) = cache.get(&key) {
            match serde_json::from_value(hit) {
                Ok(response) => {
                    debug!(operation, "cache hit");
                    return Ok(response);
                }
                Err(e) => warn!(operation, error = %e, "discarding unreadable cache entry"),
            }
        }

        let response = compute()?;
        match serde_json::to_value(&response) {
            Ok(value) => cache.insert(key, value),
            Err(e) => warn!(operation, error = %e, "response not cacheable"),
        }
        Ok(response)
    }
}

fn check_min_success(min_success_rounds: u32) -> Result<()> {
    if min_success_rounds == 0 {
        Err(OddsError::invalid("min_success_rounds", "must be at least 1"))
    } else {
        Ok(())
    }
}
