use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;
use tracing::debug;

use crate::error::{check_finite, check_sigma, OddsError, Result};
use crate::model::{ScoreDistribution, SCORE_MAX, SCORE_MIN};
use crate::probability::normal::{standard_normal_cdf, standard_normal_pdf, CONTINUITY_CORRECTION};
use crate::probability::{binomial_tail, multi_round_at_least_once, probability_streak_within_matches};

pub const APPROXIMATION_NOTES: &str = "Team best-ball modeled as the minimum of two independent net round \
scores (round-level approximation). Monte Carlo standard error shrinks as O(1/sqrt(S)).";

/// Accepted range for the number of simulated rounds.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationBounds {
    pub min_simulations: u32,
    pub max_simulations: u32,
    pub default_simulations: u32,
}

impl Default for SimulationBounds {
    fn default() -> Self {
        Self {
            min_simulations: 1_000,
            max_simulations: 1_000_000,
            default_simulations: 10_000,
        }
    }
}

impl SimulationBounds {
    pub fn check(&self, simulations: u32) -> Result<()> {
        if (self.min_simulations..=self.max_simulations).contains(&simulations) {
            Ok(())
        } else {
            Err(OddsError::invalid(
                "num_simulations",
                format!(
                    "{} is outside {}..={}",
                    simulations, self.min_simulations, self.max_simulations
                ),
            ))
        }
    }
}

/// Aggregate statistics of a simulated best-ball round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSimulation {
    pub target_net_score: u32,
    pub mean: f64,
    pub std_dev: f64,
    /// Empirical fraction of rounds at or below target.
    pub probability_at_or_below: f64,
    /// `std_dev / sqrt(S)`
    pub standard_error: f64,
    /// Exact expectation of the minimum of the two normals, for reference.
    pub closed_form_mean: f64,
    pub num_simulations: u32,
    pub seed: u64,
    pub approximation_notes: String,
}

/// Simulate `simulations` best-ball rounds for two players' net score models.
///
/// Each trial draws one independent normal score per player and keeps the
/// lower. Identical inputs and seed give identical output.
pub fn simulate_team_best_ball(
    player_a: &ScoreDistribution,
    player_b: &ScoreDistribution,
    target_net_score: u32,
    simulations: u32,
    seed: u64,
    bounds: &SimulationBounds,
) -> Result<TeamSimulation> {
    bounds.check(simulations)?;
    if !(SCORE_MIN..=SCORE_MAX).contains(&target_net_score) {
        return Err(OddsError::invalid(
            "target_net_score",
            format!("{} is outside {}..={}", target_net_score, SCORE_MIN, SCORE_MAX),
        ));
    }
    let normal_a = net_normal(player_a)?;
    let normal_b = net_normal(player_b)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let cutoff = target_net_score as f64 + CONTINUITY_CORRECTION;

    // Welford running mean / variance
    let mut mean = 0.0;
    let mut m2 = 0.0;
    let mut hits: u64 = 0;
    for trial in 1..=simulations {
        let best = normal_a.sample(&mut rng).min(normal_b.sample(&mut rng));
        if best <= cutoff {
            hits += 1;
        }
        let delta = best - mean;
        mean += delta / trial as f64;
        m2 += delta * (best - mean);
    }

    let n = simulations as f64;
    let std_dev = if simulations > 1 {
        (m2 / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    let probability_at_or_below = hits as f64 / n;
    let closed_form_mean = expected_minimum(player_a, player_b);

    debug!(
        simulations,
        seed, mean, std_dev, probability_at_or_below, closed_form_mean, "best-ball simulation"
    );

    Ok(TeamSimulation {
        target_net_score,
        mean,
        std_dev,
        probability_at_or_below,
        standard_error: std_dev / n.sqrt(),
        closed_form_mean,
        num_simulations: simulations,
        seed,
        approximation_notes: APPROXIMATION_NOTES.to_string(),
    })
}

fn net_normal(player: &ScoreDistribution) -> Result<Normal> {
    check_finite("expected_score", player.expected_score)?;
    check_sigma(player.sigma)?;
    Normal::new(player.expected_score, player.sigma)
        .map_err(|e| OddsError::NumericalInstability(e.to_string()))
}

/// `E[min(X, Y)]` for independent normals X and Y.
pub fn expected_minimum(a: &ScoreDistribution, b: &ScoreDistribution) -> f64 {
    let theta = (a.sigma * a.sigma + b.sigma * b.sigma).sqrt();
    let alpha = (b.expected_score - a.expected_score) / theta;
    a.expected_score * standard_normal_cdf(alpha) + b.expected_score * standard_normal_cdf(-alpha)
        - theta * standard_normal_pdf(alpha)
}

/// Event-level odds built on a (simulated) single-round probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEventOdds {
    pub single_round_probability: f64,
    pub num_rounds: u32,
    pub min_success_rounds: u32,
    pub probability_at_least_once: f64,
    pub probability_at_least_min_success_rounds: f64,
    pub consecutive_count: Option<u32>,
    pub probability_streak_in_event: Option<f64>,
}

/// Spread a single-round probability over an event of independent rounds.
pub fn team_event_odds(
    single_round_probability: f64,
    num_rounds: u32,
    min_success_rounds: u32,
    consecutive_count: Option<u32>,
) -> Result<TeamEventOdds> {
    if min_success_rounds == 0 {
        return Err(OddsError::invalid("min_success_rounds", "must be at least 1"));
    }
    let probability_at_least_once = multi_round_at_least_once(single_round_probability, num_rounds)?;
    let probability_at_least_min_success_rounds =
        binomial_tail(num_rounds, single_round_probability, min_success_rounds)?;
    let probability_streak_in_event = consecutive_count
        .map(|k| probability_streak_within_matches(single_round_probability, k, num_rounds))
        .transpose()?;

    Ok(TeamEventOdds {
        single_round_probability,
        num_rounds,
        min_success_rounds,
        probability_at_least_once,
        probability_at_least_min_success_rounds,
        consecutive_count,
        probability_streak_in_event,
    })
}
