use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;
use std::f64::consts::{PI, SQRT_2};

use crate::error::{check_finite, check_sigma, OddsError, Result};
use crate::model::{SCORE_MAX, SCORE_MIN};

/// Half-stroke shift applied when a continuous CDF stands in for an
/// integer-valued score.
pub const CONTINUITY_CORRECTION: f64 = 0.5;

/// Probability of a single round at or below target, with the z-score used.
///
/// A negative z-score means the target is below the expected score (harder);
/// a positive one means it is above (easier).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingleRoundOdds {
    pub probability: f64,
    pub z_score: f64,
}

pub fn standard_normal_cdf(z: f64) -> f64 {
    (0.5 * erfc(-z / SQRT_2)).clamp(0.0, 1.0)
}

pub fn standard_normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

/// Continuity-corrected `P(score <= target)` for `score ~ Normal(expected, sigma)`.
pub fn single_round_probability(expected_score: f64, sigma: f64, target_score: u32) -> Result<SingleRoundOdds> {
    check_finite("expected_score", expected_score)?;
    check_sigma(sigma)?;
    if !(SCORE_MIN..=SCORE_MAX).contains(&target_score) {
        return Err(OddsError::invalid(
            "target_score",
            format!("{} is outside {}..={}", target_score, SCORE_MIN, SCORE_MAX),
        ));
    }

    let z_score = (target_score as f64 + CONTINUITY_CORRECTION - expected_score) / sigma;
    Ok(SingleRoundOdds {
        probability: standard_normal_cdf(z_score),
        z_score,
    })
}
