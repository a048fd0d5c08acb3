use statrs::function::beta::beta_reg;

use crate::error::{check_probability, OddsError, Result};

/// `1 - (1 - p)^n`: chance of succeeding in at least one of `n`
/// independent rounds.
pub fn multi_round_at_least_once(p: f64, num_rounds: u32) -> Result<f64> {
    check_probability("p", p)?;
    if num_rounds == 0 {
        return Err(OddsError::invalid("num_rounds", "must be at least 1"));
    }
    if num_rounds == 1 {
        return Ok(p);
    }
    // -expm1(n * ln(1 - p)) keeps precision when p is tiny
    let at_least_once = -(num_rounds as f64 * (-p).ln_1p()).exp_m1();
    Ok(at_least_once.clamp(0.0, 1.0))
}

/// `P(X >= k)` for `X ~ Binomial(n, p)`.
///
/// Uses the identity `P(X >= k) = I_p(k, n - k + 1)` with the regularized
/// incomplete beta function, which stays stable for large `n`.
pub fn binomial_tail(n: u32, p: f64, k: u32) -> Result<f64> {
    check_probability("p", p)?;
    if k == 0 {
        return Ok(1.0);
    }
    if k > n || p == 0.0 {
        return Ok(0.0);
    }
    if p == 1.0 {
        return Ok(1.0);
    }
    let tail = beta_reg(k as f64, (n - k + 1) as f64, p);
    Ok(tail.clamp(0.0, 1.0))
}
