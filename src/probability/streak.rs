use crate::error::{check_probability, OddsError, Result};

/// `p^k`: chance of `k` successes in a row.
pub fn probability_all_consecutive(p: f64, k: u32) -> Result<f64> {
    check_probability("p", p)?;
    check_streak_length(k)?;
    Ok(pow_k(p, k))
}

/// Chance that `m` independent trials contain at least one run of `k`
/// consecutive successes.
///
/// Let `f(i)` be the chance that no run of length `k` has appeared in the
/// first `i` trials, so `f(i) = 1` for `i < k`, `f(k) = 1 - p^k` and
/// `f(i) = f(i-1) - p^k (1-p) f(i-k-1)` afterwards (`f = 1` for negative
/// indices). The loop tracks `g = 1 - f` directly: each step adds a
/// non-negative term, so `g` never decreases in `m` even in floating point,
/// and `g(k)` is exactly `p^k`.
pub fn probability_streak_within_matches(p: f64, k: u32, m: u32) -> Result<f64> {
    check_probability("p", p)?;
    check_streak_length(k)?;
    if k > m {
        return Ok(0.0);
    }

    let run = pow_k(p, k);
    let k = k as usize;
    let m = m as usize;
    let fresh_run = run * (1.0 - p);

    // g(i) = chance a run has appeared within the first i trials. Only
    // g(i-1) and g(i-k-1) are needed, so keep the last k+1 values in a ring:
    // slot i % (k+1) holds g(i-k-1) until step i overwrites it with g(i).
    let mut window = vec![0.0f64; k + 1];
    window[k] = run;
    let mut g = run;
    for i in (k + 1)..=m {
        let slot = i % (k + 1);
        g += fresh_run * (1.0 - window[slot]);
        window[slot] = g;
    }

    Ok(g.clamp(0.0, 1.0))
}

fn pow_k(p: f64, k: u32) -> f64 {
    match i32::try_from(k) {
        Ok(k) => p.powi(k),
        Err(_) => p.powf(k as f64),
    }
}

fn check_streak_length(k: u32) -> Result<()> {
    if k == 0 {
        Err(OddsError::invalid("consecutive_count", "must be at least 1"))
    } else {
        Ok(())
    }
}
