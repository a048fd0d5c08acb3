use super::config::{DetectorThresholds, RiskBucket, SandbaggingConfig};
use super::factors::{Effect, RangeOp};

/// Validate sandbagging configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_sandbagging(config: &SandbaggingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let risk = &config.risk;

    validate_buckets("sandbagging.risk.performance", &risk.performance, &mut errors);
    validate_buckets("sandbagging.risk.percentile", &risk.percentile, &mut errors);
    validate_buckets("sandbagging.risk.volatility", &risk.volatility, &mut errors);

    for (name, value) in [
        ("points_per_flag", risk.points_per_flag),
        ("flag_points_cap", risk.flag_points_cap),
        ("points_per_critical_flag", risk.points_per_critical_flag),
        ("max_score", risk.max_score),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("sandbagging.risk.{}: must be non-negative", name));
        }
    }

    if !(risk.moderate_at <= risk.high_at && risk.high_at <= risk.severe_at) {
        errors.push(
            "sandbagging.risk: level thresholds must satisfy moderate_at <= high_at <= severe_at".to_string(),
        );
    }

    validate_detectors(&config.detectors, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_buckets(path: &str, buckets: &[RiskBucket], errors: &mut Vec<String>) {
    for (i, bucket) in buckets.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&bucket.range) {
            errors.push(format!("{}[{}].range: invalid '{}' - {}", path, i, bucket.range, e));
        }
        if let Err(e) = Effect::parse(&bucket.effect) {
            errors.push(format!("{}[{}].effect: invalid '{}' - {}", path, i, bucket.effect, e));
        }
    }
}

fn validate_detectors(d: &DetectorThresholds, errors: &mut Vec<String>) {
    // Severity tiers must tighten monotonically.
    if !(d.excellence_critical_strokes <= d.excellence_high_strokes
        && d.excellence_high_strokes <= d.excellence_medium_strokes
        && d.excellence_medium_strokes <= d.excellence_trigger_strokes)
    {
        errors.push("sandbagging.detectors.excellence_*_strokes: must satisfy critical <= high <= medium <= trigger".to_string());
    }
    if !(d.excellence_critical_percentile <= d.excellence_high_percentile
        && d.excellence_high_percentile <= d.excellence_medium_percentile)
    {
        errors.push("sandbagging.detectors.excellence_*_percentile: must satisfy critical <= high <= medium".to_string());
    }
    if !(0.0 < d.low_volatility_high_ratio && d.low_volatility_high_ratio <= d.low_volatility_trigger_ratio) {
        errors.push("sandbagging.detectors.low_volatility_high_ratio: must be in (0, low_volatility_trigger_ratio]".to_string());
    }
    if d.high_volatility_label_ratio < d.low_volatility_trigger_ratio {
        errors.push("sandbagging.detectors.high_volatility_label_ratio: must not be below low_volatility_trigger_ratio".to_string());
    }
    if !(0.0 < d.improbable_critical_probability
        && d.improbable_critical_probability <= d.improbable_high_probability
        && d.improbable_high_probability <= d.improbable_medium_probability
        && d.improbable_medium_probability <= 1.0)
    {
        errors.push("sandbagging.detectors.improbable_*_probability: must satisfy 0 < critical <= high <= medium <= 1".to_string());
    }
    if d.perfect_record_medium_rounds == 0 || d.perfect_record_medium_rounds > d.perfect_record_high_rounds {
        errors.push("sandbagging.detectors.perfect_record_*_rounds: must satisfy 0 < medium <= high".to_string());
    }
    if !(d.disparity_medium_strokes <= d.disparity_high_strokes
        && d.disparity_high_strokes <= d.disparity_critical_strokes)
    {
        errors.push("sandbagging.detectors.disparity_*_strokes: must satisfy medium <= high <= critical".to_string());
    }
}
