use super::schema::Config;
use crate::cache::CacheSettings;
use crate::model::ModelCalibration;
use crate::sandbagging::validate_sandbagging;
use crate::team::SimulationBounds;

/// Validate the whole configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    validate_calibration(&config.calibration, &mut errors);
    validate_simulation(&config.simulation, &mut errors);
    if let Err(mut sandbagging) = validate_sandbagging(&config.sandbagging) {
        errors.append(&mut sandbagging);
    }
    validate_cache(&config.cache, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_calibration(calibration: &ModelCalibration, errors: &mut Vec<String>) {
    let std = &calibration.score_std;
    for (name, value) in [
        ("scratch_sigma", std.scratch_sigma),
        ("min_sigma", std.min_sigma),
        ("max_sigma", std.max_sigma),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("calibration.score_std.{}: must be positive", name));
        }
    }
    if std.min_sigma > std.max_sigma {
        errors.push("calibration.score_std.min_sigma: must not exceed max_sigma".to_string());
    }
    if !(std.sigma_per_stroke.is_finite() && std.decline_per_stroke.is_finite() && std.peak_handicap.is_finite()) {
        errors.push("calibration.score_std: slope parameters must be finite".to_string());
    }

    let nine = &calibration.nine_hole;
    for (name, value) in [
        ("handicap_index_factor", nine.handicap_index_factor),
        ("course_rating_factor", nine.course_rating_factor),
        ("par_factor", nine.par_factor),
        ("slope_factor", nine.slope_factor),
        ("std_factor", nine.std_factor),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!("calibration.nine_hole.{}: must be positive", name));
        }
    }
    // 9-hole spread must stay strictly below the 18-hole spread
    if nine.std_factor >= 1.0 {
        errors.push("calibration.nine_hole.std_factor: must be below 1".to_string());
    }

    let milestones = &calibration.milestones;
    if milestones.candidates.is_empty() {
        errors.push("calibration.milestones.candidates: must not be empty".to_string());
    }
    if milestones.band_below < 0.0 || milestones.band_above < 0.0 {
        errors.push("calibration.milestones: band widths must be non-negative".to_string());
    }

    if !(0.0..=100.0).contains(&calibration.team_allowance_percent) {
        errors.push("calibration.team_allowance_percent: must be between 0 and 100".to_string());
    }
}

fn validate_simulation(bounds: &SimulationBounds, errors: &mut Vec<String>) {
    if bounds.min_simulations == 0 {
        errors.push("simulation.min_simulations: must be at least 1".to_string());
    }
    if bounds.min_simulations > bounds.max_simulations {
        errors.push("simulation.min_simulations: must not exceed max_simulations".to_string());
    }
    if bounds.check(bounds.default_simulations).is_err() {
        errors.push("simulation.default_simulations: must lie within min_simulations..=max_simulations".to_string());
    }
}

fn validate_cache(cache: &CacheSettings, errors: &mut Vec<String>) {
    if let Err(e) = cache.ttl() {
        errors.push(format!("cache.ttl: {:#}", e));
    }
    if cache.capacity == 0 {
        errors.push("cache.capacity: must be at least 1".to_string());
    }
}
