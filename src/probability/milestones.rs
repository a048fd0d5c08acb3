use crate::model::MilestoneConfig;

/// Milestone scores worth reporting for a golfer with this expected score.
///
/// Candidates inside `[expected - band_below, expected + band_above]` are
/// returned in ascending order. When none fall inside the band the candidate
/// closest to the expected score is returned, so the result is never empty
/// as long as the candidate list isn't.
pub fn standard_milestones(expected_score: f64, config: &MilestoneConfig) -> Vec<u32> {
    let low = expected_score - config.band_below;
    let high = expected_score + config.band_above;

    let mut milestones: Vec<u32> = config
        .candidates
        .iter()
        .copied()
        .filter(|&c| (low..=high).contains(&(c as f64)))
        .collect();

    if milestones.is_empty() {
        if let Some(nearest) = config.candidates.iter().copied().min_by(|a, b| {
            let da = (*a as f64 - expected_score).abs();
            let db = (*b as f64 - expected_score).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        }) {
            milestones.push(nearest);
        }
    }

    milestones.sort_unstable();
    milestones.dedup();
    milestones
}
