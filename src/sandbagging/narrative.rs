use super::engine::RiskLevel;

/// One-paragraph summary for a risk level.
pub fn summary(level: RiskLevel, avg_vs_expected: f64) -> String {
    let strokes = avg_vs_expected.abs();
    match level {
        RiskLevel::Severe => format!(
            "SEVERE SANDBAGGING RISK: Multiple critical indicators suggest this handicap may be \
             significantly inflated. Tournament performance averaging {:.1} strokes better than \
             handicap predicts is highly suspicious.",
            strokes
        ),
        RiskLevel::High => format!(
            "HIGH SANDBAGGING RISK: Several concerning patterns detected. Golfer consistently \
             outperforms their handicap in tournaments (avg {:.1} strokes better than expected). \
             Further investigation recommended.",
            strokes
        ),
        RiskLevel::Moderate => format!(
            "MODERATE RISK: Some indicators suggest potential sandbagging. Tournament performance \
             is {:.1} strokes better than expected. Monitor for continued patterns.",
            strokes
        ),
        RiskLevel::Low => "LOW RISK: Performance appears consistent with stated handicap. \
                           No significant sandbagging indicators detected."
            .to_string(),
    }
}

pub fn recommendation(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Severe => {
            "RECOMMENDED ACTION: Handicap committee review strongly recommended. Consider requiring \
             handicap verification or adjustment. This golfer should be monitored closely in future \
             competitions."
        }
        RiskLevel::High => {
            "RECOMMENDED ACTION: Investigation warranted. Request additional score history and \
             consider informal discussion with golfer. Monitor performance in upcoming events."
        }
        RiskLevel::Moderate => {
            "RECOMMENDED ACTION: Continue monitoring. If pattern persists over next 3-5 rounds, \
             consider deeper investigation. Golfer may simply be improving or having a hot streak."
        }
        RiskLevel::Low => {
            "RECOMMENDED ACTION: No action needed. Performance is consistent with handicap. \
             Continue normal monitoring procedures."
        }
    }
}
