//! Strategic multiplier and RICE score.

use super::types::{ConfidenceLevel, StrategicScores};

/// Multiplier when every score is at its minimum.
pub const MIN_MULTIPLIER: f64 = 0.5;
/// Multiplier when every score is at its maximum.
pub const MAX_MULTIPLIER: f64 = 2.0;

/// Hours in one person-week of effort.
pub const RICE_EFFORT_UNIT_HOURS: f64 = 40.0;

const MIN_IMPACT: f64 = 0.25;
const MAX_IMPACT: f64 = 3.0;

/// Map a 1-5 score onto `[0, 1]`.
pub fn normalize_score(score: f64) -> f64 {
    (score - 1.0) / 4.0
}

/// Map an impact step onto `[0, 1]`.
pub fn normalize_impact(impact: f64) -> f64 {
    (impact - MIN_IMPACT) / (MAX_IMPACT - MIN_IMPACT)
}

/// `0.5 + mean(normalized scores) * 1.5`, always within `[0.5, 2.0]` for
/// valid scores.
pub fn strategic_multiplier(scores: &StrategicScores) -> f64 {
    let normalized = [
        normalize_score(scores.reach),
        normalize_impact(scores.impact),
        normalize_score(scores.strategic_alignment),
        normalize_score(scores.differentiation),
        normalize_score(scores.urgency),
    ];
    let mean = normalized.iter().sum::<f64>() / normalized.len() as f64;
    let multiplier = MIN_MULTIPLIER + mean * (MAX_MULTIPLIER - MIN_MULTIPLIER);

    debug_assert!(
        (MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier),
        "strategic multiplier {multiplier} out of range"
    );
    multiplier
}

/// RICE prioritization score: `reach * impact * confidence / (effort / 40)`.
///
/// Missing or zero effort counts as one hour.
pub fn rice_score(
    scores: &StrategicScores,
    confidence: ConfidenceLevel,
    effort_hours: Option<f64>,
) -> f64 {
    let effort = match effort_hours {
        Some(hours) if hours > 0.0 => hours,
        _ => 1.0,
    };
    (scores.reach * scores.impact * confidence.rice_factor())
        / (effort / RICE_EFFORT_UNIT_HOURS)
}
