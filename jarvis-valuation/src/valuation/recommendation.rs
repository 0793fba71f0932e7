//! Confidence band, ROI and recommendation.

use jarvis_common::util::{format_currency, round_to};

use super::result::{Recommendation, RoiPercent, ValueRange};
use super::types::ConfidenceLevel;

/// ROI at or above which a product should be built.
pub const BUILD_THRESHOLD: f64 = 100.0;
/// ROI at or above which a product is worth considering.
pub const CONSIDER_THRESHOLD: f64 = 50.0;
/// ROI at or above which a product is deferred rather than killed.
pub const DEFER_THRESHOLD: f64 = 0.0;

/// Apply the confidence band to `base`. A negative base is floored at zero.
pub fn value_range(base: f64, confidence: ConfidenceLevel) -> ValueRange {
    let base = base.max(0.0);
    let (low, high) = confidence.band();
    ValueRange {
        low: base * low,
        mid: base * ((low + high) / 2.0),
        high: base * high,
    }
}

/// `(value - cost) / cost * 100`, unbounded for a positive value at zero cost.
pub fn roi_percent(value: f64, estimated_cost: f64) -> RoiPercent {
    if estimated_cost > 0.0 {
        RoiPercent::Value((value - estimated_cost) / estimated_cost * 100.0)
    } else if value > 0.0 {
        RoiPercent::Unbounded
    } else {
        RoiPercent::Value(0.0)
    }
}

impl Recommendation {
    /// Bucket an ROI percentage. The buckets partition the real line.
    pub fn from_roi_value(roi: f64) -> Self {
        if roi >= BUILD_THRESHOLD {
            Self::Build
        } else if roi >= CONSIDER_THRESHOLD {
            Self::Consider
        } else if roi >= DEFER_THRESHOLD {
            Self::Defer
        } else {
            Self::Kill
        }
    }

    pub fn from_roi(roi: RoiPercent) -> Self {
        match roi {
            RoiPercent::Value(v) => Self::from_roi_value(v),
            RoiPercent::Unbounded => Self::Build,
        }
    }
}

/// One-sentence explanation of a recommendation.
pub fn reasoning(
    recommendation: Recommendation,
    roi: RoiPercent,
    range: &ValueRange,
    estimated_cost: f64,
) -> String {
    let roi_text = match roi {
        RoiPercent::Value(v) => format!("{}%", round_to(v, 1)),
        RoiPercent::Unbounded => "unbounded".to_string(),
    };
    let value_text = format!(
        "expected value {} (range {} to {}) against cost {}",
        format_currency(range.mid),
        format_currency(range.low),
        format_currency(range.high),
        format_currency(estimated_cost)
    );

    match recommendation {
        Recommendation::Build => {
            format!("Strong ROI of {roi_text}: {value_text}. Proceed with development.")
        }
        Recommendation::Consider => format!(
            "Moderate ROI of {roi_text}: {value_text}. Worth pursuing if strategically aligned."
        ),
        Recommendation::Defer => format!(
            "Low ROI of {roi_text}: {value_text}. Revisit when assumptions firm up or costs drop."
        ),
        Recommendation::Kill => {
            format!("Negative ROI of {roi_text}: {value_text}. Cost exceeds expected value.")
        }
    }
}
