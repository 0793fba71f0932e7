//! ROI and gain/pain ranges over a min/max cost estimate.

use serde::{Deserialize, Serialize};

use crate::valuation::{BadgeColor, Recommendation, RoiPercent};

/// Stand-in for an unbounded ROI when averaging.
pub const UNBOUNDED_ROI_CAP: f64 = 1000.0;
/// Stand-in for an unbounded gain/pain ratio.
pub const UNBOUNDED_GAIN_PAIN_CAP: f64 = 100.0;

/// ROI against the maximum cost (low) and the minimum cost (high).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiRange {
    pub roi_low: RoiPercent,
    pub roi_high: RoiPercent,
}

pub fn roi_range(estimated_value: f64, cost_min: f64, cost_max: f64) -> RoiRange {
    if cost_max <= 0.0 {
        let both = if estimated_value == 0.0 {
            RoiPercent::Value(0.0)
        } else {
            RoiPercent::Unbounded
        };
        return RoiRange {
            roi_low: both,
            roi_high: both,
        };
    }

    let roi_high = if cost_min > 0.0 {
        RoiPercent::Value((estimated_value - cost_min) / cost_min * 100.0)
    } else {
        RoiPercent::Unbounded
    };

    RoiRange {
        roi_low: RoiPercent::Value((estimated_value - cost_max) / cost_max * 100.0),
        roi_high,
    }
}

/// Value per dollar of cost. Unbounded when the cost is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum GainPainRatio {
    Value(f64),
    Unbounded,
}

impl GainPainRatio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unbounded => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GainPain {
    pub gain_pain_low: GainPainRatio,
    pub gain_pain_high: GainPainRatio,
}

impl GainPain {
    /// Mean of low and high, capped when either side is unbounded.
    pub fn mid(&self) -> f64 {
        match (self.gain_pain_low.value(), self.gain_pain_high.value()) {
            (Some(low), Some(high)) => (low + high) / 2.0,
            _ => UNBOUNDED_GAIN_PAIN_CAP,
        }
    }
}

pub fn gain_pain(estimated_value: f64, cost_min: f64, cost_max: f64) -> GainPain {
    if cost_max <= 0.0 {
        let both = if estimated_value == 0.0 {
            GainPainRatio::Value(0.0)
        } else {
            GainPainRatio::Unbounded
        };
        return GainPain {
            gain_pain_low: both,
            gain_pain_high: both,
        };
    }

    let gain_pain_high = if cost_min > 0.0 {
        GainPainRatio::Value(estimated_value / cost_min)
    } else {
        GainPainRatio::Unbounded
    };

    GainPain {
        gain_pain_low: GainPainRatio::Value(estimated_value / cost_max),
        gain_pain_high,
    }
}

/// Recommendation drawn from an ROI range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecommendation {
    pub action: Recommendation,
    pub color: BadgeColor,
    pub roi_mid: f64,
    pub reasoning: String,
}

fn capped_roi(roi: RoiPercent) -> f64 {
    roi.value().unwrap_or(UNBOUNDED_ROI_CAP)
}

pub fn cost_recommendation(
    roi_low: RoiPercent,
    roi_high: RoiPercent,
    gain_pain_mid: f64,
) -> CostRecommendation {
    let low = capped_roi(roi_low);
    let high = capped_roi(roi_high);
    let gain_pain_mid = if gain_pain_mid.is_finite() {
        gain_pain_mid
    } else {
        UNBOUNDED_GAIN_PAIN_CAP
    };
    let roi_mid = (low + high) / 2.0;
    let action = Recommendation::from_roi_value(roi_mid);

    let range = format!("{low:.0}%-{high:.0}%");
    let reasoning = match action {
        Recommendation::Build => format!(
            "Strong ROI range of {range} justifies investment. Gain/Pain ratio of {gain_pain_mid:.1}x indicates clear value."
        ),
        Recommendation::Consider => format!(
            "Moderate ROI range of {range}. Consider if strategic value justifies investment or if costs can be reduced."
        ),
        Recommendation::Defer => format!(
            "Low ROI range of {range}. Defer until value proposition improves or costs decrease significantly."
        ),
        Recommendation::Kill => format!(
            "Negative ROI range of {range}. Costs exceed projected value. Recommend not proceeding."
        ),
    };

    CostRecommendation {
        action,
        color: action.color(),
        roi_mid,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi_range() {
        let roi = roi_range(30_000.0, 10_000.0, 20_000.0);
        assert_eq!(roi.roi_low, RoiPercent::Value(50.0));
        assert_eq!(roi.roi_high, RoiPercent::Value(200.0));
    }

    #[test]
    fn test_roi_range_zero_cost() {
        let zero = roi_range(0.0, 0.0, 0.0);
        assert_eq!(zero.roi_low, RoiPercent::Value(0.0));
        assert_eq!(zero.roi_high, RoiPercent::Value(0.0));

        let free = roi_range(5_000.0, 0.0, 0.0);
        assert!(free.roi_low.is_unbounded() && free.roi_high.is_unbounded());

        let partly_free = roi_range(5_000.0, 0.0, 1_000.0);
        assert_eq!(partly_free.roi_low, RoiPercent::Value(400.0));
        assert!(partly_free.roi_high.is_unbounded());
    }

    #[test]
    fn test_gain_pain() {
        let gp = gain_pain(30_000.0, 10_000.0, 20_000.0);
        assert_eq!(gp.gain_pain_low, GainPainRatio::Value(1.5));
        assert_eq!(gp.gain_pain_high, GainPainRatio::Value(3.0));
        assert_eq!(gp.mid(), 2.25);

        let partly_free = gain_pain(30_000.0, 0.0, 20_000.0);
        assert_eq!(partly_free.mid(), UNBOUNDED_GAIN_PAIN_CAP);
    }

    #[test]
    fn test_cost_recommendation_build() {
        let rec = cost_recommendation(RoiPercent::Value(50.0), RoiPercent::Value(200.0), 2.25);
        assert_eq!(rec.action, Recommendation::Build);
        assert_eq!(rec.color, BadgeColor::Green);
        assert_eq!(rec.roi_mid, 125.0);
        assert!(rec.reasoning.contains("50%-200%"));
        assert!(rec.reasoning.contains("2.2x") || rec.reasoning.contains("2.3x"));
    }

    #[test]
    fn test_cost_recommendation_caps_unbounded() {
        let rec = cost_recommendation(RoiPercent::Value(-900.0), RoiPercent::Unbounded, 1.0);
        // (-900 + 1000) / 2
        assert_eq!(rec.roi_mid, 50.0);
        assert_eq!(rec.action, Recommendation::Consider);
        assert!(rec.reasoning.contains("-900%-1000%"));
    }

    #[test]
    fn test_cost_recommendation_kill() {
        let rec = cost_recommendation(RoiPercent::Value(-60.0), RoiPercent::Value(-20.0), 0.6);
        assert_eq!(rec.action, Recommendation::Kill);
        assert_eq!(rec.color, BadgeColor::Red);
    }
}
