//! Property tests for the valuation pipeline.

use jarvis_valuation::valuation::drivers::{error_reduction, time_savings};
use jarvis_valuation::valuation::recommendation::value_range;
use jarvis_valuation::valuation::strategic::strategic_multiplier;
use jarvis_valuation::valuation::*;
use proptest::prelude::*;

fn confidence_strategy() -> impl Strategy<Value = ConfidenceLevel> {
    prop_oneof![
        Just(ConfidenceLevel::High),
        Just(ConfidenceLevel::Medium),
        Just(ConfidenceLevel::Low),
        Just(ConfidenceLevel::Speculative),
    ]
}

fn score_strategy() -> impl Strategy<Value = f64> {
    (1u8..=5).prop_map(f64::from)
}

fn scores_strategy() -> impl Strategy<Value = StrategicScores> {
    (
        score_strategy(),
        prop::sample::select(StrategicScores::IMPACT_SCALE.to_vec()),
        score_strategy(),
        score_strategy(),
        score_strategy(),
    )
        .prop_map(
            |(reach, impact, strategic_alignment, differentiation, urgency)| StrategicScores {
                reach,
                impact,
                strategic_alignment,
                differentiation,
                urgency,
            },
        )
}

fn internal_input_strategy() -> impl Strategy<Value = ValuationInput> {
    (
        0.0f64..40.0,
        (0u32..5_000).prop_map(f64::from),
        0.0f64..300.0,
        0.0f64..=100.0,
        scores_strategy(),
        confidence_strategy(),
        0.0f64..1_000_000.0,
    )
        .prop_map(
            |(hours, users, rate, adoption, scores, confidence, cost)| ValuationInput {
                product_type: ProductType::Internal,
                internal_drivers: Some(InternalDrivers {
                    time_savings: TimeSavings {
                        hours_saved_per_user_per_week: hours,
                        affected_users: users,
                        avg_hourly_cost: rate,
                    },
                    adoption: Adoption {
                        adoption_rate_percent: adoption,
                        ..Default::default()
                    },
                    ..Default::default()
                }),
                external_drivers: None,
                value_weights: None,
                strategic_scores: scores,
                confidence_level: confidence,
                estimated_cost: cost,
                effort_hours: None,
            },
        )
}

fn both_input(internal_percent: f64, external_percent: f64) -> ValuationInput {
    ValuationInput {
        product_type: ProductType::Both,
        internal_drivers: Some(InternalDrivers::default()),
        external_drivers: Some(ExternalDrivers {
            customer_economics: CustomerEconomics {
                customer_lifetime_months: 12.0,
                ..Default::default()
            },
            ..Default::default()
        }),
        value_weights: Some(ValueWeights {
            internal_percent,
            external_percent,
        }),
        strategic_scores: StrategicScores::default(),
        confidence_level: ConfidenceLevel::Medium,
        estimated_cost: 1_000.0,
        effort_hours: None,
    }
}

proptest! {
    #[test]
    fn time_savings_increases_with_hours(
        hours in 0.0f64..100.0,
        delta in 0.01f64..10.0,
        users in 1u32..10_000,
        rate in 1.0f64..500.0,
    ) {
        let base = TimeSavings {
            hours_saved_per_user_per_week: hours,
            affected_users: f64::from(users),
            avg_hourly_cost: rate,
        };
        let more = TimeSavings {
            hours_saved_per_user_per_week: hours + delta,
            ..base.clone()
        };
        prop_assert!(time_savings(&more) > time_savings(&base));
    }

    #[test]
    fn error_reduction_increases_with_percent(
        errors in 1.0f64..1_000.0,
        cost in 1.0f64..10_000.0,
        percent in 0.01f64..90.0,
        delta in 0.01f64..10.0,
    ) {
        let base = ErrorReduction {
            current_errors_per_month: errors,
            cost_per_error: cost,
            reduction_percent: percent,
        };
        let more = ErrorReduction {
            reduction_percent: percent + delta,
            ..base.clone()
        };
        prop_assert!(error_reduction(&more) > error_reduction(&base));
    }

    #[test]
    fn multiplier_within_bounds(scores in scores_strategy()) {
        let multiplier = strategic_multiplier(&scores);
        prop_assert!((0.5..=2.0).contains(&multiplier));
    }

    #[test]
    fn range_is_ordered(total in 0.0f64..1e9, confidence in confidence_strategy()) {
        let range = value_range(total, confidence);
        prop_assert!(range.is_ordered());
    }

    #[test]
    fn range_is_ordered_for_any_base(total in -1e9f64..1e9, confidence in confidence_strategy()) {
        prop_assert!(value_range(total, confidence).is_ordered());
    }

    #[test]
    fn weights_off_100_rejected(internal in 0.0f64..=100.0, external in 0.0f64..=100.0) {
        prop_assume!((internal + external - 100.0).abs() > 1e-6);
        let report = ValuationEngine::new().compute(&both_input(internal, external)).unwrap_err();
        prop_assert!(report.has_code(ErrorCode::InvalidWeights));
    }

    #[test]
    fn weights_summing_to_100_accepted(internal in 0u32..=100) {
        let internal = f64::from(internal);
        let result = ValuationEngine::new().compute(&both_input(internal, 100.0 - internal));
        prop_assert!(result.is_ok());
    }

    #[test]
    fn recommendation_partitions_roi(roi in -1e6f64..1e6) {
        let expected = if roi >= 100.0 {
            Recommendation::Build
        } else if roi >= 50.0 {
            Recommendation::Consider
        } else if roi >= 0.0 {
            Recommendation::Defer
        } else {
            Recommendation::Kill
        };
        prop_assert_eq!(Recommendation::from_roi_value(roi), expected);
    }

    #[test]
    fn compute_is_idempotent(input in internal_input_strategy()) {
        let engine = ValuationEngine::new();
        let first = engine.compute(&input);
        let second = engine.compute(&input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn valid_internal_results_hold_invariants(input in internal_input_strategy()) {
        let result = ValuationEngine::new().compute(&input).unwrap();
        prop_assert!(result.value_range.is_ordered());
        prop_assert!((0.5..=2.0).contains(&result.strategic_multiplier));
        prop_assert_eq!(result.color, result.recommendation.color());
    }
}

#[test]
fn multiplier_extremes_are_exact() {
    assert_eq!(strategic_multiplier(&StrategicScores::minimum()), 0.5);
    assert_eq!(strategic_multiplier(&StrategicScores::maximum()), 2.0);
}

#[test]
fn recommendation_boundaries() {
    assert_eq!(Recommendation::from_roi_value(99.999), Recommendation::Consider);
    assert_eq!(Recommendation::from_roi_value(100.0), Recommendation::Build);
    assert_eq!(Recommendation::from_roi_value(-0.001), Recommendation::Kill);
    assert_eq!(Recommendation::from_roi_value(0.0), Recommendation::Defer);
}
