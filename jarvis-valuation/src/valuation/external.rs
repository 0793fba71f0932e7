//! External market drivers: unit economics and the three-year revenue
//! projection.

use jarvis_common::ExternalValueBasis;

use super::result::{ExternalBreakdown, GuardedRatio};
use super::types::{CustomerEconomics, ExternalDrivers, Growth, MarketSizing};

/// Projection horizon in years.
pub const PROJECTION_YEARS: f64 = 3.0;

/// SOM customer count. Informational only.
pub fn achievable_customers(market: &MarketSizing) -> f64 {
    market.total_potential_customers
        * (market.serviceable_percent / 100.0)
        * (market.achievable_market_share_percent / 100.0)
}

/// Customer lifetime in months, derived from churn when a positive
/// monthly churn rate is given.
pub fn effective_lifetime_months(economics: &CustomerEconomics) -> f64 {
    match economics.monthly_churn_rate_percent {
        Some(churn) if churn > 0.0 => (1.0 / (churn / 100.0)).floor(),
        _ => economics.customer_lifetime_months,
    }
}

pub fn customer_ltv(average_deal_size: f64, economics: &CustomerEconomics) -> f64 {
    average_deal_size
        * (economics.gross_margin_percent / 100.0)
        * (effective_lifetime_months(economics) / 12.0)
}

pub fn ltv_cac_ratio(ltv: f64, customer_acquisition_cost: f64) -> GuardedRatio {
    GuardedRatio::divide(ltv, customer_acquisition_cost)
}

/// Months of gross margin needed to recover CAC.
pub fn payback_months(
    average_deal_size: f64,
    gross_margin_percent: f64,
    customer_acquisition_cost: f64,
) -> GuardedRatio {
    let monthly_margin = average_deal_size / 12.0 * (gross_margin_percent / 100.0);
    GuardedRatio::divide(customer_acquisition_cost, monthly_margin)
}

/// Revenue per year from cumulative customer counts.
pub fn revenue_by_year(growth: &Growth, average_deal_size: f64) -> [f64; 3] {
    growth
        .by_year()
        .map(|customers| customers * average_deal_size)
}

/// Compute the external breakdown. `externalTotal` follows `basis`.
pub fn external_breakdown(drivers: &ExternalDrivers, basis: ExternalValueBasis) -> ExternalBreakdown {
    let deal = drivers.revenue.average_deal_size;
    let economics = &drivers.customer_economics;
    let cac = economics.customer_acquisition_cost;

    let ltv = customer_ltv(deal, economics);
    let revenue = revenue_by_year(&drivers.growth, deal);
    let gross: f64 = revenue.iter().sum();

    // Year-N counts are cumulative, so year 3 is every customer acquired.
    let acquisition = drivers.growth.year3_customers * cac;
    let gtm = PROJECTION_YEARS
        * (drivers.gtm_costs.annual_marketing_spend + drivers.gtm_costs.annual_sales_team_cost);
    let net = gross - acquisition - gtm;

    let external_total = match basis {
        ExternalValueBasis::Annualized => net / PROJECTION_YEARS,
        ExternalValueBasis::ThreeYearTotal => net,
    };

    ExternalBreakdown {
        achievable_customers: achievable_customers(&drivers.market_sizing),
        customer_ltv: ltv,
        ltv_cac_ratio: ltv_cac_ratio(ltv, cac),
        payback_months: payback_months(deal, economics.gross_margin_percent, cac),
        revenue_by_year: revenue,
        gross_three_year_revenue: gross,
        total_acquisition_cost: acquisition,
        total_gtm_cost: gtm,
        net_three_year_revenue: net,
        external_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::types::{GtmCosts, Revenue};

    fn make_drivers() -> ExternalDrivers {
        ExternalDrivers {
            market_sizing: MarketSizing {
                total_potential_customers: 10_000.0,
                serviceable_percent: 40.0,
                achievable_market_share_percent: 5.0,
            },
            revenue: Revenue {
                price_per_unit: 100.0,
                average_deal_size: 12_000.0,
                sales_cycle_months: 3.0,
                conversion_rate_percent: 10.0,
            },
            customer_economics: CustomerEconomics {
                gross_margin_percent: 75.0,
                customer_lifetime_months: 36.0,
                customer_acquisition_cost: 3_000.0,
                monthly_churn_rate_percent: None,
            },
            gtm_costs: GtmCosts {
                annual_marketing_spend: 50_000.0,
                annual_sales_team_cost: 100_000.0,
            },
            growth: Growth {
                year1_customers: 20.0,
                year2_customers: 50.0,
                year3_customers: 100.0,
            },
        }
    }

    #[test]
    fn test_achievable_customers() {
        let drivers = make_drivers();
        assert!((achievable_customers(&drivers.market_sizing) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_ltv_and_ratios() {
        let drivers = make_drivers();
        let ltv = customer_ltv(12_000.0, &drivers.customer_economics);
        assert!((ltv - 27_000.0).abs() < 1e-9);

        let ratio = ltv_cac_ratio(ltv, 3_000.0).value().unwrap();
        assert!((ratio - 9.0).abs() < 1e-9);

        let payback = payback_months(12_000.0, 75.0, 3_000.0).value().unwrap();
        assert!((payback - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cac_is_undefined() {
        assert_eq!(ltv_cac_ratio(27_000.0, 0.0), GuardedRatio::Undefined);
    }

    #[test]
    fn test_zero_margin_payback_is_undefined() {
        assert!(payback_months(12_000.0, 0.0, 3_000.0).is_undefined());
        assert!(payback_months(0.0, 75.0, 3_000.0).is_undefined());
    }

    #[test]
    fn test_churn_overrides_lifetime() {
        let mut economics = make_drivers().customer_economics;
        economics.monthly_churn_rate_percent = Some(3.0);
        // floor(1 / 0.03) = 33
        assert_eq!(effective_lifetime_months(&economics), 33.0);

        economics.monthly_churn_rate_percent = Some(0.0);
        assert_eq!(effective_lifetime_months(&economics), 36.0);
    }

    #[test]
    fn test_external_breakdown_annualized() {
        let breakdown = external_breakdown(&make_drivers(), ExternalValueBasis::Annualized);

        assert_eq!(breakdown.revenue_by_year, [240_000.0, 600_000.0, 1_200_000.0]);
        assert_eq!(breakdown.gross_three_year_revenue, 2_040_000.0);
        assert_eq!(breakdown.total_acquisition_cost, 300_000.0);
        assert_eq!(breakdown.total_gtm_cost, 450_000.0);
        assert_eq!(breakdown.net_three_year_revenue, 1_290_000.0);
        assert!((breakdown.external_total - 430_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_external_breakdown_three_year_total() {
        let breakdown = external_breakdown(&make_drivers(), ExternalValueBasis::ThreeYearTotal);
        assert_eq!(breakdown.external_total, breakdown.net_three_year_revenue);
    }
}
