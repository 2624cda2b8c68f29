#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Combined per-city metrics and statewide rollup types produced by a full
//! evaluation pass.
//!
//! These records are what the dashboard frontend consumes: every derived
//! score for every city, plus one summary row for the state.

use ev_atlas_city_models::StateTargets;
use ev_atlas_forecast_models::{CityAllocation, ForecastPoint};
use ev_atlas_scoring_models::{
    AdoptionReadiness, InfrastructureAssessment, PriorityScore, RiskMatrix,
};
use ev_atlas_stats::LinearFit;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Projected final-year vehicle count past which a city counts as heavy
/// demand when bucketing infrastructure investment.
pub const HEAVY_DEMAND_VEHICLES: u64 = 2_000;

/// Urgency bucket for the infrastructure investment matrix.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentCategory {
    /// Weak infrastructure under heavy projected demand.
    Critical,
    /// Weak infrastructure ahead of moderate demand.
    HighPriority,
    /// Infrastructure holding up under heavy projected demand.
    MediumPriority,
    /// No pressing need.
    LowPriority,
}

impl InvestmentCategory {
    /// Buckets a city by its infrastructure readiness and final-year
    /// projected demand. Readiness below 0.5 counts as weak; demand above
    /// [`HEAVY_DEMAND_VEHICLES`] counts as heavy.
    #[must_use]
    pub const fn from_assessment(
        infrastructure_readiness: f64,
        final_year_vehicles: u64,
    ) -> Self {
        let weak_infrastructure = infrastructure_readiness < 0.5;
        let heavy_demand = final_year_vehicles > HEAVY_DEMAND_VEHICLES;
        match (weak_infrastructure, heavy_demand) {
            (true, true) => Self::Critical,
            (true, false) => Self::HighPriority,
            (false, true) => Self::MediumPriority,
            (false, false) => Self::LowPriority,
        }
    }
}

/// Infrastructure investment urgency for one city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPriority {
    /// Composite urgency: 60% infrastructure shortfall, 40% share of the
    /// heaviest projected demand.
    pub score: f64,
    /// Action bucket for the investment matrix.
    pub category: InvestmentCategory,
}

/// Every derived metric for one city, computed in a single evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMetrics {
    /// Municipality name.
    pub name: String,
    /// Resident population, carried over for chart axes.
    pub population: u32,
    /// Adoption readiness factors and composite.
    pub readiness: AdoptionReadiness,
    /// Rollout priority factors and composite.
    pub priority: PriorityScore,
    /// Dense rank by priority score, 1 = highest.
    pub priority_rank: u32,
    /// Four-factor risk matrix.
    pub risk: RiskMatrix,
    /// Charging and grid readiness assessment.
    pub infrastructure: InfrastructureAssessment,
    /// Share of the statewide baseline and target.
    pub allocation: CityAllocation,
    /// Projected vehicle counts, one per requested year.
    pub projections: Vec<ForecastPoint>,
    /// Final-year projected vehicles per 1,000 residents.
    pub grid_load_per_thousand: f64,
    /// Infrastructure investment urgency.
    pub investment: InvestmentPriority,
}

/// City counts per low/medium/high band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandCounts {
    /// Cities in the low band.
    pub low: u32,
    /// Cities in the medium band.
    pub medium: u32,
    /// Cities in the high band.
    pub high: u32,
}

/// Dataset-wide rollup of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatewideSummary {
    /// Number of cities evaluated.
    pub city_count: usize,
    /// Sum of per-city baseline estimates. Flooring each share can leave a
    /// small remainder against the statewide baseline.
    pub current_total: u64,
    /// Sum of per-city target shares.
    pub target_total: u64,
    /// Official target minus the statewide baseline.
    pub gap_to_target: i64,
    /// Statewide projected vehicles, one total per requested year.
    pub totals_by_year: Vec<ForecastPoint>,
    /// Mean per-city compound growth rate.
    pub average_growth_rate: f64,
    /// Mean adoption readiness composite.
    pub average_readiness: f64,
    /// Cities holding a top-five priority rank. Ties can push this past
    /// five.
    pub top_priority_count: u32,
    /// City counts per overall risk category.
    pub risk_categories: BandCounts,
    /// City counts per infrastructure readiness tier.
    pub readiness_tiers: BandCounts,
    /// Cities bucketed as critical infrastructure investments.
    pub critical_investment_count: u32,
    /// Least-squares trend of the statewide totals across the requested
    /// years; the slope is implied vehicles per year.
    pub trend: LinearFit,
}

/// Full output of one evaluation pass: a deterministic function of the
/// dataset and targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Statewide targets the evaluation ran against.
    pub targets: StateTargets,
    /// Per-city derived metrics, in dataset order.
    pub cities: Vec<CityMetrics>,
    /// Dataset-wide rollup.
    pub summary: StatewideSummary,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn investment_buckets_split_on_readiness_and_demand() {
        assert_eq!(
            InvestmentCategory::from_assessment(0.4, 3_000),
            InvestmentCategory::Critical
        );
        assert_eq!(
            InvestmentCategory::from_assessment(0.4, 1_500),
            InvestmentCategory::HighPriority
        );
        assert_eq!(
            InvestmentCategory::from_assessment(0.8, 3_000),
            InvestmentCategory::MediumPriority
        );
        assert_eq!(
            InvestmentCategory::from_assessment(0.8, 100),
            InvestmentCategory::LowPriority
        );
    }

    #[test]
    fn investment_bucket_boundaries_are_exclusive() {
        // Readiness exactly 0.5 is not weak; demand exactly at the
        // threshold is not heavy.
        assert_eq!(
            InvestmentCategory::from_assessment(0.5, HEAVY_DEMAND_VEHICLES),
            InvestmentCategory::LowPriority
        );
        assert_eq!(
            InvestmentCategory::from_assessment(0.5, HEAVY_DEMAND_VEHICLES + 1),
            InvestmentCategory::MediumPriority
        );
    }

    #[test]
    fn investment_category_string_roundtrip() {
        assert_eq!(InvestmentCategory::HighPriority.to_string(), "HIGH_PRIORITY");
        for category in [
            InvestmentCategory::Critical,
            InvestmentCategory::HighPriority,
            InvestmentCategory::MediumPriority,
            InvestmentCategory::LowPriority,
        ] {
            let parsed = InvestmentCategory::from_str(category.as_ref()).unwrap();
            assert_eq!(parsed, category);
        }
    }
}
