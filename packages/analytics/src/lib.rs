#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Whole-dataset evaluation.
//!
//! Runs every scoring and forecast pass over a validated dataset and rolls
//! the results into per-city metric records plus one statewide summary. An
//! evaluation is a single synchronous pass over plain values: two passes
//! over the same inputs compare equal, and a failed pass produces no
//! partial output.

use ev_atlas_analytics_models::{
    BandCounts, CityMetrics, Evaluation, InvestmentCategory, InvestmentPriority,
    StatewideSummary,
};
use ev_atlas_city_models::StateTargets;
use ev_atlas_dataset::Dataset;
use ev_atlas_forecast::{AllocationContext, ForecastError};
use ev_atlas_forecast_models::ForecastPoint;
use ev_atlas_scoring::infrastructure::assess_infrastructure;
use ev_atlas_scoring::risk::risk_matrix;
use ev_atlas_scoring::{rank_priorities, ScoringContext, ScoringError};
use ev_atlas_scoring_models::{ReadinessTier, RiskCategory};
use ev_atlas_stats::{linear_regression, StatsError};
use thiserror::Error;

/// Dense ranks counted as top priority in the statewide summary.
const TOP_PRIORITY_RANKS: u32 = 5;

/// Errors raised while evaluating a dataset.
#[derive(Debug, Error, PartialEq)]
pub enum EvaluateError {
    /// No forecast years were requested; projections, grid load, and the
    /// statewide trend all need at least one.
    #[error("At least one forecast year is required")]
    NoForecastYears,

    /// Scoring context construction failed.
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Allocation context construction failed.
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Statewide trend regression failed.
    #[error("Trend error: {0}")]
    Stats(#[from] StatsError),
}

/// Evaluates every city in the dataset against the statewide targets,
/// projecting vehicle counts for each requested year.
///
/// The last requested year anchors grid load and the investment matrix.
///
/// # Errors
///
/// Returns an error if no years are requested, or if scoring or allocation
/// context construction finds a degenerate aggregate. Nothing is emitted on
/// failure.
pub fn evaluate(
    dataset: &Dataset,
    targets: &StateTargets,
    years: &[i32],
) -> Result<Evaluation, EvaluateError> {
    if years.is_empty() {
        return Err(EvaluateError::NoForecastYears);
    }

    let scoring = ScoringContext::new(dataset)?;
    let cities = dataset.cities();
    log::info!(
        "Evaluating {} cities across {} forecast years",
        cities.len(),
        years.len()
    );

    let readiness: Vec<_> = cities
        .iter()
        .map(|city| scoring.adoption_readiness(city))
        .collect();
    let readiness_scores: Vec<f64> = readiness.iter().map(|r| r.score).collect();
    let priorities: Vec<_> = cities
        .iter()
        .map(|city| scoring.priority_score(city))
        .collect();
    let priority_scores: Vec<f64> = priorities.iter().map(|p| p.score).collect();
    let ranks = rank_priorities(&priority_scores);

    let allocator = AllocationContext::new(dataset, &readiness_scores, targets)?;
    let allocations: Vec<_> = cities
        .iter()
        .zip(&readiness_scores)
        .map(|(city, &score)| allocator.allocate(city, score))
        .collect();
    let projections: Vec<Vec<ForecastPoint>> = allocations
        .iter()
        .map(|allocation| allocator.project(allocation, years))
        .collect();

    let final_forecasts: Vec<u64> = projections
        .iter()
        .map(|points| points.last().map_or(0, |point| point.vehicles))
        .collect();
    let heaviest_demand = final_forecasts.iter().copied().max().unwrap_or(0);

    let mut city_metrics = Vec::with_capacity(cities.len());
    for (index, city) in cities.iter().enumerate() {
        let infrastructure = assess_infrastructure(city);
        city_metrics.push(CityMetrics {
            name: city.name.clone(),
            population: city.population,
            readiness: readiness[index],
            priority: priorities[index],
            priority_rank: ranks[index],
            risk: risk_matrix(city),
            infrastructure,
            allocation: allocations[index],
            projections: projections[index].clone(),
            grid_load_per_thousand: grid_load(final_forecasts[index], city.population),
            investment: investment_priority(
                infrastructure.readiness,
                final_forecasts[index],
                heaviest_demand,
            ),
        });
    }

    let summary = summarize(&city_metrics, targets, years)?;

    Ok(Evaluation {
        targets: *targets,
        cities: city_metrics,
        summary,
    })
}

/// Final-year projected vehicles per 1,000 residents.
#[allow(clippy::cast_precision_loss)]
fn grid_load(final_year_vehicles: u64, population: u32) -> f64 {
    final_year_vehicles as f64 / f64::from(population) * 1_000.0
}

/// Scores investment urgency: 60% infrastructure shortfall, 40% share of
/// the heaviest projected demand. A dataset where every final-year
/// projection is zero carries no demand signal, so the demand share is
/// zero for every city.
#[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
fn investment_priority(
    infrastructure_readiness: f64,
    final_year_vehicles: u64,
    heaviest_demand: u64,
) -> InvestmentPriority {
    let demand_share = if heaviest_demand > 0 {
        final_year_vehicles as f64 / heaviest_demand as f64
    } else {
        0.0
    };

    InvestmentPriority {
        score: 0.6 * (1.0 - infrastructure_readiness) + 0.4 * demand_share,
        category: InvestmentCategory::from_assessment(
            infrastructure_readiness,
            final_year_vehicles,
        ),
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]
fn summarize(
    city_metrics: &[CityMetrics],
    targets: &StateTargets,
    years: &[i32],
) -> Result<StatewideSummary, EvaluateError> {
    let totals_by_year: Vec<ForecastPoint> = years
        .iter()
        .enumerate()
        .map(|(index, &year)| ForecastPoint {
            year,
            vehicles: city_metrics
                .iter()
                .map(|city| city.projections[index].vehicles)
                .sum(),
        })
        .collect();

    let xs: Vec<f64> = totals_by_year.iter().map(|p| f64::from(p.year)).collect();
    let ys: Vec<f64> = totals_by_year.iter().map(|p| p.vehicles as f64).collect();
    let trend = linear_regression(&xs, &ys)?;

    let mut risk_categories = BandCounts::default();
    let mut readiness_tiers = BandCounts::default();
    for city in city_metrics {
        match city.risk.category {
            RiskCategory::Low => risk_categories.low += 1,
            RiskCategory::Medium => risk_categories.medium += 1,
            RiskCategory::High => risk_categories.high += 1,
        }
        match city.infrastructure.tier {
            ReadinessTier::Low => readiness_tiers.low += 1,
            ReadinessTier::Medium => readiness_tiers.medium += 1,
            ReadinessTier::High => readiness_tiers.high += 1,
        }
    }

    let count = city_metrics.len() as f64;
    Ok(StatewideSummary {
        city_count: city_metrics.len(),
        current_total: city_metrics
            .iter()
            .map(|c| c.allocation.current_estimate)
            .sum(),
        target_total: city_metrics.iter().map(|c| c.allocation.target_share).sum(),
        gap_to_target: targets.official_target as i64 - targets.current_baseline as i64,
        totals_by_year,
        average_growth_rate: city_metrics
            .iter()
            .map(|c| c.allocation.growth_rate)
            .sum::<f64>()
            / count,
        average_readiness: city_metrics.iter().map(|c| c.readiness.score).sum::<f64>() / count,
        top_priority_count: city_metrics
            .iter()
            .filter(|c| c.priority_rank <= TOP_PRIORITY_RANKS)
            .count() as u32,
        risk_categories,
        readiness_tiers,
        critical_investment_count: city_metrics
            .iter()
            .filter(|c| c.investment.category == InvestmentCategory::Critical)
            .count() as u32,
        trend,
    })
}
