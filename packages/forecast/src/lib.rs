#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statewide adoption allocation and multi-year projections.
//!
//! The statewide baseline and target are split across cities by a blended
//! population/readiness weight. Each city's pair of shares implies a
//! compound annual growth rate, which in turn projects vehicle counts into
//! any requested future year.

use ev_atlas_city_models::{CityRecord, StateTargets};
use ev_atlas_dataset::Dataset;
use ev_atlas_forecast_models::{CityAllocation, ForecastPoint};
use thiserror::Error;

/// Ceiling on the derived annual growth rate (200% per year).
///
/// Tiny baseline shares against large target shares would otherwise imply
/// implausible multi-thousand-percent growth.
pub const GROWTH_RATE_CAP: f64 = 2.0;

/// Growth rate assumed for a city whose baseline allocation rounds to zero.
pub const DEFAULT_GROWTH_RATE: f64 = 0.5;

/// Population share of the blended allocation weight.
const POPULATION_BLEND: f64 = 0.7;
/// Readiness share of the blended allocation weight.
const READINESS_BLEND: f64 = 0.3;

/// Errors raised while building an allocation context.
#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    /// The readiness slice did not line up with the dataset.
    #[error("Expected {cities} readiness scores, one per city, got {scores}")]
    ReadinessCountMismatch {
        /// Number of cities in the dataset.
        cities: usize,
        /// Number of readiness scores supplied.
        scores: usize,
    },

    /// A readiness score was negative, NaN, or infinite.
    #[error("Readiness score at index {index} is {value}, expected a finite non-negative number")]
    InvalidReadinessScore {
        /// Position of the offending score.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// A dataset-wide denominator was zero.
    #[error("Degenerate aggregate: {aggregate} is zero")]
    DegenerateAggregate {
        /// Which denominator collapsed.
        aggregate: &'static str,
    },

    /// The target year was at or before the base year.
    #[error("Target year {target_year} must be after base year {base_year}")]
    InvalidHorizon {
        /// Year the baseline was measured.
        base_year: i32,
        /// Year the target is due.
        target_year: i32,
    },
}

/// Dataset-wide totals and statewide targets shared by every per-city
/// allocation. Built once per evaluation pass and borrowed by the
/// allocation and projection calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationContext {
    total_population: f64,
    total_readiness: f64,
    current_baseline: f64,
    official_target: f64,
    base_year: i32,
    years_to_target: f64,
}

impl AllocationContext {
    /// Builds the shared context for one allocation pass.
    ///
    /// `readiness_scores` must hold one adoption readiness score per city,
    /// in dataset order. A validated dataset always carries a positive
    /// total population, so only the readiness total needs a degenerate
    /// check here.
    ///
    /// # Errors
    ///
    /// Returns an error if the score count does not match the dataset, a
    /// score is negative or non-finite, the scores sum to zero, or the
    /// target year does not come after the base year.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(
        dataset: &Dataset,
        readiness_scores: &[f64],
        targets: &StateTargets,
    ) -> Result<Self, ForecastError> {
        if readiness_scores.len() != dataset.len() {
            return Err(ForecastError::ReadinessCountMismatch {
                cities: dataset.len(),
                scores: readiness_scores.len(),
            });
        }
        for (index, &value) in readiness_scores.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ForecastError::InvalidReadinessScore { index, value });
            }
        }

        let total_readiness: f64 = readiness_scores.iter().sum();
        if total_readiness <= 0.0 {
            return Err(ForecastError::DegenerateAggregate {
                aggregate: "total readiness",
            });
        }
        if targets.target_year <= targets.base_year {
            return Err(ForecastError::InvalidHorizon {
                base_year: targets.base_year,
                target_year: targets.target_year,
            });
        }

        log::debug!(
            "Allocating {} baseline vehicles across {} cities",
            targets.current_baseline,
            dataset.len()
        );

        Ok(Self {
            total_population: dataset.aggregates().total_population as f64,
            total_readiness,
            current_baseline: targets.current_baseline as f64,
            official_target: targets.official_target as f64,
            base_year: targets.base_year,
            years_to_target: targets.years_to_target(),
        })
    }

    /// Computes one city's share of the statewide baseline and target.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::suboptimal_flops
    )]
    pub fn allocate(&self, city: &CityRecord, readiness_score: f64) -> CityAllocation {
        let population_weight = f64::from(city.population) / self.total_population;
        let readiness_weight = readiness_score / self.total_readiness;
        let allocation_weight =
            POPULATION_BLEND * population_weight + READINESS_BLEND * readiness_weight;

        let current_estimate = (allocation_weight * self.current_baseline).floor() as u64;
        let target_share = (allocation_weight * self.official_target).floor() as u64;
        let growth_rate = growth_rate(current_estimate, target_share, self.years_to_target);

        CityAllocation {
            population_weight,
            readiness_weight,
            allocation_weight,
            current_estimate,
            target_share,
            growth_rate,
        }
    }

    /// Projects a city's vehicle count for each requested year.
    ///
    /// Every point is computed independently from the base-year estimate
    /// and the allocation's growth rate; points do not chain.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn project(&self, allocation: &CityAllocation, years: &[i32]) -> Vec<ForecastPoint> {
        years
            .iter()
            .map(|&year| {
                let compounded = allocation.current_estimate as f64
                    * (1.0 + allocation.growth_rate).powi(year - self.base_year);
                ForecastPoint {
                    year,
                    vehicles: compounded.floor() as u64,
                }
            })
            .collect()
    }
}

/// Annual compound growth rate that moves `current` to `target` over
/// `years` years, capped at [`GROWTH_RATE_CAP`].
///
/// A zero current estimate has no defined ratio; those cities get
/// [`DEFAULT_GROWTH_RATE`] instead.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_rate(current: u64, target: u64, years: f64) -> f64 {
    if current == 0 {
        return DEFAULT_GROWTH_RATE;
    }
    let ratio = target as f64 / current as f64;
    (ratio.powf(1.0 / years) - 1.0).min(GROWTH_RATE_CAP)
}
