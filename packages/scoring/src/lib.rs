#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-city adoption scoring.
//!
//! A [`ScoringContext`] is built once per dataset and carries the
//! normalization denominators every composite needs. Construction is the
//! only fallible step; after it succeeds, scoring any city from the same
//! dataset is pure arithmetic.

pub mod infrastructure;
pub mod risk;

use ev_atlas_city_models::CityRecord;
use ev_atlas_dataset::Dataset;
use ev_atlas_scoring_models::{AdoptionReadiness, PriorityScore};
use thiserror::Error;

/// Massachusetts median household income (ACS 2023 table S1901), in
/// dollars. Readiness normalizes income against this fixed statewide
/// reference rather than the dataset maximum, so a score keeps its meaning
/// when the dataset is filtered to a subset of cities.
pub const REFERENCE_MEDIAN_INCOME: f64 = 101_341.0;

/// Distance over which proximity factors decay toward their floors, in
/// miles.
pub const DISTANCE_HORIZON_MILES: f64 = 100.0;

/// Errors that can occur while preparing to score a dataset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// A dataset-wide maximum needed for normalization is zero, so a
    /// factor that divides by it is undefined for every city.
    #[error("Degenerate aggregate: {aggregate} is zero across the dataset")]
    DegenerateAggregate {
        /// Name of the zero aggregate.
        aggregate: &'static str,
    },
}

/// Normalization denominators for one dataset, validated once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    max_population: f64,
    max_income: f64,
    max_home_value: f64,
    max_distance_miles: f64,
}

impl ScoringContext {
    /// Builds a scoring context from a validated dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::DegenerateAggregate`] if the dataset's
    /// maximum income, home value, or hub distance is zero. Population is
    /// already guaranteed positive by dataset validation.
    pub fn new(dataset: &Dataset) -> Result<Self, ScoringError> {
        let aggregates = dataset.aggregates();

        let checks = [
            ("max income", aggregates.max_income),
            ("max home value", aggregates.max_home_value),
            ("max distance", aggregates.max_distance_miles),
        ];
        for (aggregate, value) in checks {
            if value <= 0.0 {
                return Err(ScoringError::DegenerateAggregate { aggregate });
            }
        }

        log::debug!(
            "Scoring context ready: max income {}, max home value {}, max distance {} mi",
            aggregates.max_income,
            aggregates.max_home_value,
            aggregates.max_distance_miles
        );

        Ok(Self {
            max_population: f64::from(aggregates.max_population),
            max_income: aggregates.max_income,
            max_home_value: aggregates.max_home_value,
            max_distance_miles: aggregates.max_distance_miles,
        })
    }

    /// Scores how ready a city's residents are to adopt, on a 0.0-1.0
    /// scale.
    ///
    /// Income is measured against [`REFERENCE_MEDIAN_INCOME`]; market size
    /// against the largest city in the dataset. Every factor is clamped to
    /// 0.0-1.0 before weighting and the composite is capped at 1.0.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn adoption_readiness(&self, city: &CityRecord) -> AdoptionReadiness {
        let income = clamp01(city.median_income / REFERENCE_MEDIAN_INCOME);
        let education = clamp01(city.bachelor_degree_pct / 100.0);
        let infrastructure = clamp01(city.single_family_pct / 100.0);
        let market = clamp01(f64::from(city.population) / self.max_population);
        let transport = clamp01(city.drive_alone_pct / 100.0);
        let distance = (1.0 - city.distance_miles / DISTANCE_HORIZON_MILES).max(0.5);

        let score = (income * 0.25
            + education * 0.25
            + infrastructure * 0.20
            + market * 0.15
            + transport * 0.10
            + distance * 0.05)
            .min(1.0);

        AdoptionReadiness {
            income,
            education,
            infrastructure,
            market,
            transport,
            distance,
            score,
        }
    }

    /// Scores how strongly a city should be prioritized for rollout
    /// investment, relative to the rest of the dataset.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn priority_score(&self, city: &CityRecord) -> PriorityScore {
        let economic = clamp01(
            (city.median_income / self.max_income) * 0.6
                + (city.median_home_value / self.max_home_value) * 0.4,
        );
        let education = clamp01(city.bachelor_degree_pct / 100.0);
        let infrastructure = clamp01(
            (city.single_family_pct / 100.0) * 0.6
                + (1.0 - city.distance_miles / self.max_distance_miles) * 0.4,
        );
        let market_size = clamp01(f64::from(city.population) / self.max_population);
        let transport = clamp01(city.drive_alone_pct / 100.0);

        let score = economic * 0.25
            + education * 0.20
            + infrastructure * 0.20
            + market_size * 0.20
            + transport * 0.15;

        PriorityScore {
            economic,
            education,
            infrastructure,
            market_size,
            transport,
            score,
        }
    }
}

/// Assigns dense ranks to priority scores, descending: the highest score
/// gets rank 1, tied scores share a rank, and the next distinct score gets
/// the next rank. Returned ranks align with the input order.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rank_priorities(scores: &[f64]) -> Vec<u32> {
    let mut distinct: Vec<f64> = scores.to_vec();
    distinct.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    distinct.dedup();

    scores
        .iter()
        .map(|score| {
            let higher = distinct.iter().take_while(|s| **s > *score).count();
            higher as u32 + 1
        })
        .collect()
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use ev_atlas_city_models::UrbanClass;

    use super::*;

    fn city(name: &str, population: u32) -> CityRecord {
        CityRecord {
            name: name.to_string(),
            population,
            median_income: 85_000.0,
            bachelor_degree_pct: 40.0,
            drive_alone_pct: 60.0,
            single_family_pct: 45.0,
            median_home_value: 450_000.0,
            public_transit_pct: 10.0,
            urban_class: UrbanClass::Urban,
            distance_miles: 12.0,
        }
    }

    fn two_city_dataset() -> Dataset {
        let mut hub = city("Hub", 100_000);
        hub.distance_miles = 0.0;
        let satellite = city("Satellite", 50_000);
        Dataset::new(vec![hub, satellite]).unwrap()
    }

    #[test]
    fn context_rejects_zero_max_income() {
        let mut a = city("A", 10_000);
        a.median_income = 0.0;
        let mut b = city("B", 20_000);
        b.median_income = 0.0;
        let dataset = Dataset::new(vec![a, b]).unwrap();
        assert_eq!(
            ScoringContext::new(&dataset),
            Err(ScoringError::DegenerateAggregate {
                aggregate: "max income"
            })
        );
    }

    #[test]
    fn context_rejects_zero_max_distance() {
        let mut only = city("Hub", 100_000);
        only.distance_miles = 0.0;
        let dataset = Dataset::new(vec![only]).unwrap();
        assert_eq!(
            ScoringContext::new(&dataset),
            Err(ScoringError::DegenerateAggregate {
                aggregate: "max distance"
            })
        );
    }

    #[test]
    fn readiness_factors_stay_in_unit_range() {
        let dataset = two_city_dataset();
        let ctx = ScoringContext::new(&dataset).unwrap();
        for record in dataset.cities() {
            let readiness = ctx.adoption_readiness(record);
            for factor in [
                readiness.income,
                readiness.education,
                readiness.infrastructure,
                readiness.market,
                readiness.transport,
                readiness.distance,
                readiness.score,
            ] {
                assert!(
                    (0.0..=1.0).contains(&factor),
                    "{}: factor {factor} out of range",
                    record.name
                );
            }
        }
    }

    #[test]
    fn readiness_composite_matches_hand_computation() {
        // Income exactly at the reference median, every percentage chosen
        // so the weighted sum is easy to check by hand.
        let mut hub = city("Hub", 100_000);
        hub.median_income = REFERENCE_MEDIAN_INCOME;
        hub.bachelor_degree_pct = 50.0;
        hub.single_family_pct = 40.0;
        hub.drive_alone_pct = 60.0;
        hub.distance_miles = 0.0;
        let satellite = city("Satellite", 50_000);
        let dataset = Dataset::new(vec![hub, satellite]).unwrap();
        let ctx = ScoringContext::new(&dataset).unwrap();

        let readiness = ctx.adoption_readiness(dataset.get("Hub").unwrap());
        // 0.25*1.0 + 0.25*0.5 + 0.20*0.4 + 0.15*1.0 + 0.10*0.6 + 0.05*1.0
        assert!((readiness.score - 0.715).abs() < 1e-12);
    }

    #[test]
    fn distance_factor_floors_at_half() {
        let dataset = two_city_dataset();
        let ctx = ScoringContext::new(&dataset).unwrap();
        let mut far = city("Far", 10_000);
        far.distance_miles = 250.0;
        let readiness = ctx.adoption_readiness(&far);
        assert!((readiness.distance - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn priority_favors_the_stronger_city() {
        let mut strong = city("Strong", 100_000);
        strong.median_income = 120_000.0;
        strong.median_home_value = 800_000.0;
        strong.bachelor_degree_pct = 70.0;
        strong.single_family_pct = 60.0;
        strong.distance_miles = 5.0;
        let mut weak = city("Weak", 40_000);
        weak.median_income = 45_000.0;
        weak.median_home_value = 250_000.0;
        weak.bachelor_degree_pct = 18.0;
        weak.single_family_pct = 30.0;
        weak.distance_miles = 60.0;

        let dataset = Dataset::new(vec![strong, weak]).unwrap();
        let ctx = ScoringContext::new(&dataset).unwrap();
        let strong_score = ctx.priority_score(dataset.get("Strong").unwrap());
        let weak_score = ctx.priority_score(dataset.get("Weak").unwrap());

        assert!(strong_score.score > weak_score.score);
        // The strongest city maxes both economic inputs.
        assert!((strong_score.economic - 1.0).abs() < f64::EPSILON);
        assert!((strong_score.market_size - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dense_ranks_share_and_step() {
        let ranks = rank_priorities(&[0.9, 0.7, 0.9, 0.5]);
        assert_eq!(ranks, vec![1, 2, 1, 3]);
    }

    #[test]
    fn dense_ranks_are_contiguous() {
        let scores = [0.42, 0.87, 0.42, 0.91, 0.87, 0.10];
        let ranks = rank_priorities(&scores);
        let max_rank = ranks.iter().copied().max().unwrap();
        for rank in 1..=max_rank {
            assert!(ranks.contains(&rank), "rank {rank} missing from {ranks:?}");
        }
    }
}
