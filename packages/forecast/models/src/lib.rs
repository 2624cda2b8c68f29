#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by the forecast engine.

use serde::{Deserialize, Serialize};

/// One city's share of the statewide adoption totals, plus the compound
/// growth rate implied by reaching its target share on schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityAllocation {
    /// Share of the statewide population living in this city.
    pub population_weight: f64,
    /// Share of the dataset's combined adoption readiness held by this city.
    pub readiness_weight: f64,
    /// Blended share used to split statewide totals: 70% population,
    /// 30% readiness.
    pub allocation_weight: f64,
    /// Vehicles allocated from the statewide baseline, rounded down.
    pub current_estimate: u64,
    /// Vehicles allocated from the statewide target, rounded down.
    pub target_share: u64,
    /// Annual compound growth rate implied by the two shares.
    pub growth_rate: f64,
}

/// A projected vehicle count for one future year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Calendar year of the projection.
    pub year: i32,
    /// Projected vehicles on the road, rounded down.
    pub vehicles: u64,
}
