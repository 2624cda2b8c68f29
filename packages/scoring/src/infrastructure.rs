//! Charging and grid readiness assessment.
//!
//! Unlike readiness and priority, these scores need no dataset-wide
//! denominators: every factor is measured against fixed references, so a
//! city's assessment does not change when the dataset around it does.

use ev_atlas_city_models::CityRecord;
use ev_atlas_scoring_models::{InfrastructureAssessment, ReadinessTier};

use crate::DISTANCE_HORIZON_MILES;

/// Income at which a community is considered fully able to fund grid
/// upgrades, in dollars.
const GRID_INCOME_REFERENCE: f64 = 100_000.0;

/// Population at which local demand saturates the distribution grid.
const GRID_POPULATION_REFERENCE: f64 = 100_000.0;

/// Assesses charging infrastructure and grid capacity for one city.
///
/// The charging score blends home charging access (40%), public charging
/// potential from the urban classification (40%), and hub proximity (20%,
/// floored at 0.3). The grid score blends economic capacity (50%),
/// transmission proximity (30%, floored at 0.4), and demand headroom
/// (20%), capped at 1.0. Combined readiness weighs charging 60% and grid
/// 40%.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn assess_infrastructure(city: &CityRecord) -> InfrastructureAssessment {
    let home_charging = city.single_family_pct / 100.0;
    let public_charging = city.urban_class.public_charging_potential();
    let access = (1.0 - city.distance_miles / DISTANCE_HORIZON_MILES).max(0.3);
    let charging_score = home_charging * 0.4 + public_charging * 0.4 + access * 0.2;

    let economic_capacity = (city.median_income / GRID_INCOME_REFERENCE).min(1.0);
    let distance_factor = (1.0 - city.distance_miles / DISTANCE_HORIZON_MILES).max(0.4);
    let demand_headroom =
        1.0 - (f64::from(city.population) / GRID_POPULATION_REFERENCE).min(1.0);
    let grid_score =
        (economic_capacity * 0.5 + distance_factor * 0.3 + demand_headroom * 0.2).min(1.0);

    let readiness = charging_score * 0.6 + grid_score * 0.4;

    InfrastructureAssessment {
        home_charging,
        public_charging,
        access,
        charging_score,
        economic_capacity,
        distance_factor,
        demand_headroom,
        grid_score,
        readiness,
        tier: ReadinessTier::from_score(readiness),
    }
}
