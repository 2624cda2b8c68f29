#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Municipality demographic records, urban classification, and statewide
//! adoption target types.
//!
//! These are the input types for the whole ev-atlas system. Every scoring
//! and forecast crate consumes [`CityRecord`] rows that have already passed
//! dataset validation; nothing downstream re-checks ranges.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Density classification for a municipality.
///
/// Drives the public charging component of infrastructure scoring: denser
/// places support more shared charging infrastructure per resident.
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
pub enum UrbanClass {
    /// Dense metro core (Boston, Cambridge, Somerville tier).
    UrbanCore,
    /// Established urban center outside the core.
    Urban,
    /// Lower-density suburban municipality.
    Suburban,
}

impl UrbanClass {
    /// Returns the public charging potential for this density class, on a
    /// 0.0 to 1.0 scale.
    #[must_use]
    pub const fn public_charging_potential(self) -> f64 {
        match self {
            Self::UrbanCore => 0.9,
            Self::Urban => 0.7,
            Self::Suburban => 0.5,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::UrbanCore, Self::Urban, Self::Suburban]
    }
}

/// One municipality's demographic profile, immutable after dataset load.
///
/// Population figures are Census Vintage 2024 estimates; income, education,
/// commute, and housing values come from ACS 2023 5-year tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    /// Municipality name, unique within a dataset.
    pub name: String,
    /// Resident population estimate. Always greater than zero.
    pub population: u32,
    /// Median household income in dollars.
    pub median_income: f64,
    /// Percentage of adults holding a bachelor's degree or higher (0-100).
    pub bachelor_degree_pct: f64,
    /// Percentage of commuters who drive alone (0-100).
    pub drive_alone_pct: f64,
    /// Percentage of housing stock that is single-family (0-100).
    pub single_family_pct: f64,
    /// Median home value in dollars.
    pub median_home_value: f64,
    /// Percentage of commuters using public transit (0-100).
    pub public_transit_pct: f64,
    /// Density classification.
    pub urban_class: UrbanClass,
    /// Road distance to the metropolitan hub in miles.
    pub distance_miles: f64,
}

/// Statewide adoption baseline and target, anchoring every forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTargets {
    /// Estimated vehicles on the road in the base year.
    pub current_baseline: u64,
    /// Official statewide adoption target for the target year.
    pub official_target: u64,
    /// Year the baseline was measured.
    pub base_year: i32,
    /// Year the target is due.
    pub target_year: i32,
}

impl StateTargets {
    /// Returns the number of years between baseline and target as a float,
    /// for use as a growth-rate exponent.
    ///
    /// Callers must have validated `target_year > base_year`; the forecast
    /// engine rejects targets where this is not positive.
    #[must_use]
    pub const fn years_to_target(&self) -> f64 {
        (self.target_year - self.base_year) as f64
    }

    /// Returns the default projection horizon: one, three, and five years
    /// past the base year.
    #[must_use]
    pub const fn forecast_years(&self) -> [i32; 3] {
        [self.base_year + 1, self.base_year + 3, self.base_year + 5]
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn charging_potential_decreases_with_density() {
        let potentials: Vec<f64> = UrbanClass::all()
            .iter()
            .map(|class| class.public_charging_potential())
            .collect();
        for pair in potentials.windows(2) {
            assert!(
                pair[0] > pair[1],
                "expected strictly decreasing potentials, got {potentials:?}"
            );
        }
    }

    #[test]
    fn urban_class_string_roundtrip() {
        for class in UrbanClass::all() {
            let parsed = UrbanClass::from_str(class.as_ref()).unwrap();
            assert_eq!(parsed, *class);
        }
        assert!(UrbanClass::from_str("RURAL").is_err());
    }

    #[test]
    fn years_to_target_spans_horizon() {
        let targets = StateTargets {
            current_baseline: 77_025,
            official_target: 200_000,
            base_year: 2024,
            target_year: 2025,
        };
        assert!((targets.years_to_target() - 1.0).abs() < f64::EPSILON);
        assert_eq!(targets.forecast_years(), [2025, 2027, 2029]);
    }
}
