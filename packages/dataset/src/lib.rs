#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Validated municipality datasets.
//!
//! Every input row is checked once, here, at the load boundary. Scoring and
//! forecast crates receive a [`Dataset`] that is guaranteed non-empty, free
//! of duplicate names, and within documented ranges, so none of them
//! re-validate per city.

pub mod reference;
pub mod tabular;

use std::collections::BTreeSet;
use std::str::FromStr as _;

use ev_atlas_city_models::{CityRecord, UrbanClass};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The input contained no city rows.
    #[error("Dataset is empty: at least one city is required")]
    Empty,

    /// Two rows share the same city name.
    #[error("Duplicate city name: {0}")]
    DuplicateCity(String),

    /// A population figure was zero.
    #[error("{city}: population must be greater than zero")]
    ZeroPopulation {
        /// City whose row failed validation.
        city: String,
    },

    /// A percentage field fell outside the 0-100 range.
    #[error("{city}: {field} is {value}, expected 0-100")]
    PercentageOutOfRange {
        /// City whose row failed validation.
        city: String,
        /// Name of the offending column.
        field: &'static str,
        /// The out-of-range value.
        value: f64,
    },

    /// A dollar or mileage field was negative.
    #[error("{city}: {field} is {value}, expected a non-negative value")]
    NegativeValue {
        /// City whose row failed validation.
        city: String,
        /// Name of the offending column.
        field: &'static str,
        /// The negative value.
        value: f64,
    },

    /// A numeric field was NaN or infinite.
    #[error("{city}: {field} is not a finite number")]
    NotFinite {
        /// City whose row failed validation.
        city: String,
        /// Name of the offending column.
        field: &'static str,
    },

    /// An urban classification string did not match any known class.
    #[error("{city}: unknown urban class {value:?}")]
    UnknownUrbanClass {
        /// City whose row failed validation.
        city: String,
        /// The unrecognized classification string.
        value: String,
    },

    /// A target year that does not come after its base year.
    #[error("Target year {target_year} must be after base year {base_year}")]
    InvalidTargetYears {
        /// Year the baseline was measured.
        base_year: i32,
        /// Year the target is due.
        target_year: i32,
    },

    /// Dataset TOML failed to parse.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV read or parse failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One unvalidated input row, as it appears in TOML and CSV sources.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCity {
    pub name: String,
    pub population: u32,
    pub median_income: f64,
    pub bachelor_degree_pct: f64,
    pub drive_alone_pct: f64,
    pub single_family_pct: f64,
    pub median_home_value: f64,
    pub public_transit_pct: f64,
    pub urban_class: String,
    pub distance_miles: f64,
}

impl RawCity {
    /// Converts a raw row into a [`CityRecord`], resolving the urban
    /// classification string.
    pub(crate) fn into_record(self) -> Result<CityRecord, DatasetError> {
        let urban_class = UrbanClass::from_str(&self.urban_class).map_err(|_| {
            DatasetError::UnknownUrbanClass {
                city: self.name.clone(),
                value: self.urban_class.clone(),
            }
        })?;

        Ok(CityRecord {
            name: self.name,
            population: self.population,
            median_income: self.median_income,
            bachelor_degree_pct: self.bachelor_degree_pct,
            drive_alone_pct: self.drive_alone_pct,
            single_family_pct: self.single_family_pct,
            median_home_value: self.median_home_value,
            public_transit_pct: self.public_transit_pct,
            urban_class,
            distance_miles: self.distance_miles,
        })
    }
}

/// Dataset-wide figures computed once at load and shared by every
/// downstream scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAggregates {
    /// Largest municipal population.
    pub max_population: u32,
    /// Highest median household income in dollars.
    pub max_income: f64,
    /// Highest median home value in dollars.
    pub max_home_value: f64,
    /// Longest hub distance in miles.
    pub max_distance_miles: f64,
    /// Combined resident population.
    pub total_population: u64,
}

impl DatasetAggregates {
    fn compute(cities: &[CityRecord]) -> Self {
        Self {
            max_population: cities.iter().map(|c| c.population).max().unwrap_or(0),
            max_income: cities.iter().map(|c| c.median_income).fold(0.0, f64::max),
            max_home_value: cities
                .iter()
                .map(|c| c.median_home_value)
                .fold(0.0, f64::max),
            max_distance_miles: cities.iter().map(|c| c.distance_miles).fold(0.0, f64::max),
            total_population: cities.iter().map(|c| u64::from(c.population)).sum(),
        }
    }
}

/// A validated, immutable collection of city records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    cities: Vec<CityRecord>,
    aggregates: DatasetAggregates,
}

impl Dataset {
    /// Validates a set of city records and freezes it into a dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty, a name appears twice, or any
    /// row has a zero population, an out-of-range percentage, a negative
    /// dollar/mileage value, or a non-finite number.
    pub fn new(cities: Vec<CityRecord>) -> Result<Self, DatasetError> {
        if cities.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = BTreeSet::new();
        for city in &cities {
            if !seen.insert(city.name.as_str()) {
                return Err(DatasetError::DuplicateCity(city.name.clone()));
            }
            validate_city(city)?;
        }

        let aggregates = DatasetAggregates::compute(&cities);
        log::debug!("Validated dataset with {} cities", cities.len());

        Ok(Self { cities, aggregates })
    }

    /// Returns the validated city records, in input order.
    #[must_use]
    pub fn cities(&self) -> &[CityRecord] {
        &self.cities
    }

    /// Returns the dataset-wide aggregate figures.
    #[must_use]
    pub const fn aggregates(&self) -> &DatasetAggregates {
        &self.aggregates
    }

    /// Returns the number of cities in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the dataset has no cities. Always `false` for a
    /// successfully constructed dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Looks up a city by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CityRecord> {
        self.cities.iter().find(|c| c.name == name)
    }
}

fn validate_city(city: &CityRecord) -> Result<(), DatasetError> {
    if city.population == 0 {
        return Err(DatasetError::ZeroPopulation {
            city: city.name.clone(),
        });
    }

    let non_negative = [
        ("median_income", city.median_income),
        ("median_home_value", city.median_home_value),
        ("distance_miles", city.distance_miles),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() {
            return Err(DatasetError::NotFinite {
                city: city.name.clone(),
                field,
            });
        }
        if value < 0.0 {
            return Err(DatasetError::NegativeValue {
                city: city.name.clone(),
                field,
                value,
            });
        }
    }

    let percentages = [
        ("bachelor_degree_pct", city.bachelor_degree_pct),
        ("drive_alone_pct", city.drive_alone_pct),
        ("single_family_pct", city.single_family_pct),
        ("public_transit_pct", city.public_transit_pct),
    ];
    for (field, value) in percentages {
        if !value.is_finite() {
            return Err(DatasetError::NotFinite {
                city: city.name.clone(),
                field,
            });
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(DatasetError::PercentageOutOfRange {
                city: city.name.clone(),
                field,
                value,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
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

    #[test]
    fn rejects_empty_dataset() {
        assert!(matches!(Dataset::new(vec![]), Err(DatasetError::Empty)));
    }

    #[test]
    fn rejects_duplicate_city_names() {
        let result = Dataset::new(vec![city("Lowell", 114_296), city("Lowell", 114_296)]);
        assert!(matches!(result, Err(DatasetError::DuplicateCity(name)) if name == "Lowell"));
    }

    #[test]
    fn rejects_zero_population() {
        let result = Dataset::new(vec![city("Ghost Town", 0)]);
        assert!(matches!(result, Err(DatasetError::ZeroPopulation { .. })));
    }

    #[test]
    fn rejects_percentage_out_of_range() {
        let mut bad = city("Quincy", 101_636);
        bad.bachelor_degree_pct = 104.2;
        let result = Dataset::new(vec![bad]);
        assert!(matches!(
            result,
            Err(DatasetError::PercentageOutOfRange {
                field: "bachelor_degree_pct",
                ..
            })
        ));

        let mut negative = city("Revere", 59_933);
        negative.public_transit_pct = -1.0;
        assert!(matches!(
            Dataset::new(vec![negative]),
            Err(DatasetError::PercentageOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_negative_money_and_distance() {
        let mut bad = city("Malden", 66_263);
        bad.median_home_value = -489_600.0;
        assert!(matches!(
            Dataset::new(vec![bad]),
            Err(DatasetError::NegativeValue {
                field: "median_home_value",
                ..
            })
        ));

        let mut bad = city("Lynn", 94_201);
        bad.distance_miles = -10.0;
        assert!(matches!(
            Dataset::new(vec![bad]),
            Err(DatasetError::NegativeValue {
                field: "distance_miles",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut bad = city("Brockton", 95_777);
        bad.median_income = f64::NAN;
        assert!(matches!(
            Dataset::new(vec![bad]),
            Err(DatasetError::NotFinite {
                field: "median_income",
                ..
            })
        ));
    }

    #[test]
    fn computes_aggregates() {
        let mut a = city("Newton", 88_317);
        a.median_income = 184_989.0;
        a.median_home_value = 1_227_800.0;
        a.distance_miles = 7.0;
        let mut b = city("Worcester", 207_621);
        b.median_income = 67_544.0;
        b.median_home_value = 285_400.0;
        b.distance_miles = 43.0;

        let dataset = Dataset::new(vec![a, b]).unwrap();
        let agg = dataset.aggregates();
        assert_eq!(agg.max_population, 207_621);
        assert!((agg.max_income - 184_989.0).abs() < f64::EPSILON);
        assert!((agg.max_home_value - 1_227_800.0).abs() < f64::EPSILON);
        assert!((agg.max_distance_miles - 43.0).abs() < f64::EPSILON);
        assert_eq!(agg.total_population, 295_938);
        assert_eq!(dataset.get("Newton").map(|c| c.population), Some(88_317));
    }
}
