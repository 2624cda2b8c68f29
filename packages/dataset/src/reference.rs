//! Embedded Massachusetts reference dataset.
//!
//! The data ships inside the binary via [`include_str!`] so a default
//! evaluation needs no files on disk. Population figures are US Census
//! Vintage 2024 estimates; income, education, commute, and housing values
//! come from ACS 2023 5-year tables; the adoption targets come from the
//! Mass.gov 2024 Climate Report Card and the MA Clean Energy and Climate
//! Plan.

use ev_atlas_city_models::StateTargets;
use serde::Deserialize;

use crate::{Dataset, DatasetError, RawCity};

/// Reference TOML embedded at compile time.
const MASSACHUSETTS_TOML: &str = include_str!("../data/massachusetts.toml");

/// Number of cities in the reference dataset (used in tests).
#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 20;

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    targets: RawTargets,
    cities: Vec<RawCity>,
}

#[derive(Debug, Deserialize)]
struct RawTargets {
    current_baseline: u64,
    official_target: u64,
    base_year: i32,
    target_year: i32,
}

fn parse_reference() -> Result<(Dataset, StateTargets), DatasetError> {
    let file: ReferenceFile = toml::de::from_str(MASSACHUSETTS_TOML)?;

    if file.targets.target_year <= file.targets.base_year {
        return Err(DatasetError::InvalidTargetYears {
            base_year: file.targets.base_year,
            target_year: file.targets.target_year,
        });
    }
    let targets = StateTargets {
        current_baseline: file.targets.current_baseline,
        official_target: file.targets.official_target,
        base_year: file.targets.base_year,
        target_year: file.targets.target_year,
    };

    let cities = file
        .cities
        .into_iter()
        .map(RawCity::into_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((Dataset::new(cities)?, targets))
}

/// Returns the embedded Massachusetts reference dataset.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the data ships with the crate).
#[must_use]
pub fn massachusetts() -> Dataset {
    let (dataset, _) = parse_reference()
        .unwrap_or_else(|e| panic!("Failed to parse embedded massachusetts.toml: {e}"));
    dataset
}

/// Returns the statewide adoption targets shipped with the reference
/// dataset.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the data ships with the crate).
#[must_use]
pub fn massachusetts_targets() -> StateTargets {
    let (_, targets) = parse_reference()
        .unwrap_or_else(|e| panic!("Failed to parse embedded massachusetts.toml: {e}"));
    targets
}
