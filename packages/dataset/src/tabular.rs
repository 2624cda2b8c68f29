//! CSV dataset loading.
//!
//! Expects a header row matching the reference column names:
//! `name,population,median_income,bachelor_degree_pct,drive_alone_pct,single_family_pct,median_home_value,public_transit_pct,urban_class,distance_miles`.

use std::io::Read;
use std::path::Path;

use crate::{Dataset, DatasetError, RawCity};

/// Loads and validates a dataset from a CSV file on disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a row fails to parse, or
/// the resulting dataset fails validation.
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let reader = csv::Reader::from_path(path)?;
    let dataset = read_csv(reader)?;
    log::info!("Loaded {} cities from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Reads and validates dataset rows from an already-open CSV reader.
///
/// # Errors
///
/// Returns an error if a row fails to parse or the resulting dataset fails
/// validation.
pub fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Dataset, DatasetError> {
    let mut cities = Vec::new();
    for row in reader.deserialize::<RawCity>() {
        cities.push(row?.into_record()?);
    }
    Dataset::new(cities)
}
