//! Four-factor adoption risk banding.
//!
//! Thresholds follow the published research the dashboard methodology
//! cites: Federal Reserve consumer finance bands for purchasing power,
//! NREL infrastructure analyses for charging access, and ICCT modal-choice
//! studies for market resistance.

use ev_atlas_city_models::{CityRecord, UrbanClass};
use ev_atlas_scoring_models::{RiskLevel, RiskMatrix};

/// Bands purchasing-power risk by median household income.
#[must_use]
pub fn economic_risk(median_income: f64) -> RiskLevel {
    if median_income < 50_000.0 {
        RiskLevel::High
    } else if median_income < 75_000.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Bands charging and service-access risk.
///
/// Starts at low risk and steps up once for each challenge present: scarce
/// single-family housing (under 30%), a long haul to the hub (over 40
/// miles), and urban-core parking density. Capped at high.
#[must_use]
pub fn infrastructure_risk(
    single_family_pct: f64,
    distance_miles: f64,
    urban_class: UrbanClass,
) -> RiskLevel {
    let mut score: u8 = 1;
    if single_family_pct < 30.0 {
        score += 1;
    }
    if distance_miles > 40.0 {
        score += 1;
    }
    if urban_class == UrbanClass::UrbanCore {
        score += 1;
    }

    match score.min(3) {
        1 => RiskLevel::Low,
        2 => RiskLevel::Moderate,
        _ => RiskLevel::High,
    }
}

/// Bands technology-adoption risk by educational attainment.
#[must_use]
pub fn demographic_risk(bachelor_degree_pct: f64) -> RiskLevel {
    if bachelor_degree_pct < 25.0 {
        RiskLevel::High
    } else if bachelor_degree_pct < 45.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Bands market-resistance risk from commute patterns.
///
/// Heavy transit use combined with little solo driving marks a community
/// that may resist private vehicle ownership altogether.
#[must_use]
pub fn market_risk(public_transit_pct: f64, drive_alone_pct: f64) -> RiskLevel {
    if public_transit_pct > 20.0 && drive_alone_pct < 50.0 {
        RiskLevel::High
    } else if public_transit_pct > 10.0 || drive_alone_pct < 70.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Assesses all four risk factors for one city.
#[must_use]
pub fn risk_matrix(city: &CityRecord) -> RiskMatrix {
    RiskMatrix::new(
        economic_risk(city.median_income),
        infrastructure_risk(city.single_family_pct, city.distance_miles, city.urban_class),
        demographic_risk(city.bachelor_degree_pct),
        market_risk(city.public_transit_pct, city.drive_alone_pct),
    )
}
