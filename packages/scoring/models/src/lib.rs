#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by the scoring engine.
//!
//! Factor values in these structs are already normalized to the 0.0-1.0
//! range by the scoring crate; nothing here re-checks them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Risk level for a single assessment factor, from 1 (low) to 3 (high).
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
pub enum RiskLevel {
    /// Level 1: No meaningful barrier.
    Low = 1,
    /// Level 2: Moderate barrier to adoption.
    Moderate = 2,
    /// Level 3: Significant barrier to adoption.
    High = 3,
}

impl RiskLevel {
    /// Returns the numeric value of this risk level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a risk level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-3.
    pub const fn from_value(value: u8) -> Result<Self, InvalidRiskLevelError> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::High),
            _ => Err(InvalidRiskLevelError { value }),
        }
    }
}

/// Error returned when attempting to create a [`RiskLevel`] from an invalid
/// numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRiskLevelError {
    /// The invalid risk value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidRiskLevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid risk level {}: expected 1-3", self.value)
    }
}

impl std::error::Error for InvalidRiskLevelError {}

/// Overall risk banding derived from the summed four-factor score.
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
pub enum RiskCategory {
    /// Combined score 4-6.
    Low,
    /// Combined score 7-9.
    Medium,
    /// Combined score 10-12.
    High,
}

impl RiskCategory {
    /// Bands a combined 4-12 risk score into a category.
    #[must_use]
    pub const fn from_overall(score: u8) -> Self {
        match score {
            10.. => Self::High,
            7..=9 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Four-factor adoption risk assessment for one city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrix {
    /// Income-based purchasing-power barrier.
    pub economic: RiskLevel,
    /// Charging and service-access barrier.
    pub infrastructure: RiskLevel,
    /// Education-based technology-adoption barrier.
    pub demographic: RiskLevel,
    /// Commute-pattern market-resistance barrier.
    pub market: RiskLevel,
    /// Sum of the four factor values, always 4-12.
    pub overall_score: u8,
    /// Banding of the overall score.
    pub category: RiskCategory,
}

impl RiskMatrix {
    /// Combines four factor levels into a matrix with its overall score and
    /// category.
    #[must_use]
    pub const fn new(
        economic: RiskLevel,
        infrastructure: RiskLevel,
        demographic: RiskLevel,
        market: RiskLevel,
    ) -> Self {
        let overall_score =
            economic.value() + infrastructure.value() + demographic.value() + market.value();
        Self {
            economic,
            infrastructure,
            demographic,
            market,
            overall_score,
            category: RiskCategory::from_overall(overall_score),
        }
    }
}

/// Adoption readiness factors and composite for one city.
///
/// Every factor is clamped to 0.0-1.0 before weighting, and the composite
/// is capped at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionReadiness {
    /// Median income relative to the state reference median.
    pub income: f64,
    /// Share of adults with a bachelor's degree or higher.
    pub education: f64,
    /// Share of single-family housing (home charging access).
    pub infrastructure: f64,
    /// Population relative to the largest city in the dataset.
    pub market: f64,
    /// Share of commuters who drive alone.
    pub transport: f64,
    /// Proximity to the metropolitan hub, floored at 0.5.
    pub distance: f64,
    /// Weighted composite, capped at 1.0.
    pub score: f64,
}

/// Rollout priority factors and composite for one city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityScore {
    /// Income and home value relative to the dataset maxima.
    pub economic: f64,
    /// Share of adults with a bachelor's degree or higher.
    pub education: f64,
    /// Single-family housing share blended with hub proximity.
    pub infrastructure: f64,
    /// Population relative to the largest city in the dataset.
    pub market_size: f64,
    /// Share of commuters who drive alone.
    pub transport: f64,
    /// Weighted composite priority score.
    pub score: f64,
}

/// Infrastructure readiness banding.
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
pub enum ReadinessTier {
    /// Readiness below 0.5: significant upgrades required.
    Low,
    /// Readiness 0.5 to 0.75: some investment needed.
    Medium,
    /// Readiness 0.75 and above: minimal barriers to deployment.
    High,
}

impl ReadinessTier {
    /// Bands a 0.0-1.0 readiness score into a tier.
    #[must_use]
    pub const fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            Self::High
        } else if score >= 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Charging and grid readiness assessment for one city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureAssessment {
    /// Home charging access from single-family housing share.
    pub home_charging: f64,
    /// Public charging potential from the urban classification.
    pub public_charging: f64,
    /// Infrastructure access from hub proximity, floored at 0.3.
    pub access: f64,
    /// Weighted charging infrastructure score.
    pub charging_score: f64,
    /// Community capacity to fund grid upgrades.
    pub economic_capacity: f64,
    /// Proximity to major transmission infrastructure, floored at 0.4.
    pub distance_factor: f64,
    /// Headroom before population demand saturates the local grid.
    pub demand_headroom: f64,
    /// Weighted grid capacity score, capped at 1.0.
    pub grid_score: f64,
    /// Combined readiness: 60% charging, 40% grid.
    pub readiness: f64,
    /// Banding of the combined readiness.
    pub tier: ReadinessTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_from_value_roundtrip() {
        for v in 1..=3u8 {
            let level = RiskLevel::from_value(v).unwrap();
            assert_eq!(level.value(), v);
        }
        assert!(RiskLevel::from_value(0).is_err());
        assert!(RiskLevel::from_value(4).is_err());
    }

    #[test]
    fn risk_category_boundaries() {
        assert_eq!(RiskCategory::from_overall(12), RiskCategory::High);
        assert_eq!(RiskCategory::from_overall(10), RiskCategory::High);
        assert_eq!(RiskCategory::from_overall(9), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_overall(7), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_overall(6), RiskCategory::Low);
        assert_eq!(RiskCategory::from_overall(4), RiskCategory::Low);
    }

    #[test]
    fn risk_matrix_sums_factor_values() {
        let worst = RiskMatrix::new(
            RiskLevel::High,
            RiskLevel::High,
            RiskLevel::High,
            RiskLevel::High,
        );
        assert_eq!(worst.overall_score, 12);
        assert_eq!(worst.category, RiskCategory::High);

        let best = RiskMatrix::new(
            RiskLevel::Low,
            RiskLevel::Low,
            RiskLevel::Low,
            RiskLevel::Low,
        );
        assert_eq!(best.overall_score, 4);
        assert_eq!(best.category, RiskCategory::Low);

        let mixed = RiskMatrix::new(
            RiskLevel::Moderate,
            RiskLevel::Moderate,
            RiskLevel::Low,
            RiskLevel::Moderate,
        );
        assert_eq!(mixed.overall_score, 7);
        assert_eq!(mixed.category, RiskCategory::Medium);
    }

    #[test]
    fn readiness_tier_boundaries() {
        assert_eq!(ReadinessTier::from_score(0.9), ReadinessTier::High);
        assert_eq!(ReadinessTier::from_score(0.75), ReadinessTier::High);
        assert_eq!(ReadinessTier::from_score(0.7499), ReadinessTier::Medium);
        assert_eq!(ReadinessTier::from_score(0.5), ReadinessTier::Medium);
        assert_eq!(ReadinessTier::from_score(0.4999), ReadinessTier::Low);
    }
}
