//! National emission targets and the reference trajectory
//!
//! All levels are in Mt CO2e.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Projected emissions under enacted policy, relative to the 1990 baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTrajectory {
    /// Emissions in 1990
    pub baseline_1990: f64,
    /// Latest observed emissions
    pub current_level: f64,
    /// Year of the latest observation
    pub current_year: u16,
    /// Projected emissions in the reference year without further measures
    pub reference_level: f64,
    /// Year of the projection
    pub reference_year: u16,
}

impl ReferenceTrajectory {
    /// Norwegian national totals used by the dashboard
    pub const NORWAY: ReferenceTrajectory = ReferenceTrajectory {
        baseline_1990: 51.0,
        current_level: 46.6,
        current_year: 2023,
        reference_level: 31.7,
        reference_year: 2030,
    };

    /// Cut from the baseline already delivered by the reference projection
    #[inline]
    #[must_use]
    pub fn reference_contribution(&self) -> f64 {
        self.baseline_1990 - self.reference_level
    }
}

impl Default for ReferenceTrajectory {
    fn default() -> Self {
        Self::NORWAY
    }
}

/// Key into the fixed set of target scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TargetKey {
    /// 55 % below 1990 by 2030
    #[serde(rename = "cut55_2030")]
    Cut55By2030,
    /// 70 % below 1990 by 2035
    #[serde(rename = "cut70_2035")]
    Cut70By2035,
    /// 75 % below 1990 by 2035
    #[serde(rename = "cut75_2035")]
    Cut75By2035,
    /// 90 % below 1990 by 2050
    #[serde(rename = "cut90_2050")]
    Cut90By2050,
}

impl TargetKey {
    /// Every target, in display order
    pub const ALL: [TargetKey; 4] = [
        TargetKey::Cut55By2030,
        TargetKey::Cut70By2035,
        TargetKey::Cut75By2035,
        TargetKey::Cut90By2050,
    ];

    /// Stable machine key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            TargetKey::Cut55By2030 => "cut55_2030",
            TargetKey::Cut70By2035 => "cut70_2035",
            TargetKey::Cut75By2035 => "cut75_2035",
            TargetKey::Cut90By2050 => "cut90_2050",
        }
    }

    /// Scenario definition for this key
    #[must_use]
    pub const fn definition(self) -> TargetDefinition {
        match self {
            TargetKey::Cut55By2030 => TargetDefinition::new("55 % kutt innen 2030", 2030, 0.55),
            TargetKey::Cut70By2035 => TargetDefinition::new("70 % kutt innen 2035", 2035, 0.70),
            TargetKey::Cut75By2035 => TargetDefinition::new("75 % kutt innen 2035", 2035, 0.75),
            TargetKey::Cut90By2050 => TargetDefinition::new("90 % kutt innen 2050", 2050, 0.90),
        }
    }

    /// Resolve into a scenario against a baseline
    #[must_use]
    pub fn scenario(self, trajectory: &ReferenceTrajectory) -> TargetScenario {
        TargetScenario::from_definition(self, self.definition(), trajectory.baseline_1990)
    }
}

impl Default for TargetKey {
    fn default() -> Self {
        TargetKey::Cut70By2035
    }
}

impl Display for TargetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TargetKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetKey::ALL
            .into_iter()
            .find(|t| t.key() == s.trim())
            .ok_or_else(|| CatalogError::UnknownTarget(s.to_string()))
    }
}

/// Static part of a target: label, year and reduction fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDefinition {
    /// Display label
    pub label: &'static str,
    /// Target year
    pub year: u16,
    /// Fraction below the 1990 baseline
    pub reduction_fraction: f64,
}

impl TargetDefinition {
    const fn new(label: &'static str, year: u16, reduction_fraction: f64) -> Self {
        Self {
            label,
            year,
            reduction_fraction,
        }
    }
}

/// Target scenario with its absolute emission level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetScenario {
    /// Scenario key
    pub key: TargetKey,
    /// Display label
    pub label: &'static str,
    /// Target year
    pub year: u16,
    /// Fraction below the 1990 baseline
    pub reduction_fraction: f64,
    /// `baseline_1990 * (1 - reduction_fraction)`
    pub level: f64,
}

impl TargetScenario {
    fn from_definition(key: TargetKey, def: TargetDefinition, baseline_1990: f64) -> Self {
        Self {
            key,
            label: def.label,
            year: def.year,
            reduction_fraction: def.reduction_fraction,
            level: baseline_1990 * (1.0 - def.reduction_fraction),
        }
    }
}
