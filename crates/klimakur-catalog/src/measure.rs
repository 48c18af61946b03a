//! Measure records - the immutable rows of the catalog
//!
//! Provides [`MeasureRecord`] together with its identifier, sector and
//! unit-cost types.

use crate::error::{CatalogError, CatalogResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// kt per Mt; potentials are stored in kt and displayed in Mt
pub const KT_PER_MT: f64 = 1000.0;

/// Leading measure code: one to three capitals, two or three digits,
/// optional numeric suffix ("T01", "AT05", "J04-2").
static MEASURE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z]{1,3}[0-9]{2,3}(?:-[0-9]+)?)(?:\s|$)").expect("measure code pattern is valid")
});

/// Short measure code extracted from a title
///
/// Not unique across the catalog: the same code can appear in more than
/// one sector, and two different titles can share a code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasureId(String);

impl MeasureId {
    /// Create identifier from a raw code
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Extract the leading code from a title
    ///
    /// Returns `None` for titles without a code prefix
    /// (e.g. "Diverse nulltiltak").
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        MEASURE_CODE
            .captures(title.trim_start())
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    /// Code as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MeasureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sector a measure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Veitransport
    RoadTransport,
    /// Sjøfart, fiske og havbruk
    Maritime,
    /// Annen transport (ikke-veigående m.m.)
    OtherTransport,
    /// Jordbruk
    Agriculture,
    /// Industri og bergverk
    Industry,
    /// Petroleum (ikke-kvotepliktig)
    Petroleum,
    /// Karbonfangst og -lagring
    Ccs,
    /// Andre tiltak
    Other,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 8] = [
        Category::RoadTransport,
        Category::Maritime,
        Category::OtherTransport,
        Category::Agriculture,
        Category::Industry,
        Category::Petroleum,
        Category::Ccs,
        Category::Other,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::RoadTransport => "Veitransport",
            Category::Maritime => "Sjøfart/fiske/havbruk",
            Category::OtherTransport => "Annen transport",
            Category::Agriculture => "Jordbruk",
            Category::Industry => "Industri/bergverk",
            Category::Petroleum => "Petroleum",
            Category::Ccs => "CCS",
            Category::Other => "Andre tiltak",
        }
    }

    /// Stable machine key (matches the serde representation)
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Category::RoadTransport => "road_transport",
            Category::Maritime => "maritime",
            Category::OtherTransport => "other_transport",
            Category::Agriculture => "agriculture",
            Category::Industry => "industry",
            Category::Petroleum => "petroleum",
            Category::Ccs => "ccs",
            Category::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    /// Accepts either the machine key or the display label (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == needle || c.label().to_lowercase() == needle)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Assessed unit cost of a measure, NOK per tonne CO2e
///
/// `Known(0.0)` is a real assessment (a zero-cost measure) and is distinct
/// from `Unknown`, which marks the absence of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCost {
    /// Assessed cost
    Known(f64),
    /// No assessed cost
    Unknown,
}

impl UnitCost {
    /// Known value, if any
    #[inline]
    #[must_use]
    pub fn known(self) -> Option<f64> {
        match self {
            UnitCost::Known(v) => Some(v),
            UnitCost::Unknown => None,
        }
    }

    /// True when no cost has been assessed
    #[inline]
    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, UnitCost::Unknown)
    }
}

/// One immutable row of the measure catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureRecord {
    id: Option<MeasureId>,
    title: String,
    category: Category,
    potential_kt: f64,
    cost: UnitCost,
    cost_range_label: Option<String>,
}

impl MeasureRecord {
    /// Create a measure, deriving its id from the title
    ///
    /// # Errors
    /// - [`CatalogError::EmptyTitle`] for a blank title
    /// - [`CatalogError::InvalidPotential`] for a negative or non-finite potential
    /// - [`CatalogError::InvalidCost`] for a negative or non-finite known cost
    pub fn new(
        title: impl Into<String>,
        category: Category,
        potential_kt: f64,
        cost: UnitCost,
    ) -> CatalogResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        if !potential_kt.is_finite() || potential_kt < 0.0 {
            return Err(CatalogError::invalid_potential(title, potential_kt));
        }
        if let UnitCost::Known(v) = cost {
            if !v.is_finite() || v < 0.0 {
                return Err(CatalogError::invalid_cost(title, v));
            }
        }

        Ok(Self {
            id: MeasureId::from_title(&title),
            title,
            category,
            potential_kt,
            cost,
            cost_range_label: None,
        })
    }

    /// Build from compiled-in data; checked by [`crate::validate`] instead
    pub(crate) fn from_static(
        title: &'static str,
        category: Category,
        potential_kt: f64,
        cost: UnitCost,
        range: &'static str,
    ) -> Self {
        Self {
            id: MeasureId::from_title(title),
            title: title.to_string(),
            category,
            potential_kt,
            cost,
            cost_range_label: Some(range.to_string()),
        }
    }

    /// With original textual cost range
    #[inline]
    #[must_use]
    pub fn with_cost_range_label(mut self, label: impl Into<String>) -> Self {
        self.cost_range_label = Some(label.into());
        self
    }

    /// Leading code, if the title carries one
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<&MeasureId> {
        self.id.as_ref()
    }

    /// Full title (includes the code prefix)
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title without the leading code
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.id {
            Some(id) => self
                .title
                .trim_start()
                .get(id.as_str().len()..)
                .map_or("", str::trim_start),
            None => &self.title,
        }
    }

    /// Sector
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Potential in kt CO2e
    #[inline]
    #[must_use]
    pub fn potential_kt(&self) -> f64 {
        self.potential_kt
    }

    /// Potential in Mt CO2e
    #[inline]
    #[must_use]
    pub fn potential_mt(&self) -> f64 {
        self.potential_kt / KT_PER_MT
    }

    /// Assessed unit cost
    #[inline]
    #[must_use]
    pub fn cost(&self) -> UnitCost {
        self.cost
    }

    /// Original cost range text, display only
    #[inline]
    #[must_use]
    pub fn cost_range_label(&self) -> Option<&str> {
        self.cost_range_label.as_deref()
    }
}
