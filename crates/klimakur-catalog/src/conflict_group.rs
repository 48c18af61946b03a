//! Declared overlaps between measures
//!
//! Measures in one group draw on the same emissions or the same limited
//! resource; their potentials do not add up linearly when selected together.

use crate::measure::MeasureId;
use serde::Serialize;

/// Set of mutually overlapping measures with the reason they overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictGroup {
    name: String,
    ids: Vec<MeasureId>,
    rationale: String,
}

impl ConflictGroup {
    /// Create group from codes
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, ids: I, rationale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids: Vec<MeasureId> = ids.into_iter().map(|s| MeasureId::new(s)).collect();
        ids.sort();
        ids.dedup();
        Self {
            name: name.into(),
            ids,
            rationale: rationale.into(),
        }
    }

    /// Short group name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member codes, sorted and unique
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[MeasureId] {
        &self.ids
    }

    /// Human-readable reason
    #[inline]
    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    /// True if the code is a member
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &MeasureId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Overlap groups for the Klimakur 2030 catalog
    #[must_use]
    pub fn klimakur() -> Vec<ConflictGroup> {
        vec![
            ConflictGroup::new(
                "avansert biodrivstoff",
                ["T13", "S03", "AT05"],
                "Tiltakene konkurrerer om den samme begrensede tilgangen på avansert biodrivstoff.",
            ),
            ConflictGroup::new(
                "personbiler",
                ["T01", "T05"],
                "Færre kjørte kilometer og elektrifisering av nye personbiler kutter delvis de samme utslippene.",
            ),
            ConflictGroup::new(
                "varebiler",
                ["T03", "T06", "T07"],
                "Bedre logistikk og elektrifisering av varebiler virker på det samme transportarbeidet.",
            ),
            ConflictGroup::new(
                "lastebiler",
                ["T04", "T08", "T12"],
                "Effektivisering, nullutslipps- og biogasslastebiler reduserer utslipp fra den samme tungtransporten.",
            ),
            ConflictGroup::new(
                "industriell energiomlegging",
                ["I02", "I03", "I04", "I05"],
                "Konverteringstiltakene erstatter den samme fossile energibruken i annen industri og bergverk.",
            ),
            ConflictGroup::new(
                "husdyrgjødsel",
                ["J03", "J04"],
                "Biogass fra husdyrgjødsel og øvrige gjødseltiltak behandler den samme gjødselmengden.",
            ),
            ConflictGroup::new(
                "byggvarme",
                ["O01", "O02", "E04"],
                "Utfasing av olje og gass i bygg og fjernvarme overlapper for den samme varmeleveransen.",
            ),
        ]
    }
}
