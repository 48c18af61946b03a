//! Conflict detection
//!
//! Advisory only: a warning never changes the selection or the totals.

use klimakur_catalog::{ConflictGroup, MeasureId};
use serde::Serialize;
use std::collections::BTreeSet;

/// Two or more overlapping measures selected together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictWarning {
    /// Group name
    pub group: String,
    /// Selected ids from the group, sorted
    pub ids: Vec<MeasureId>,
    /// Why the measures overlap
    pub rationale: String,
}

impl ConflictWarning {
    /// Deduplication key: sorted ids joined by `+`
    #[must_use]
    pub fn key(&self) -> String {
        self.ids.iter().map(MeasureId::as_str).collect::<Vec<_>>().join("+")
    }
}

/// Warnings for every group with at least two selected ids
///
/// Ids are taken from the code prefix of each selected title. Output follows
/// group order; warnings with the same id combination are reported once.
#[must_use]
pub fn detect_conflicts<'a>(
    selection: impl IntoIterator<Item = &'a str>,
    groups: &[ConflictGroup],
) -> Vec<ConflictWarning> {
    let selected: BTreeSet<MeasureId> = selection.into_iter().filter_map(MeasureId::from_title).collect();

    let mut seen = BTreeSet::new();
    let mut warnings = Vec::new();

    for group in groups {
        let ids: Vec<MeasureId> = group.ids().iter().filter(|id| selected.contains(*id)).cloned().collect();
        if ids.len() < 2 {
            continue;
        }
        let warning = ConflictWarning {
            group: group.name().to_string(),
            ids,
            rationale: group.rationale().to_string(),
        };
        if seen.insert(warning.key()) {
            tracing::trace!(key = %warning.key(), group = %warning.group, "conflict");
            warnings.push(warning);
        }
    }

    warnings
}
