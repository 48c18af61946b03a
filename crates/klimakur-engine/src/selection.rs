//! Tri-state selection summary for the visible rows

use crate::params::ParameterStore;
use klimakur_catalog::MeasureRecord;
use serde::Serialize;

/// How much of the visible set is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Every visible row is selected
    All,
    /// No visible row is selected, or nothing is visible
    None,
    /// Some but not all visible rows are selected
    Some,
}

/// Summarize selection over the visible rows
#[must_use]
pub fn selection_state(visible: &[&MeasureRecord], store: &ParameterStore) -> SelectionState {
    let selected = visible.iter().filter(|m| store.is_selected(m.title())).count();
    match selected {
        0 => SelectionState::None,
        n if n == visible.len() => SelectionState::All,
        _ => SelectionState::Some,
    }
}
