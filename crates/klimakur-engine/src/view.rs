//! Filter and sort pipeline
//!
//! Decides which catalog rows are displayed and in which order. Never
//! consults the selection.

use crate::collate::compare_nb;
use crate::cost::resolve_unit_cost;
use crate::params::{ParameterStore, SortColumn, SortDirection};
use crate::row::KT_NOK_PER_BILLION;
use klimakur_catalog::{Catalog, MeasureRecord};
use std::cmp::Ordering;

/// True if the measure passes every active filter
#[must_use]
pub fn is_visible(measure: &MeasureRecord, store: &ParameterStore) -> bool {
    if !store.filter_category().matches(measure.category()) {
        return false;
    }
    if !store.filter_cost_type().matches(measure.cost()) {
        return false;
    }
    // Whitespace-only search is inactive; otherwise the text is matched as typed
    let needle = store.search_text();
    needle.trim().is_empty() || measure.title().to_lowercase().contains(&needle.to_lowercase())
}

/// Catalog indices of visible rows, in display order
#[must_use]
pub fn visible_indices(catalog: &Catalog, store: &ParameterStore) -> Vec<usize> {
    let mut visible: Vec<(usize, &MeasureRecord)> = catalog
        .iter()
        .enumerate()
        .filter(|(_, m)| is_visible(m, store))
        .collect();

    if let Some(sort) = store.sort() {
        visible.sort_by(|(_, a), (_, b)| {
            let ord = compare_by(sort.column, a, b, store);
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    visible.into_iter().map(|(i, _)| i).collect()
}

/// Visible rows, in display order
#[must_use]
pub fn visible_measures<'a>(catalog: &'a Catalog, store: &ParameterStore) -> Vec<&'a MeasureRecord> {
    visible_indices(catalog, store)
        .into_iter()
        .filter_map(|i| catalog.get(i))
        .collect()
}

fn compare_by(column: SortColumn, a: &MeasureRecord, b: &MeasureRecord, store: &ParameterStore) -> Ordering {
    match column {
        SortColumn::Title => compare_nb(a.title(), b.title()),
        SortColumn::Category => compare_nb(a.category().label(), b.category().label()),
        SortColumn::Potential => a.potential_kt().total_cmp(&b.potential_kt()),
        SortColumn::UnitCost => resolve_unit_cost(a, store).total_cmp(&resolve_unit_cost(b, store)),
        SortColumn::TotalCost => total_cost(a, store).total_cmp(&total_cost(b, store)),
    }
}

fn total_cost(measure: &MeasureRecord, store: &ParameterStore) -> f64 {
    measure.potential_kt() * resolve_unit_cost(measure, store) / KT_NOK_PER_BILLION
}
