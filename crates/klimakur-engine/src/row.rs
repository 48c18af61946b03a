//! Computed rows
//!
//! One [`ComputedRow`] per catalog row, independent of selection and filters.

use crate::cost::{is_assumed_cost, resolve_unit_cost};
use crate::params::ParameterStore;
use klimakur_catalog::{Catalog, Category, MeasureId, MeasureRecord, KT_PER_MT};
use serde::Serialize;

/// kt x NOK/t to billion NOK
pub const KT_NOK_PER_BILLION: f64 = 1e6;

/// A catalog row with its resolved cost figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedRow {
    /// Position in the catalog
    pub index: usize,
    /// Measure code, if any
    pub id: Option<MeasureId>,
    /// Full title
    pub title: String,
    /// Sector
    pub category: Category,
    /// Potential in kt CO2e
    pub potential_kt: f64,
    /// Potential in Mt CO2e
    pub potential_display: f64,
    /// Resolved unit cost, NOK per tonne
    pub unit_cost: f64,
    /// Cost is the unknown-cost default
    pub is_assumed: bool,
    /// Cost comes from an override
    pub is_overridden: bool,
    /// `potential_kt * unit_cost / 1e6`, billion NOK
    pub total_cost: f64,
    /// Published cost range
    pub cost_range_label: Option<String>,
}

/// Project one measure
#[must_use]
pub fn project_row(index: usize, measure: &MeasureRecord, store: &ParameterStore) -> ComputedRow {
    let unit_cost = resolve_unit_cost(measure, store);
    let potential_kt = measure.potential_kt();

    ComputedRow {
        index,
        id: measure.id().cloned(),
        title: measure.title().to_string(),
        category: measure.category(),
        potential_kt,
        potential_display: potential_kt / KT_PER_MT,
        unit_cost,
        is_assumed: is_assumed_cost(measure, store),
        is_overridden: store.cost_override(measure.title()).is_some(),
        total_cost: potential_kt * unit_cost / KT_NOK_PER_BILLION,
        cost_range_label: measure.cost_range_label().map(str::to_string),
    }
}

/// Project every catalog row, in catalog order
#[must_use]
pub fn project_rows(catalog: &Catalog, store: &ParameterStore) -> Vec<ComputedRow> {
    catalog
        .iter()
        .enumerate()
        .map(|(i, m)| project_row(i, m, store))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use klimakur_catalog::UnitCost;

    #[test]
    fn monetary_scale() {
        let c = Catalog::new(vec![
            MeasureRecord::new("T02 Lastebiler", Category::RoadTransport, 1405.0, UnitCost::Known(1500.0)).unwrap(),
        ]);
        let row = project_row(0, &c.records()[0], &ParameterStore::new(&c));
        assert!((row.potential_display - 1.405).abs() < 1e-12);
        assert!((row.total_cost - 2.1075).abs() < 1e-12);
        assert_eq!(row.total_cost, 1405.0 * 1500.0 / 1e6);
        assert_eq!(row.id, Some(MeasureId::new("T02")));
    }

    #[test]
    fn one_row_per_measure_regardless_of_selection() {
        let c = Catalog::klimakur();
        let store = ParameterStore::new(c).select_none().with_search_text("ingen treff her");
        let rows = project_rows(c, &store);
        assert_eq!(rows.len(), c.len());
        assert!(rows.iter().enumerate().all(|(i, r)| r.index == i));
    }

    #[test]
    fn override_flags() {
        let c = Catalog::new(vec![
            MeasureRecord::new("U01 Ukjent", Category::Other, 10.0, UnitCost::Unknown).unwrap(),
        ]);
        let store = ParameterStore::new(&c);
        let row = project_row(0, &c.records()[0], &store);
        assert!(row.is_assumed);
        assert!(!row.is_overridden);

        let store = store.with_cost_override(&c, "U01 Ukjent", 100.0).unwrap();
        let row = project_row(0, &c.records()[0], &store);
        assert!(!row.is_assumed);
        assert!(row.is_overridden);
        assert_eq!(row.total_cost, 10.0 * 100.0 / 1e6);
    }
}
