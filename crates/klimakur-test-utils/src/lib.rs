//! Testing utilities for the Klimakur workspace
//!
//! Shared fixtures, assertions and proptest strategies.

#![allow(missing_docs)]

use klimakur_catalog::{Catalog, Category, MeasureRecord, TargetKey, UnitCost};
use klimakur_engine::{
    CategoryFilter, CostTypeFilter, Dashboard, EngineConfig, ParameterStore, SortColumn,
};
use proptest::prelude::*;

pub const TOLERANCE: f64 = 1e-6;

/// Title of the Klimakur row without an assessed cost
pub const S01_TITLE: &str = "S01 Teknisk-operasjonelle tiltak (energieffektivisering)";

pub fn measure(title: &str, category: Category, potential_kt: f64, cost: UnitCost) -> MeasureRecord {
    MeasureRecord::new(title, category, potential_kt, cost).unwrap()
}

/// Six rows over three sectors: known, unknown and zero costs, one code on
/// two rows and one pair that overlaps.
pub fn small_catalog() -> Catalog {
    Catalog::new(vec![
        measure("T01 Færre bilkilometer", Category::RoadTransport, 760.0, UnitCost::Known(1500.0)),
        measure("T05 Elektriske personbiler", Category::RoadTransport, 2540.0, UnitCost::Known(1500.0)),
        measure("S01 Energieffektivisering", Category::Maritime, 130.0, UnitCost::Unknown),
        measure("S09 Havbruk", Category::Maritime, 1070.0, UnitCost::Known(2000.0)),
        measure("S09 Havbruk", Category::OtherTransport, 850.0, UnitCost::Known(2000.0)),
        measure("Diverse nulltiltak", Category::Other, 3900.0, UnitCost::Known(0.0)),
    ])
}

/// Catalog with one priced row next to a large unpriced one
pub fn single_measure_catalog(potential_kt: f64, unit_cost: f64) -> Catalog {
    Catalog::new(vec![
        measure("X01 Testtiltak", Category::Industry, potential_kt, UnitCost::Known(unit_cost)),
        measure("X02 Annet tiltak", Category::Industry, 9999.0, UnitCost::Unknown),
    ])
}

pub fn klimakur_dashboard() -> Dashboard {
    Dashboard::klimakur(EngineConfig::default())
}

pub fn uncached_dashboard(config: EngineConfig) -> Dashboard {
    Dashboard::klimakur(config.with_cache_capacity(0))
}

/// Store with exactly the given titles selected
pub fn store_with_only(catalog: &Catalog, titles: &[&str]) -> ParameterStore {
    titles
        .iter()
        .fold(ParameterStore::new(catalog).select_none(), |store, t| store.select(*t))
}

#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual} (tolerance {TOLERANCE})"
    );
}

/// One user action
#[derive(Debug, Clone)]
pub enum Action {
    Toggle(usize),
    SelectAllVisible,
    DeselectAllVisible,
    Override(usize, f64),
    ClearOverride(usize),
    DefaultCost(f64),
    Target(TargetKey),
    Category(Option<Category>),
    CostType(CostTypeFilter),
    Search(String),
    Sort(SortColumn),
    ResetCosts,
}

impl Action {
    /// Apply to a store; catalog indices wrap around
    pub fn apply(&self, catalog: &Catalog, store: ParameterStore) -> ParameterStore {
        let title = |i: usize| catalog.records()[i % catalog.len()].title().to_string();
        match self {
            Action::Toggle(i) => store.toggle(&title(*i)),
            Action::SelectAllVisible => store.select_all_visible(catalog),
            Action::DeselectAllVisible => store.deselect_all_visible(catalog),
            Action::Override(i, v) => store.with_cost_override(catalog, &title(*i), *v).unwrap(),
            Action::ClearOverride(i) => store.without_cost_override(&title(*i)),
            Action::DefaultCost(v) => store.with_default_unknown_cost(*v).unwrap(),
            Action::Target(t) => store.with_target(*t),
            Action::Category(c) => store.with_category_filter((*c).map_or(CategoryFilter::All, CategoryFilter::Only)),
            Action::CostType(k) => store.with_cost_type_filter(*k),
            Action::Search(q) => store.with_search_text(q.clone()),
            Action::Sort(c) => store.sort_by(*c),
            Action::ResetCosts => store.reset_costs(),
        }
    }
}

pub fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0usize..100).prop_map(Action::Toggle),
        1 => Just(Action::SelectAllVisible),
        1 => Just(Action::DeselectAllVisible),
        2 => ((0usize..100), -100.0f64..5000.0).prop_map(|(i, v)| Action::Override(i, v)),
        1 => (0usize..100).prop_map(Action::ClearOverride),
        1 => (0.0f64..5000.0).prop_map(Action::DefaultCost),
        1 => proptest::sample::select(TargetKey::ALL.to_vec()).prop_map(Action::Target),
        1 => proptest::option::of(proptest::sample::select(Category::ALL.to_vec())).prop_map(Action::Category),
        1 => proptest::sample::select(vec![CostTypeFilter::All, CostTypeFilter::Known, CostTypeFilter::Assumed])
            .prop_map(Action::CostType),
        1 => "[a-zøæå0-9 ]{0,4}".prop_map(Action::Search),
        1 => proptest::sample::select(vec![
            SortColumn::Title,
            SortColumn::Category,
            SortColumn::Potential,
            SortColumn::UnitCost,
            SortColumn::TotalCost,
        ])
        .prop_map(Action::Sort),
        1 => Just(Action::ResetCosts),
    ]
}

/// Sequences of user actions
pub fn arb_actions() -> impl Strategy<Value = Vec<Action>> {
    proptest::collection::vec(arb_action(), 0..24)
}

/// Apply a sequence of actions to the default store
pub fn replay(catalog: &Catalog, actions: &[Action]) -> ParameterStore {
    actions
        .iter()
        .fold(ParameterStore::new(catalog), |store, a| a.apply(catalog, store))
}

/// Arbitrary subset of catalog indices as an inclusion mask
pub fn arb_mask(len: usize) -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), len)
}

/// Store selecting exactly the rows set in `mask`
pub fn store_from_mask(catalog: &Catalog, mask: &[bool]) -> ParameterStore {
    catalog
        .iter()
        .zip(mask)
        .filter(|(_, on)| **on)
        .fold(ParameterStore::new(catalog).select_none(), |store, (m, _)| store.select(m.title()))
}
