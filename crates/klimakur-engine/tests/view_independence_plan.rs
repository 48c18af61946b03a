//! Visibility and inclusion are orthogonal.
//!
//! Filters, search and sort decide what is displayed. Only the selection
//! decides what is summed.

use klimakur_catalog::{Catalog, Category};
use klimakur_engine::prelude::*;
use klimakur_engine::{aggregate, project_rows, selected_rows, visible_indices};
use klimakur_test_utils::*;
use proptest::prelude::*;

fn grand_total(catalog: &Catalog, store: &ParameterStore) -> klimakur_engine::GrandTotal {
    let rows = project_rows(catalog, store);
    aggregate(selected_rows(&rows, store)).grand_total
}

proptest! {
    /// Tenet: changing filters, search or sort never changes the totals.
    #[test]
    fn filters_do_not_move_totals(
        actions in arb_actions(),
        category in proptest::option::of(proptest::sample::select(Category::ALL.to_vec())),
        search in "[a-zø ]{0,3}",
        sort in proptest::sample::select(vec![SortColumn::Title, SortColumn::Potential, SortColumn::TotalCost]),
    ) {
        let catalog = Catalog::klimakur();
        let store = replay(catalog, &actions);
        let filtered = store
            .clone()
            .with_category_filter(category.map_or(CategoryFilter::All, CategoryFilter::Only))
            .with_cost_type_filter(CostTypeFilter::Assumed)
            .with_search_text(search)
            .sort_by(sort);

        prop_assert_eq!(grand_total(catalog, &store), grand_total(catalog, &filtered));
        prop_assert_eq!(grand_total(catalog, &store), grand_total(catalog, &store.clone().reset_view()));
    }

    /// Tenet: the visible set is a permutation of the rows passing the
    /// filters, whatever the sort.
    #[test]
    fn sort_only_permutes(actions in arb_actions()) {
        let catalog = Catalog::klimakur();
        let store = replay(catalog, &actions);
        let mut sorted = visible_indices(catalog, &store);
        let mut unsorted = visible_indices(catalog, &store.clone().with_sort(None));
        sorted.sort_unstable();
        unsorted.sort_unstable();
        prop_assert_eq!(sorted, unsorted);
    }
}

/// Tenet: bulk selection only touches the visible rows.
#[test]
fn bulk_selection_respects_filter() {
    let catalog = Catalog::klimakur();
    let store = ParameterStore::new(catalog)
        .with_category_filter(CategoryFilter::Only(Category::Agriculture))
        .deselect_all_visible(catalog);

    let agriculture = catalog.iter().filter(|m| m.category() == Category::Agriculture).count();
    assert_eq!(store.selection().len(), 63 - agriculture);

    let dashboard = klimakur_dashboard();
    let view = dashboard.view(&store);
    assert_eq!(view.selection_state, SelectionState::None);
    assert_eq!(view.counts.visible, agriculture);

    let view = dashboard.view(&store.clone().reset_view());
    assert_eq!(view.selection_state, SelectionState::Some);
}

/// Tenet: search matches case-insensitively on the title, with the text
/// taken as typed; whitespace is part of the needle.
#[test]
fn search_matches_title_text() {
    let catalog = Catalog::klimakur();
    let trailing = ParameterStore::new(catalog).with_search_text("landstrøm ");
    assert!(visible_indices(catalog, &trailing).is_empty());

    let store = ParameterStore::new(catalog).with_search_text("CCS PÅ ");
    let titles: Vec<&str> = visible_indices(catalog, &store)
        .into_iter()
        .map(|i| catalog.records()[i].title())
        .collect();
    assert!(!titles.is_empty());
    assert!(titles.iter().all(|t| t.to_lowercase().contains("ccs på")));
}
