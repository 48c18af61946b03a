//! Parameter store - the user-adjustable inputs
//!
//! [`ParameterStore`] is a value: every user action consumes the current
//! revision and returns the next one. Nothing in the engine mutates a store
//! in place, so snapshots are plain clones.

use crate::error::ParamError;
use klimakur_catalog::{Catalog, Category, TargetKey, UnitCost};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unit cost applied to unknown-cost measures unless configured otherwise
pub const DEFAULT_UNKNOWN_COST: f64 = 1500.0;

/// Defaults a store falls back to on reset and against which tokens are encoded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreDefaults {
    /// Unit cost for unknown-cost measures
    pub default_unknown_cost: f64,
    /// Target scenario
    pub target: TargetKey,
}

impl Default for StoreDefaults {
    fn default() -> Self {
        Self {
            default_unknown_cost: DEFAULT_UNKNOWN_COST,
            target: TargetKey::default(),
        }
    }
}

/// Category filter for the visible table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// No filtering ("Alle")
    #[default]
    All,
    /// Only this sector
    Only(Category),
}

impl CategoryFilter {
    /// True if a measure in `category` passes
    #[inline]
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

/// Filter on the catalog's original cost, ignoring overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CostTypeFilter {
    /// No filtering
    #[default]
    All,
    /// Only measures with an assessed cost
    Known,
    /// Only measures without an assessed cost
    Assumed,
}

impl CostTypeFilter {
    /// True if a measure with original cost `cost` passes
    #[inline]
    #[must_use]
    pub fn matches(self, cost: UnitCost) -> bool {
        match self {
            CostTypeFilter::All => true,
            CostTypeFilter::Known => !cost.is_unknown(),
            CostTypeFilter::Assumed => cost.is_unknown(),
        }
    }
}

/// Sortable table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    /// Title, collated
    Title,
    /// Category label, collated
    Category,
    /// Potential
    Potential,
    /// Resolved unit cost
    UnitCost,
    /// Resolved total cost
    TotalCost,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// Opposite direction
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column
    pub column: SortColumn,
    /// Direction
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create sort spec
    #[inline]
    #[must_use]
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// User-adjustable inputs for one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterStore {
    cost_overrides: BTreeMap<String, f64>,
    default_unknown_cost: f64,
    selected_target: TargetKey,
    selection: BTreeSet<String>,
    filter_category: CategoryFilter,
    filter_cost_type: CostTypeFilter,
    search_text: String,
    sort: Option<SortSpec>,
    defaults: StoreDefaults,
}

impl ParameterStore {
    /// Default store: everything selected, no overrides, no filters
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_defaults(catalog, StoreDefaults::default())
    }

    /// Default store against explicit defaults
    #[must_use]
    pub fn with_defaults(catalog: &Catalog, defaults: StoreDefaults) -> Self {
        Self {
            cost_overrides: BTreeMap::new(),
            default_unknown_cost: defaults.default_unknown_cost,
            selected_target: defaults.target,
            selection: catalog.titles().map(str::to_string).collect(),
            filter_category: CategoryFilter::All,
            filter_cost_type: CostTypeFilter::All,
            search_text: String::new(),
            sort: None,
            defaults,
        }
    }

    /// Rebuild a store from a decoded token over the default store
    ///
    /// Excluded indices outside the catalog are ignored; negative costs are
    /// clamped the same way as at the mutation boundary.
    #[must_use]
    pub fn from_partial(catalog: &Catalog, defaults: StoreDefaults, partial: PartialStore) -> Self {
        let mut store = Self::with_defaults(catalog, defaults);

        for (title, value) in partial.cost_overrides {
            if let Ok(v) = sanitize_cost("cost override", value) {
                store.cost_overrides.insert(title, v);
            }
        }
        if let Some(v) = partial.default_unknown_cost.and_then(|v| sanitize_cost("default unknown cost", v).ok()) {
            store.default_unknown_cost = v;
        }
        if let Some(target) = partial.selected_target {
            store.selected_target = target;
        }
        for index in partial.excluded {
            if let Some(m) = catalog.get(index) {
                store.selection.remove(m.title());
            }
        }
        if let Some(filter) = partial.filter_category {
            store.filter_category = filter;
        }
        if let Some(filter) = partial.filter_cost_type {
            store.filter_cost_type = filter;
        }
        if let Some(text) = partial.search_text {
            store.search_text = text;
        }
        store.sort = partial.sort;

        store
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// All overrides, keyed by title
    #[inline]
    #[must_use]
    pub fn cost_overrides(&self) -> &BTreeMap<String, f64> {
        &self.cost_overrides
    }

    /// Override for a title, if set
    #[inline]
    #[must_use]
    pub fn cost_override(&self, title: &str) -> Option<f64> {
        self.cost_overrides.get(title).copied()
    }

    /// Unit cost applied to unknown-cost measures
    #[inline]
    #[must_use]
    pub fn default_unknown_cost(&self) -> f64 {
        self.default_unknown_cost
    }

    /// Selected target scenario
    #[inline]
    #[must_use]
    pub fn selected_target(&self) -> TargetKey {
        self.selected_target
    }

    /// Included titles
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// True if the title is included in totals
    #[inline]
    #[must_use]
    pub fn is_selected(&self, title: &str) -> bool {
        self.selection.contains(title)
    }

    /// Category filter
    #[inline]
    #[must_use]
    pub fn filter_category(&self) -> CategoryFilter {
        self.filter_category
    }

    /// Cost-type filter
    #[inline]
    #[must_use]
    pub fn filter_cost_type(&self) -> CostTypeFilter {
        self.filter_cost_type
    }

    /// Free-text search
    #[inline]
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Active sort, `None` for catalog order
    #[inline]
    #[must_use]
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Defaults used for reset and encoding
    #[inline]
    #[must_use]
    pub fn defaults(&self) -> StoreDefaults {
        self.defaults
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Flip inclusion of one title
    #[must_use]
    pub fn toggle(mut self, title: &str) -> Self {
        if !self.selection.remove(title) {
            self.selection.insert(title.to_string());
        }
        self
    }

    /// Include one title
    #[must_use]
    pub fn select(mut self, title: impl Into<String>) -> Self {
        self.selection.insert(title.into());
        self
    }

    /// Exclude one title
    #[must_use]
    pub fn deselect(mut self, title: &str) -> Self {
        self.selection.remove(title);
        self
    }

    /// Include every catalog title
    #[must_use]
    pub fn select_all(mut self, catalog: &Catalog) -> Self {
        self.selection = catalog.titles().map(str::to_string).collect();
        self
    }

    /// Exclude everything
    #[must_use]
    pub fn select_none(mut self) -> Self {
        self.selection.clear();
        self
    }

    /// Include every currently visible title, leaving hidden ones untouched
    #[must_use]
    pub fn select_all_visible(mut self, catalog: &Catalog) -> Self {
        let visible: Vec<String> = crate::view::visible_measures(catalog, &self)
            .into_iter()
            .map(|m| m.title().to_string())
            .collect();
        self.selection.extend(visible);
        self
    }

    /// Exclude every currently visible title, leaving hidden ones untouched
    #[must_use]
    pub fn deselect_all_visible(mut self, catalog: &Catalog) -> Self {
        for m in crate::view::visible_measures(catalog, &self) {
            self.selection.remove(m.title());
        }
        self
    }

    // ---------------------------------------------------------------------
    // Costs
    // ---------------------------------------------------------------------

    /// Set a unit-cost override for a catalog title
    ///
    /// Negative values are clamped to zero and values are rounded to whole
    /// NOK per tonne.
    ///
    /// # Errors
    /// - [`ParamError::UnknownMeasure`] if no row carries `title`
    /// - [`ParamError::NonFinite`] for NaN or infinite values
    pub fn with_cost_override(mut self, catalog: &Catalog, title: &str, value: f64) -> Result<Self, ParamError> {
        if !catalog.contains_title(title) {
            return Err(ParamError::UnknownMeasure(title.to_string()));
        }
        let value = sanitize_cost("cost override", value)?;
        self.cost_overrides.insert(title.to_string(), value);
        Ok(self)
    }

    /// Remove an override
    #[must_use]
    pub fn without_cost_override(mut self, title: &str) -> Self {
        self.cost_overrides.remove(title);
        self
    }

    /// Set the unit cost applied to unknown-cost measures
    ///
    /// # Errors
    /// [`ParamError::NonFinite`] for NaN or infinite values
    pub fn with_default_unknown_cost(mut self, value: f64) -> Result<Self, ParamError> {
        self.default_unknown_cost = sanitize_cost("default unknown cost", value)?;
        Ok(self)
    }

    /// Drop all overrides and restore the default unknown cost
    #[must_use]
    pub fn reset_costs(mut self) -> Self {
        self.cost_overrides.clear();
        self.default_unknown_cost = self.defaults.default_unknown_cost;
        self
    }

    // ---------------------------------------------------------------------
    // Target, filters, sort
    // ---------------------------------------------------------------------

    /// Select target scenario
    #[inline]
    #[must_use]
    pub fn with_target(mut self, target: TargetKey) -> Self {
        self.selected_target = target;
        self
    }

    /// Set category filter
    #[inline]
    #[must_use]
    pub fn with_category_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter_category = filter;
        self
    }

    /// Set cost-type filter
    #[inline]
    #[must_use]
    pub fn with_cost_type_filter(mut self, filter: CostTypeFilter) -> Self {
        self.filter_cost_type = filter;
        self
    }

    /// Set search text
    #[inline]
    #[must_use]
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Set or clear the sort explicitly
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    /// Header click: same column flips direction, new column starts ascending
    #[must_use]
    pub fn sort_by(mut self, column: SortColumn) -> Self {
        self.sort = Some(match self.sort {
            Some(current) if current.column == column => SortSpec::new(column, current.direction.flipped()),
            _ => SortSpec::new(column, SortDirection::Asc),
        });
        self
    }

    /// Clear filters and sort, keeping selection and costs
    #[must_use]
    pub fn reset_view(mut self) -> Self {
        self.filter_category = CategoryFilter::All;
        self.filter_cost_type = CostTypeFilter::All;
        self.search_text.clear();
        self.sort = None;
        self
    }

    /// Back to the default store
    #[must_use]
    pub fn reset_all(self, catalog: &Catalog) -> Self {
        Self::with_defaults(catalog, self.defaults)
    }
}

/// Store fields carried by a decoded token; absent fields mean "default"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialStore {
    /// Overrides, keyed by title
    pub cost_overrides: BTreeMap<String, f64>,
    /// Unknown-cost default
    pub default_unknown_cost: Option<f64>,
    /// Target
    pub selected_target: Option<TargetKey>,
    /// Catalog indices excluded from the selection
    pub excluded: Vec<usize>,
    /// Category filter
    pub filter_category: Option<CategoryFilter>,
    /// Cost-type filter
    pub filter_cost_type: Option<CostTypeFilter>,
    /// Search text
    pub search_text: Option<String>,
    /// Sort
    pub sort: Option<SortSpec>,
}

impl PartialStore {
    /// True if the token carried nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn sanitize_cost(field: &'static str, value: f64) -> Result<f64, ParamError> {
    if !value.is_finite() {
        return Err(ParamError::non_finite(field, value));
    }
    Ok(value.max(0.0).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use klimakur_catalog::MeasureRecord;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            MeasureRecord::new("A01 Først", Category::RoadTransport, 100.0, UnitCost::Known(500.0)).unwrap(),
            MeasureRecord::new("B01 Andre", Category::Maritime, 200.0, UnitCost::Unknown).unwrap(),
            MeasureRecord::new("C01 Tredje", Category::Maritime, 300.0, UnitCost::Known(0.0)).unwrap(),
        ])
    }

    #[test]
    fn default_store_selects_everything() {
        let c = catalog();
        let store = ParameterStore::new(&c);
        assert_eq!(store.selection().len(), 3);
        assert_eq!(store.default_unknown_cost(), DEFAULT_UNKNOWN_COST);
        assert_eq!(store.selected_target(), TargetKey::Cut70By2035);
        assert!(store.sort().is_none());
    }

    #[test]
    fn toggle_flips_inclusion() {
        let c = catalog();
        let store = ParameterStore::new(&c).toggle("A01 Først");
        assert!(!store.is_selected("A01 Først"));
        let store = store.toggle("A01 Først");
        assert!(store.is_selected("A01 Først"));
    }

    #[test]
    fn override_rejects_unknown_title() {
        let c = catalog();
        let err = ParameterStore::new(&c).with_cost_override(&c, "Z99 Borte", 10.0).unwrap_err();
        assert_eq!(err, ParamError::UnknownMeasure("Z99 Borte".to_string()));
    }

    #[test]
    fn override_rejects_non_finite() {
        let c = catalog();
        let err = ParameterStore::new(&c)
            .with_cost_override(&c, "A01 Først", f64::INFINITY)
            .unwrap_err();
        assert!(matches!(err, ParamError::NonFinite { .. }));
    }

    #[test]
    fn override_clamps_and_rounds() {
        let c = catalog();
        let store = ParameterStore::new(&c)
            .with_cost_override(&c, "A01 Først", -20.0)
            .unwrap()
            .with_cost_override(&c, "C01 Tredje", 812.6)
            .unwrap();
        assert_eq!(store.cost_override("A01 Først"), Some(0.0));
        assert_eq!(store.cost_override("C01 Tredje"), Some(813.0));
    }

    #[test]
    fn reset_costs_restores_defaults_only() {
        let c = catalog();
        let store = ParameterStore::new(&c)
            .with_cost_override(&c, "A01 Først", 900.0)
            .unwrap()
            .with_default_unknown_cost(2500.0)
            .unwrap()
            .deselect("B01 Andre")
            .reset_costs();
        assert!(store.cost_overrides().is_empty());
        assert_eq!(store.default_unknown_cost(), DEFAULT_UNKNOWN_COST);
        assert!(!store.is_selected("B01 Andre"));
    }

    #[test]
    fn reset_all_is_idempotent() {
        let c = catalog();
        let dirty = ParameterStore::new(&c)
            .with_search_text("x")
            .sort_by(SortColumn::Potential)
            .with_target(TargetKey::Cut90By2050)
            .select_none();
        let once = dirty.clone().reset_all(&c);
        let twice = once.clone().reset_all(&c);
        assert_eq!(once, twice);
        assert_eq!(once, ParameterStore::new(&c));
    }

    #[test]
    fn reset_all_keeps_custom_defaults() {
        let c = catalog();
        let defaults = StoreDefaults {
            default_unknown_cost: 2000.0,
            target: TargetKey::Cut55By2030,
        };
        let store = ParameterStore::with_defaults(&c, defaults)
            .with_default_unknown_cost(100.0)
            .unwrap()
            .reset_all(&c);
        assert_eq!(store.default_unknown_cost(), 2000.0);
        assert_eq!(store.selected_target(), TargetKey::Cut55By2030);
    }

    #[test]
    fn sort_by_toggles_direction() {
        let c = catalog();
        let store = ParameterStore::new(&c).sort_by(SortColumn::TotalCost);
        assert_eq!(store.sort(), Some(SortSpec::new(SortColumn::TotalCost, SortDirection::Asc)));
        let store = store.sort_by(SortColumn::TotalCost);
        assert_eq!(store.sort(), Some(SortSpec::new(SortColumn::TotalCost, SortDirection::Desc)));
        let store = store.sort_by(SortColumn::Title);
        assert_eq!(store.sort(), Some(SortSpec::new(SortColumn::Title, SortDirection::Asc)));
    }

    #[test]
    fn visible_bulk_selection_leaves_hidden_rows() {
        let c = catalog();
        let store = ParameterStore::new(&c)
            .with_category_filter(CategoryFilter::Only(Category::Maritime))
            .deselect_all_visible(&c);
        assert!(store.is_selected("A01 Først"));
        assert!(!store.is_selected("B01 Andre"));
        assert!(!store.is_selected("C01 Tredje"));

        let store = store.select_all_visible(&c);
        assert_eq!(store.selection().len(), 3);
    }

    #[test]
    fn from_partial_applies_fields() {
        let c = catalog();
        let partial = PartialStore {
            cost_overrides: BTreeMap::from([("A01 Først".to_string(), -5.0)]),
            default_unknown_cost: Some(1800.0),
            selected_target: Some(TargetKey::Cut75By2035),
            excluded: vec![1, 99],
            search_text: Some("tred".to_string()),
            ..PartialStore::default()
        };
        let store = ParameterStore::from_partial(&c, StoreDefaults::default(), partial);
        assert_eq!(store.cost_override("A01 Først"), Some(0.0));
        assert_eq!(store.default_unknown_cost(), 1800.0);
        assert_eq!(store.selected_target(), TargetKey::Cut75By2035);
        assert!(!store.is_selected("B01 Andre"));
        assert_eq!(store.selection().len(), 2);
        assert_eq!(store.search_text(), "tred");
    }

    #[test]
    fn empty_partial_is_default_store() {
        let c = catalog();
        let store = ParameterStore::from_partial(&c, StoreDefaults::default(), PartialStore::default());
        assert_eq!(store, ParameterStore::new(&c));
        assert!(PartialStore::default().is_empty());
    }
}
