//! Dashboard facade
//!
//! Bundles the catalog, configuration and reference data, and derives a
//! complete [`DashboardView`] for any store. Views are memoized by a blake3
//! fingerprint of the store; the cache never affects results.

use crate::aggregate::{aggregate, selected_rows, Aggregates};
use crate::codec;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::conflict::{detect_conflicts, ConflictWarning};
use crate::gap::{analyze_gap, GapResult};
use crate::params::{CategoryFilter, ParameterStore};
use crate::persistence::{load_store, share_link, KeyValueStore};
use crate::row::{project_rows, ComputedRow};
use crate::selection::{selection_state, SelectionState};
use crate::view::visible_indices;
use klimakur_catalog::{document_url, validate, Catalog, CatalogDiagnostic, ConflictGroup, ReferenceTrajectory};
use moka::sync::Cache;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::sync::Arc;

/// Blake3 digest of a serialized store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreFingerprint([u8; 32]);

impl StoreFingerprint {
    /// Fingerprint a store
    ///
    /// # Errors
    /// Returns the serializer error if the store cannot be encoded.
    pub fn compute(store: &ParameterStore) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(store)?;
        Ok(Self(*blake3::hash(&json).as_bytes()))
    }

    /// First 16 hex characters
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for StoreFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Row counters shown above the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Rows passing the filters
    pub visible: usize,
    /// Rows included in totals
    pub selected: usize,
    /// Rows in the catalog
    pub total: usize,
}

/// Everything the rendering layer needs for one store revision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// One row per catalog entry, in catalog order
    pub rows: Vec<ComputedRow>,
    /// Indices into `rows`, in display order
    pub visible: Vec<usize>,
    /// Indices into `rows` included in totals, in catalog order
    pub selected: Vec<usize>,
    /// Totals over the selection
    pub aggregates: Aggregates,
    /// Target analysis
    pub gap: GapResult,
    /// Overlap warnings
    pub conflicts: Vec<ConflictWarning>,
    /// Tri-state of the select-all control
    pub selection_state: SelectionState,
    /// Counters
    pub counts: Counts,
}

impl DashboardView {
    /// Visible rows in display order
    pub fn visible_rows(&self) -> impl Iterator<Item = &ComputedRow> + '_ {
        self.visible.iter().filter_map(|&i| self.rows.get(i))
    }

    /// True if the row at `index` is included in totals
    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.binary_search(&index).is_ok()
    }
}

/// Catalog, reference data and configuration with a view cache
pub struct Dashboard {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    conflict_groups: Vec<ConflictGroup>,
    trajectory: ReferenceTrajectory,
    cache: Option<Cache<StoreFingerprint, Arc<DashboardView>>>,
}

impl Dashboard {
    /// Create dashboard over a catalog
    #[must_use]
    pub fn new(catalog: impl Into<Arc<Catalog>>, config: EngineConfig) -> Self {
        let cache = (config.cache_capacity > 0).then(|| Cache::new(config.cache_capacity));
        Self {
            catalog: catalog.into(),
            config,
            conflict_groups: Vec::new(),
            trajectory: ReferenceTrajectory::NORWAY,
            cache,
        }
    }

    /// Dashboard over the built-in Klimakur catalog and conflict groups
    #[must_use]
    pub fn klimakur(config: EngineConfig) -> Self {
        Self::new(Catalog::klimakur().clone(), config).with_conflict_groups(ConflictGroup::klimakur())
    }

    /// Klimakur dashboard configured from a TOML file
    ///
    /// # Errors
    /// [`crate::EngineError::Config`] if the file cannot be read, parsed or validated.
    pub fn klimakur_from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let config = EngineConfig::load(path)?;
        Ok(Self::klimakur(config))
    }

    /// Set conflict groups
    #[must_use]
    pub fn with_conflict_groups(mut self, groups: Vec<ConflictGroup>) -> Self {
        self.conflict_groups = groups;
        self.invalidate();
        self
    }

    /// Set reference trajectory
    #[must_use]
    pub fn with_trajectory(mut self, trajectory: ReferenceTrajectory) -> Self {
        self.trajectory = trajectory;
        self.invalidate();
        self
    }

    /// The catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Conflict groups
    #[inline]
    #[must_use]
    pub fn conflict_groups(&self) -> &[ConflictGroup] {
        &self.conflict_groups
    }

    /// Reference trajectory
    #[inline]
    #[must_use]
    pub fn trajectory(&self) -> &ReferenceTrajectory {
        &self.trajectory
    }

    /// Fresh store under this configuration
    #[must_use]
    pub fn default_store(&self) -> ParameterStore {
        ParameterStore::with_defaults(&self.catalog, self.config.store_defaults())
    }

    /// Starting store from a fragment token and a key-value store
    #[must_use]
    pub fn restore<S: KeyValueStore + ?Sized>(&self, fragment: Option<&str>, kv: &S) -> ParameterStore {
        load_store(&self.catalog, self.config.store_defaults(), fragment, kv)
    }

    /// Store from a token; malformed tokens give the default store
    #[must_use]
    pub fn decode(&self, token: &str) -> ParameterStore {
        ParameterStore::from_partial(
            &self.catalog,
            self.config.store_defaults(),
            codec::decode(&self.catalog, token),
        )
    }

    /// Token for a store
    #[must_use]
    pub fn encode(&self, store: &ParameterStore) -> String {
        codec::encode(&self.catalog, store)
    }

    /// Shareable address for a store
    #[must_use]
    pub fn share_link(&self, base: &str, store: &ParameterStore) -> String {
        share_link(base, &self.catalog, store)
    }

    /// Category filter options: `All` first, then categories in catalog order
    #[must_use]
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(self.catalog.categories().into_iter().map(CategoryFilter::Only))
            .collect()
    }

    /// Document address for the row at `index`
    #[must_use]
    pub fn document_url(&self, index: usize) -> Option<String> {
        self.catalog
            .get(index)
            .and_then(|m| document_url(&self.config.document_base_url, m))
    }

    /// Catalog diagnostics
    #[must_use]
    pub fn validate(&self) -> Vec<CatalogDiagnostic> {
        validate(&self.catalog)
    }

    /// Derive the full view without touching the cache
    #[must_use]
    pub fn compute(&self, store: &ParameterStore) -> DashboardView {
        let rows = project_rows(&self.catalog, store);
        let visible = visible_indices(&self.catalog, store);

        let included = selected_rows(&rows, store);
        let selected: Vec<usize> = included.iter().map(|r| r.index).collect();
        let aggregates = aggregate(included);

        let target = store.selected_target().scenario(&self.trajectory);
        let gap = analyze_gap(&aggregates.grand_total, &target, &self.trajectory, self.config.gap_mode);

        let selected_titles = self
            .catalog
            .titles()
            .filter(|t| store.is_selected(t));
        let conflicts = detect_conflicts(selected_titles, &self.conflict_groups);

        let visible_records: Vec<_> = visible.iter().filter_map(|&i| self.catalog.get(i)).collect();
        let selection_state = selection_state(&visible_records, store);

        let counts = Counts {
            visible: visible.len(),
            selected: selected.len(),
            total: self.catalog.len(),
        };

        tracing::debug!(
            visible = counts.visible,
            selected = counts.selected,
            conflicts = conflicts.len(),
            "view recomputed"
        );

        DashboardView {
            rows,
            visible,
            selected,
            aggregates,
            gap,
            conflicts,
            selection_state,
            counts,
        }
    }

    /// Derived view for a store, memoized
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn view(&self, store: &ParameterStore) -> Arc<DashboardView> {
        let Some(cache) = &self.cache else {
            return Arc::new(self.compute(store));
        };

        let fingerprint = match StoreFingerprint::compute(store) {
            Ok(fp) => fp,
            Err(e) => {
                tracing::warn!(error = %e, "store fingerprint failed; bypassing cache");
                return Arc::new(self.compute(store));
            }
        };

        if let Some(view) = cache.get(&fingerprint) {
            tracing::debug!(fingerprint = %fingerprint.short(), "view cache hit");
            return view;
        }

        tracing::debug!(fingerprint = %fingerprint.short(), "view cache miss");
        let view = Arc::new(self.compute(store));
        cache.insert(fingerprint, Arc::clone(&view));
        view
    }

    /// Number of memoized views
    #[must_use]
    pub fn cached_views(&self) -> u64 {
        self.cache.as_ref().map_or(0, |c| {
            c.run_pending_tasks();
            c.entry_count()
        })
    }

    /// Drop every memoized view
    pub fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("catalog_len", &self.catalog.len())
            .field("config", &self.config)
            .field("conflict_groups", &self.conflict_groups.len())
            .field("trajectory", &self.trajectory)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GapMode;
    use crate::error::{ConfigError, EngineError};
    use crate::params::SortColumn;
    use klimakur_catalog::{Category, TargetKey};

    #[test]
    fn klimakur_from_file_applies_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "gap_mode = \"simple\"\ndefault_unknown_cost = 900.0\n").unwrap();

        let dash = Dashboard::klimakur_from_file(&path).unwrap();
        assert_eq!(dash.config().gap_mode, GapMode::Simple);
        assert_eq!(dash.default_store().default_unknown_cost(), 900.0);
        assert_eq!(dash.catalog().len(), 63);
    }

    #[test]
    fn klimakur_from_file_reports_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Dashboard::klimakur_from_file(&missing),
            Err(EngineError::Config(ConfigError::Io { .. }))
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "default_unknown_cost = -1.0\n").unwrap();
        assert!(matches!(
            Dashboard::klimakur_from_file(&bad),
            Err(EngineError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn default_view_over_klimakur() {
        let dash = Dashboard::klimakur(EngineConfig::default());
        let store = dash.default_store();
        let view = dash.view(&store);

        assert_eq!(view.rows.len(), 63);
        assert_eq!(view.counts, Counts { visible: 63, selected: 63, total: 63 });
        assert_eq!(view.selection_state, SelectionState::All);
        assert_eq!(view.conflicts.len(), ConflictGroup::klimakur().len());
        assert_eq!(view.gap.mode, GapMode::BaselineDecomposition);
        assert_eq!(view.gap.target.key, TargetKey::Cut70By2035);
    }

    #[test]
    fn cache_hit_returns_same_view() {
        let dash = Dashboard::klimakur(EngineConfig::default());
        let store = dash.default_store();
        let a = dash.view(&store);
        let b = dash.view(&store.clone());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(dash.cached_views(), 1);
    }

    #[test]
    fn cached_and_uncached_views_agree() {
        let cached = Dashboard::klimakur(EngineConfig::default());
        let uncached = Dashboard::klimakur(EngineConfig::default().with_cache_capacity(0));
        let store = cached
            .default_store()
            .sort_by(SortColumn::TotalCost)
            .deselect("T05 100% av nye personbiler er elektriske innen 2025");

        assert_eq!(*cached.view(&store), *uncached.view(&store));
        assert_eq!(uncached.cached_views(), 0);
    }

    #[test]
    fn category_options_start_with_all() {
        let dash = Dashboard::klimakur(EngineConfig::default());
        let options = dash.category_options();
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[1], CategoryFilter::Only(Category::RoadTransport));
        assert_eq!(options.len(), 1 + Category::ALL.len());
    }

    #[test]
    fn document_urls_use_configured_base() {
        let dash = Dashboard::klimakur(EngineConfig::default().with_document_base_url("https://example.org/k"));
        let url = dash.document_url(0).unwrap();
        assert!(url.starts_with("https://example.org/k/veitransport/t01-"));
        assert!(dash.document_url(62).is_none());
        assert!(dash.document_url(999).is_none());
    }

    #[test]
    fn configured_defaults_flow_into_store() {
        let dash = Dashboard::klimakur(
            EngineConfig::default()
                .with_default_unknown_cost(2000.0)
                .with_default_target(TargetKey::Cut55By2030),
        );
        let store = dash.default_store();
        assert_eq!(store.default_unknown_cost(), 2000.0);
        assert_eq!(dash.decode("not a token"), store);
    }
}
