//! Klimakur Engine
//!
//! Derived-state computation for the Klimakur measure dashboard.
//!
//! # Overview
//!
//! Every derived structure is a pure function of a [`Catalog`] and a
//! [`ParameterStore`]:
//!
//! 1. **Cost resolution**: override, unknown-cost default, catalog cost
//! 2. **Row projection**: potential in kt and Mt, resolved unit and total cost
//! 3. **Filter/sort**: which rows are displayed, never which are summed
//! 4. **Aggregation**: per category, per cost bucket, grand total
//! 5. **Gap analysis**: coverage of a target scenario
//! 6. **Conflict detection**: overlapping measures selected together
//! 7. **Codec**: compact URL-safe token for sharing and persistence
//!
//! [`Dashboard`] bundles these behind a memoizing facade.
//!
//! # Example
//!
//! ```rust
//! use klimakur_engine::prelude::*;
//!
//! let dashboard = Dashboard::klimakur(EngineConfig::default());
//! let store = dashboard
//!     .default_store()
//!     .select_none()
//!     .select("T05 100% av nye personbiler er elektriske innen 2025");
//!
//! let view = dashboard.view(&store);
//! assert!((view.aggregates.grand_total.potential - 2.54).abs() < 1e-9);
//!
//! let restored = dashboard.decode(&dashboard.encode(&store));
//! assert_eq!(restored, store);
//! ```
//!
//! [`Catalog`]: klimakur_catalog::Catalog

#![warn(missing_docs)]

pub mod aggregate;
pub mod codec;
pub mod collate;
pub mod config;
pub mod conflict;
pub mod cost;
pub mod dashboard;
pub mod error;
pub mod gap;
pub mod params;
pub mod persistence;
pub mod row;
pub mod selection;
pub mod view;

// Re-exports
pub use aggregate::{aggregate, selected_rows, AggregateBucket, Aggregates, CostBucket, GrandTotal};
pub use codec::{decode, encode, try_decode};
pub use collate::compare_nb;
pub use config::{EngineConfig, GapMode};
pub use conflict::{detect_conflicts, ConflictWarning};
pub use cost::{is_assumed_cost, resolve_unit_cost};
pub use dashboard::{Counts, Dashboard, DashboardView, StoreFingerprint};
pub use error::{CodecError, ConfigError, EngineError, EngineResult, ParamError, StoreError};
pub use gap::{analyze_gap, GapResult};
pub use params::{
    CategoryFilter, CostTypeFilter, ParameterStore, PartialStore, SortColumn, SortDirection, SortSpec,
    StoreDefaults, DEFAULT_UNKNOWN_COST,
};
pub use persistence::{
    copy_share_link, fragment_token, load_store, persist_store, share_link, ClipboardSink, KeyValueStore,
    MemoryStore, ShareOutcome, STATE_KEY,
};
pub use row::{project_row, project_rows, ComputedRow};
pub use selection::{selection_state, SelectionState};
pub use view::{is_visible, visible_indices, visible_measures};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for engine consumers
    pub use crate::{
        CategoryFilter, ComputedRow, CostBucket, CostTypeFilter, Dashboard, DashboardView, EngineConfig, GapMode,
        GapResult, ParameterStore, SelectionState, SortColumn, SortDirection,
    };
    pub use klimakur_catalog::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
