//! Klimakur Catalog
//!
//! Static reference data for the Klimakur 2030 measure dashboard.
//!
//! # Overview
//!
//! The catalog crate provides:
//! - **MeasureRecord**: immutable measure rows with potential and unit cost
//! - **Catalog**: the ordered list of measures, including the built-in set
//! - **TargetKey / TargetScenario**: national reduction targets
//! - **ReferenceTrajectory**: baseline and projected emissions
//! - **ConflictGroup**: declared overlaps between measures
//! - **validate**: diagnostics for duplicate codes and invalid figures
//!
//! # Example
//!
//! ```rust
//! use klimakur_catalog::{Catalog, MeasureId, ReferenceTrajectory, TargetKey};
//!
//! let catalog = Catalog::klimakur();
//! let t05 = MeasureId::new("T05");
//! let (_, measure) = catalog.find_by_id(&t05).next().unwrap();
//! assert!((measure.potential_mt() - 2.54).abs() < 1e-9);
//!
//! let target = TargetKey::Cut70By2035.scenario(&ReferenceTrajectory::NORWAY);
//! assert!((target.level - 15.3).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod conflict_group;
pub mod document;
pub mod error;
pub mod measure;
pub mod target;
pub mod validation;

// Re-exports
pub use catalog::Catalog;
pub use conflict_group::ConflictGroup;
pub use document::{document_url, slugify, DEFAULT_DOCUMENT_BASE};
pub use error::{CatalogError, CatalogResult};
pub use measure::{Category, MeasureId, MeasureRecord, UnitCost, KT_PER_MT};
pub use target::{ReferenceTrajectory, TargetDefinition, TargetKey, TargetScenario};
pub use validation::{validate, CatalogDiagnostic, DiagnosticKind};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog consumers
    pub use crate::{
        Catalog, Category, ConflictGroup, MeasureId, MeasureRecord, ReferenceTrajectory, TargetKey,
        TargetScenario, UnitCost,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
