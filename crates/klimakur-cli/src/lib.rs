//! Klimakur CLI
//!
//! Terminal front end for the dashboard engine: renders summaries and the
//! measure table, applies parameter changes, and keeps state in a JSON
//! file or a shareable token.
//!
//! ```text
//! klimakur --store state.json toggle T05
//! klimakur --store state.json table --category Veitransport --sort potential --desc
//! klimakur --store state.json share https://klimakur.example/
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod file_store;
pub mod format;
pub mod report;

pub use cli::build_cli;
pub use commands::run;
pub use file_store::FileStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
