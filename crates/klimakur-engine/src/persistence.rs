//! Persistence and link-sharing contracts
//!
//! The engine never performs I/O itself. Collaborators implement
//! [`KeyValueStore`] and [`ClipboardSink`]; every failure they report is
//! logged and swallowed here so computation is never blocked by storage.

use crate::codec::{encode, try_decode};
use crate::error::StoreError;
use crate::params::{ParameterStore, StoreDefaults};
use klimakur_catalog::Catalog;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key under which the state token is stored
pub const STATE_KEY: &str = "klimakur:state:v1";

/// String key-value storage (browser local storage, a file, ...)
pub trait KeyValueStore {
    /// Read a value
    ///
    /// # Errors
    /// [`StoreError`] if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value
    ///
    /// # Errors
    /// [`StoreError`] if the storage rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory [`KeyValueStore`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Fragment part of an address, without the `#`; `None` if absent or empty
#[must_use]
pub fn fragment_token(address: &str) -> Option<&str> {
    let (_, fragment) = address.split_once('#')?;
    let fragment = fragment.trim();
    (!fragment.is_empty()).then_some(fragment)
}

/// Build the session's starting store
///
/// The fragment wins over the key-value store. A source that is missing,
/// unreadable or corrupt is skipped; with no usable source the default
/// store is returned.
#[must_use]
pub fn load_store<S: KeyValueStore + ?Sized>(
    catalog: &Catalog,
    defaults: StoreDefaults,
    fragment: Option<&str>,
    kv: &S,
) -> ParameterStore {
    if let Some(token) = fragment {
        match try_decode(catalog, token) {
            Ok(partial) => {
                tracing::debug!("state restored from fragment");
                return ParameterStore::from_partial(catalog, defaults, partial);
            }
            Err(e) => tracing::warn!(error = %e, "ignoring fragment state"),
        }
    }

    match kv.get(STATE_KEY) {
        Ok(Some(token)) => match try_decode(catalog, &token) {
            Ok(partial) => {
                tracing::debug!("state restored from storage");
                return ParameterStore::from_partial(catalog, defaults, partial);
            }
            Err(e) => tracing::warn!(error = %e, "ignoring stored state"),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "state storage unreadable"),
    }

    ParameterStore::with_defaults(catalog, defaults)
}

/// Write the store through to the key-value store
///
/// Returns whether the write succeeded; failures are logged, never raised.
pub fn persist_store<S: KeyValueStore + ?Sized>(catalog: &Catalog, store: &ParameterStore, kv: &mut S) -> bool {
    match kv.set(STATE_KEY, &encode(catalog, store)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to persist state");
            false
        }
    }
}

/// Full shareable address: `base` with its fragment replaced by the token
#[must_use]
pub fn share_link(base: &str, catalog: &Catalog, store: &ParameterStore) -> String {
    let base = base.split_once('#').map_or(base, |(head, _)| head);
    format!("{base}#{}", encode(catalog, store))
}

/// Clipboard-like destination for share links
pub trait ClipboardSink {
    /// Hand text to the sink
    ///
    /// # Errors
    /// [`StoreError`] if the sink refuses the text.
    fn write_text(&mut self, text: &str) -> Result<(), StoreError>;
}

/// Result of a share attempt, reported to the user interface only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShareOutcome {
    /// Link accepted by the sink
    Copied {
        /// The link
        link: String,
    },
    /// Sink refused; the link is still available for manual copying
    Failed {
        /// The link
        link: String,
        /// Why the sink refused
        reason: String,
    },
}

impl ShareOutcome {
    /// The generated link
    #[must_use]
    pub fn link(&self) -> &str {
        match self {
            ShareOutcome::Copied { link } | ShareOutcome::Failed { link, .. } => link,
        }
    }

    /// True if the sink accepted the link
    #[must_use]
    pub fn is_copied(&self) -> bool {
        matches!(self, ShareOutcome::Copied { .. })
    }
}

/// Build a share link and hand it to the sink
pub fn copy_share_link<C: ClipboardSink + ?Sized>(
    base: &str,
    catalog: &Catalog,
    store: &ParameterStore,
    sink: &mut C,
) -> ShareOutcome {
    let link = share_link(base, catalog, store);
    match sink.write_text(&link) {
        Ok(()) => ShareOutcome::Copied { link },
        Err(e) => {
            tracing::warn!(error = %e, "share link not copied");
            ShareOutcome::Failed {
                link,
                reason: e.to_string(),
            }
        }
    }
}
