//! Shareable-state codec
//!
//! A token is URL-safe base64 (no padding) over a compact JSON document.
//! Only fields that differ from the store defaults are written. Measures are
//! referenced by catalog index; the selection is written as the list of
//! excluded indices, which is the only supported selection encoding.
//!
//! | key | field |
//! |-----|-------|
//! | `o` | cost overrides, `[index, cost]` pairs |
//! | `d` | unknown-cost default |
//! | `t` | target key |
//! | `x` | excluded catalog indices |
//! | `c` | category filter |
//! | `k` | cost-type filter |
//! | `q` | search text |
//! | `s` | sort column and direction |

use crate::error::CodecError;
use crate::params::{CategoryFilter, CostTypeFilter, ParameterStore, PartialStore, SortSpec};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use klimakur_catalog::{Catalog, Category, TargetKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Serialize, Deserialize)]
struct WireState {
    #[serde(rename = "o", default, skip_serializing_if = "Vec::is_empty")]
    overrides: Vec<(usize, f64)>,
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    default_unknown_cost: Option<f64>,
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    target: Option<TargetKey>,
    #[serde(rename = "x", default, skip_serializing_if = "Vec::is_empty")]
    excluded: Vec<usize>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(rename = "k", default, skip_serializing_if = "Option::is_none")]
    cost_type: Option<CostTypeFilter>,
    #[serde(rename = "q", default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    sort: Option<SortSpec>,
}

/// Encode a store into a token
///
/// Overrides for titles missing from `catalog` are dropped.
#[must_use]
pub fn encode(catalog: &Catalog, store: &ParameterStore) -> String {
    let defaults = store.defaults();

    let overrides = store
        .cost_overrides()
        .iter()
        .filter_map(|(title, &cost)| {
            let index = catalog.iter().position(|m| m.title() == title)?;
            Some((index, cost))
        })
        .collect();

    let excluded = catalog
        .iter()
        .enumerate()
        .filter(|(_, m)| !store.is_selected(m.title()))
        .map(|(i, _)| i)
        .collect();

    let wire = WireState {
        overrides,
        default_unknown_cost: Some(store.default_unknown_cost())
            .filter(|&c| c.to_bits() != defaults.default_unknown_cost.to_bits()),
        target: Some(store.selected_target()).filter(|&t| t != defaults.target),
        excluded,
        category: match store.filter_category() {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(c),
        },
        cost_type: Some(store.filter_cost_type()).filter(|&k| k != CostTypeFilter::All),
        search: Some(store.search_text()).filter(|q| !q.is_empty()).map(str::to_string),
        sort: store.sort(),
    };

    match serde_json::to_vec(&wire) {
        Ok(json) => URL_SAFE_NO_PAD.encode(json),
        Err(e) => {
            tracing::warn!(error = %e, "state not encodable; sharing default state");
            URL_SAFE_NO_PAD.encode(b"{}")
        }
    }
}

/// Decode a token, reporting why it was rejected
///
/// A leading `#` and surrounding whitespace are ignored. Indices outside the
/// catalog are skipped.
///
/// # Errors
/// [`CodecError`] if the token is empty, not base64 or not a state document.
pub fn try_decode(catalog: &Catalog, token: &str) -> Result<PartialStore, CodecError> {
    let token = token.trim().trim_start_matches('#').trim_end_matches('=');
    if token.is_empty() {
        return Err(CodecError::Empty);
    }

    let bytes = URL_SAFE_NO_PAD.decode(token)?;
    let wire: WireState = serde_json::from_slice(&bytes)?;

    let cost_overrides: BTreeMap<String, f64> = wire
        .overrides
        .into_iter()
        .filter_map(|(index, cost)| catalog.get(index).map(|m| (m.title().to_string(), cost)))
        .collect();

    let excluded = wire.excluded.into_iter().filter(|&i| i < catalog.len()).collect();

    Ok(PartialStore {
        cost_overrides,
        default_unknown_cost: wire.default_unknown_cost,
        selected_target: wire.target,
        excluded,
        filter_category: wire.category.map(CategoryFilter::Only),
        filter_cost_type: wire.cost_type,
        search_text: wire.search,
        sort: wire.sort,
    })
}

/// Decode a token, treating anything malformed as "no state"
#[must_use]
pub fn decode(catalog: &Catalog, token: &str) -> PartialStore {
    match try_decode(catalog, token) {
        Ok(partial) => partial,
        Err(CodecError::Empty) => PartialStore::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed state token");
            PartialStore::default()
        }
    }
}
