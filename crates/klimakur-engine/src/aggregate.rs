//! Aggregation over selected rows
//!
//! Produces per-category totals, per-cost-bucket totals and a grand total.
//! Both groupings partition the selected rows, so their sums equal the grand
//! total up to floating-point rounding.

use crate::collate::compare_nb;
use crate::params::ParameterStore;
use crate::row::{ComputedRow, KT_NOK_PER_BILLION};
use klimakur_catalog::Category;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Fixed unit-cost ranges used for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBucket {
    /// No assessed cost and no override
    Assumed,
    /// At most 500 NOK/t, including zero and below
    UpTo500,
    /// Above 500 and at most 1500 NOK/t
    From500To1500,
    /// Above 1500 NOK/t
    Above1500,
}

impl CostBucket {
    /// Every bucket, in display order
    pub const ALL: [CostBucket; 4] = [
        CostBucket::Assumed,
        CostBucket::UpTo500,
        CostBucket::From500To1500,
        CostBucket::Above1500,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CostBucket::Assumed => "Antatt",
            CostBucket::UpTo500 => "≤500",
            CostBucket::From500To1500 => "500–1500",
            CostBucket::Above1500 => ">1500",
        }
    }

    /// Bucket a computed row falls into
    #[must_use]
    pub fn for_row(row: &ComputedRow) -> Self {
        if row.is_assumed {
            CostBucket::Assumed
        } else if row.unit_cost <= 500.0 {
            CostBucket::UpTo500
        } else if row.unit_cost <= 1500.0 {
            CostBucket::From500To1500
        } else {
            CostBucket::Above1500
        }
    }
}

impl Display for CostBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Totals for one group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateBucket<K> {
    /// Group key
    pub key: K,
    /// Potential, Mt CO2e
    pub total_potential: f64,
    /// Potential, kt CO2e
    pub total_potential_kt: f64,
    /// Cost, billion NOK
    pub total_cost: f64,
    /// Number of rows
    pub count: usize,
}

impl<K> AggregateBucket<K> {
    fn empty(key: K) -> Self {
        Self {
            key,
            total_potential: 0.0,
            total_potential_kt: 0.0,
            total_cost: 0.0,
            count: 0,
        }
    }

    fn add(&mut self, row: &ComputedRow) {
        self.total_potential += row.potential_display;
        self.total_potential_kt += row.potential_kt;
        self.total_cost += row.total_cost;
        self.count += 1;
    }
}

/// Totals over the whole selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrandTotal {
    /// Potential, Mt CO2e
    pub potential: f64,
    /// Potential, kt CO2e
    pub potential_kt: f64,
    /// Cost, billion NOK
    pub cost: f64,
    /// Potential-weighted unit cost, NOK per tonne; 0 when nothing costs anything
    pub avg_unit_cost: f64,
    /// Number of rows
    pub count: usize,
}

impl GrandTotal {
    /// Totals of an empty selection
    pub const ZERO: GrandTotal = GrandTotal {
        potential: 0.0,
        potential_kt: 0.0,
        cost: 0.0,
        avg_unit_cost: 0.0,
        count: 0,
    };
}

/// Grouped and overall totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    /// Per category present in the selection, ordered by label
    pub by_category: Vec<AggregateBucket<Category>>,
    /// Per cost bucket, every bucket present, in [`CostBucket::ALL`] order
    pub by_cost_bucket: Vec<AggregateBucket<CostBucket>>,
    /// Overall totals
    pub grand_total: GrandTotal,
}

/// Rows whose title is in the selection, in catalog order
#[must_use]
pub fn selected_rows<'a>(rows: &'a [ComputedRow], store: &ParameterStore) -> Vec<&'a ComputedRow> {
    rows.iter().filter(|r| store.is_selected(&r.title)).collect()
}

/// Reduce selected rows into totals
#[must_use]
pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a ComputedRow>) -> Aggregates {
    let mut by_category: BTreeMap<Category, AggregateBucket<Category>> = BTreeMap::new();
    let mut by_cost_bucket: Vec<AggregateBucket<CostBucket>> =
        CostBucket::ALL.into_iter().map(AggregateBucket::empty).collect();
    let mut total = AggregateBucket::empty(());

    for row in rows {
        by_category
            .entry(row.category)
            .or_insert_with(|| AggregateBucket::empty(row.category))
            .add(row);

        let bucket = CostBucket::for_row(row);
        if let Some(slot) = by_cost_bucket.iter_mut().find(|b| b.key == bucket) {
            slot.add(row);
        }

        total.add(row);
    }

    let mut by_category: Vec<_> = by_category.into_values().collect();
    by_category.sort_by(|a, b| compare_nb(a.key.label(), b.key.label()));

    let avg_unit_cost = if total.total_cost > 0.0 && total.total_potential_kt > 0.0 {
        total.total_cost * KT_NOK_PER_BILLION / total.total_potential_kt
    } else {
        0.0
    };

    Aggregates {
        by_category,
        by_cost_bucket,
        grand_total: GrandTotal {
            potential: total.total_potential,
            potential_kt: total.total_potential_kt,
            cost: total.total_cost,
            avg_unit_cost,
            count: total.count,
        },
    }
}
