//! Catalog validation
//!
//! Produces diagnostics instead of failing: the published catalog contains
//! intentional irregularities (a code listed under two sectors, a code
//! reused for two titles) that must be reported, not repaired.

use crate::catalog::Catalog;
use crate::measure::{Category, MeasureId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of catalog irregularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Same code on more than one row
    DuplicateId,
    /// Same title on more than one row
    DuplicateTitle,
    /// Negative or non-finite potential
    InvalidPotential,
    /// Negative or non-finite known cost
    InvalidCost,
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDiagnostic {
    /// Kind of finding
    pub kind: DiagnosticKind,
    /// Catalog indices involved
    pub indices: Vec<usize>,
    /// Categories of the involved rows
    pub categories: Vec<Category>,
    /// Human-readable description
    pub description: String,
}

/// Validate a catalog
///
/// Findings are ordered by kind, then by first catalog index.
#[must_use]
pub fn validate(catalog: &Catalog) -> Vec<CatalogDiagnostic> {
    let mut diagnostics = Vec::new();

    let mut by_id: BTreeMap<&MeasureId, Vec<usize>> = BTreeMap::new();
    let mut by_title: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, m) in catalog.iter().enumerate() {
        if let Some(id) = m.id() {
            by_id.entry(id).or_default().push(i);
        }
        by_title.entry(m.title()).or_default().push(i);
    }

    let categories_of = |indices: &[usize]| -> Vec<Category> {
        indices
            .iter()
            .filter_map(|&i| catalog.get(i).map(|m| m.category()))
            .collect()
    };

    let mut duplicates: Vec<CatalogDiagnostic> = by_id
        .into_iter()
        .filter(|(_, idx)| idx.len() > 1)
        .map(|(id, indices)| {
            let categories = categories_of(&indices);
            let labels: Vec<&str> = categories.iter().map(|c| c.label()).collect();
            CatalogDiagnostic {
                kind: DiagnosticKind::DuplicateId,
                description: format!("code {id} appears on {} rows ({})", indices.len(), labels.join(", ")),
                indices,
                categories,
            }
        })
        .collect();
    duplicates.sort_by_key(|d| d.indices[0]);
    diagnostics.extend(duplicates);

    let mut titles: Vec<CatalogDiagnostic> = by_title
        .into_iter()
        .filter(|(_, idx)| idx.len() > 1)
        .map(|(title, indices)| CatalogDiagnostic {
            kind: DiagnosticKind::DuplicateTitle,
            description: format!("title '{title}' appears on {} rows", indices.len()),
            categories: categories_of(&indices),
            indices,
        })
        .collect();
    titles.sort_by_key(|d| d.indices[0]);
    diagnostics.extend(titles);

    for (i, m) in catalog.iter().enumerate() {
        if !m.potential_kt().is_finite() || m.potential_kt() < 0.0 {
            diagnostics.push(CatalogDiagnostic {
                kind: DiagnosticKind::InvalidPotential,
                indices: vec![i],
                categories: vec![m.category()],
                description: format!("'{}' has invalid potential {}", m.title(), m.potential_kt()),
            });
        }
    }

    for (i, m) in catalog.iter().enumerate() {
        if let Some(c) = m.cost().known() {
            if !c.is_finite() || c < 0.0 {
                diagnostics.push(CatalogDiagnostic {
                    kind: DiagnosticKind::InvalidCost,
                    indices: vec![i],
                    categories: vec![m.category()],
                    description: format!("'{}' has invalid unit cost {c}", m.title()),
                });
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{MeasureRecord, UnitCost};
    use pretty_assertions::assert_eq;

    #[test]
    fn klimakur_reports_known_duplicates() {
        let diags = validate(Catalog::klimakur());
        let ids: Vec<(DiagnosticKind, &str)> = diags
            .iter()
            .map(|d| (d.kind, d.description.split_whitespace().nth(1).unwrap_or("")))
            .collect();

        assert_eq!(
            ids,
            vec![
                (DiagnosticKind::DuplicateId, "S09"),
                (DiagnosticKind::DuplicateId, "O01"),
                (DiagnosticKind::DuplicateTitle, "'S09"),
            ]
        );
    }

    #[test]
    fn s09_duplicate_spans_two_sectors() {
        let diags = validate(Catalog::klimakur());
        let s09 = &diags[0];
        assert_eq!(s09.categories, vec![Category::Maritime, Category::OtherTransport]);
        assert_eq!(s09.indices.len(), 2);
    }

    #[test]
    fn clean_catalog_has_no_findings() {
        let catalog = Catalog::new(vec![
            MeasureRecord::new("A01 En", Category::Other, 1.0, UnitCost::Known(1.0)).unwrap(),
            MeasureRecord::new("A02 To", Category::Other, 2.0, UnitCost::Unknown).unwrap(),
        ]);
        assert!(validate(&catalog).is_empty());
    }
}
