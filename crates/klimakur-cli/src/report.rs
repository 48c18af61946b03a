//! Plain-text rendering of dashboard views

use crate::format::{billion_nok, format_nb, mt, nok_per_tonne, percent};
use klimakur_catalog::CatalogDiagnostic;
use klimakur_engine::{ConflictWarning, DashboardView, GapMode, SelectionState};
use std::fmt::Write;

/// Totals, target gap and groupings
#[must_use]
pub fn render_summary(view: &DashboardView) -> String {
    let mut out = String::new();
    let total = &view.aggregates.grand_total;
    let gap = &view.gap;

    let _ = writeln!(
        out,
        "Valgt: {} av {} tiltak ({} vist)",
        view.counts.selected, view.counts.total, view.counts.visible
    );
    let _ = writeln!(out, "Potensial:         {}", mt(total.potential));
    let _ = writeln!(out, "Kostnad:           {}", billion_nok(total.cost));
    let _ = writeln!(out, "Snitt tiltakskost: {}", nok_per_tonne(total.avg_unit_cost));
    out.push('\n');

    let _ = writeln!(out, "Mål: {} (nivå {})", gap.target.label, mt(gap.target.level));
    match gap.mode {
        GapMode::Simple => {
            let _ = writeln!(out, "Nødvendig kutt:    {}", mt(gap.required_reduction));
        }
        GapMode::BaselineDecomposition => {
            let _ = writeln!(out, "Nødvendig kutt fra 1990: {}", mt(gap.required_reduction));
            let _ = writeln!(out, "Referansebane:     {}", mt(gap.reference_contribution));
        }
    }
    let _ = writeln!(out, "Utslipp etter tiltak: {}", mt(gap.resulting_level));
    let _ = writeln!(
        out,
        "Dekning:           {} {}",
        percent(gap.coverage_percent),
        progress_bar(gap.coverage_clamped(), 20)
    );
    let _ = writeln!(out, "Gjenstående gap:   {}", mt(gap.gap));
    let _ = writeln!(out, "Når målet:         {}", if gap.reaches_target { "ja" } else { "nei" });
    out.push('\n');

    let _ = writeln!(out, "Per sektor:");
    for b in &view.aggregates.by_category {
        let _ = writeln!(
            out,
            "  {:<24} {:>10}  {:>14}  ({})",
            b.key.label(),
            mt(b.total_potential),
            billion_nok(b.total_cost),
            b.count
        );
    }
    let _ = writeln!(out, "Per kostnadsintervall:");
    for b in &view.aggregates.by_cost_bucket {
        let _ = writeln!(
            out,
            "  {:<24} {:>10}  {:>14}  ({})",
            b.key.label(),
            mt(b.total_potential),
            billion_nok(b.total_cost),
            b.count
        );
    }

    if !view.conflicts.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{} overlappsadvarsler (se `conflicts`)", view.conflicts.len());
    }

    out
}

/// Visible rows in display order
#[must_use]
pub fn render_table(view: &DashboardView) -> String {
    let mut out = String::new();
    let header = match view.selection_state {
        SelectionState::All => "[x]",
        SelectionState::None => "[ ]",
        SelectionState::Some => "[-]",
    };
    let _ = writeln!(
        out,
        "{header} {:<64} {:<22} {:>9} {:>11} {:>10}",
        "Tiltak", "Sektor", "Mt", "kr/t", "mrd. kr"
    );

    for row in view.visible_rows() {
        let mark = if view.is_selected(row.index) { "[x]" } else { "[ ]" };
        let mut cost = format_nb(row.unit_cost, 0);
        if row.is_assumed {
            cost.push('*');
        } else if row.is_overridden {
            cost.push('†');
        }
        let _ = writeln!(
            out,
            "{mark} {:<64} {:<22} {:>9} {:>11} {:>10}",
            truncate(&row.title, 64),
            row.category.label(),
            format_nb(row.potential_display, 2),
            cost,
            format_nb(row.total_cost, 2)
        );
    }

    let _ = writeln!(out, "{} av {} rader vist. * antatt kostnad, † overstyrt", view.counts.visible, view.counts.total);
    out
}

/// Overlap warnings
#[must_use]
pub fn render_conflicts(conflicts: &[ConflictWarning]) -> String {
    if conflicts.is_empty() {
        return "Ingen overlappende tiltak valgt.\n".to_string();
    }
    let mut out = String::new();
    for w in conflicts {
        let _ = writeln!(out, "{} ({}): {}", w.key(), w.group, w.rationale);
    }
    out
}

/// Catalog diagnostics
#[must_use]
pub fn render_diagnostics(diagnostics: &[CatalogDiagnostic]) -> String {
    if diagnostics.is_empty() {
        return "Katalogen er gyldig.\n".to_string();
    }
    let mut out = String::new();
    for d in diagnostics {
        let _ = writeln!(out, "{:?}: {}", d.kind, d.description);
    }
    out
}

fn progress_bar(percent: f64, width: usize) -> String {
    // percent is clamped to [0, 100]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
