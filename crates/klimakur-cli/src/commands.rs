//! Subcommand execution
//!
//! Every invocation restores a [`ParameterStore`] (fragment token first,
//! then the state file), applies at most one mutation, and writes the
//! result back through the [`KeyValueStore`].

use crate::file_store::FileStore;
use crate::report;
use anyhow::{bail, Context};
use clap::ArgMatches;
use klimakur_catalog::{Catalog, Category, MeasureId, TargetKey};
use klimakur_engine::{
    copy_share_link, fragment_token, persist_store, CategoryFilter, ClipboardSink, CostTypeFilter, Dashboard,
    EngineConfig, KeyValueStore, MemoryStore, ParameterStore, SortColumn, SortDirection, SortSpec, StoreError,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// [`ClipboardSink`] that prints the link on its own line
pub struct WriterSink<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> WriterSink<'a, W> {
    /// Sink over `out`
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }
}

impl<W: Write> ClipboardSink for WriterSink<'_, W> {
    fn write_text(&mut self, text: &str) -> Result<(), StoreError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}

/// Run the parsed command line, writing results to `out`
///
/// # Errors
/// Unreadable configuration, an unknown or ambiguous measure, a rejected
/// parameter value, or a failed write to `out`.
pub fn run<W: Write>(matches: &ArgMatches, out: &mut W) -> anyhow::Result<()> {
    let dashboard = open_dashboard(matches)?;
    let mut kv = open_store(matches);
    let json = matches.get_flag("json");

    let fragment = matches
        .get_one::<String>("state")
        .and_then(|s| if s.contains('#') { fragment_token(s) } else { Some(s.as_str()) });
    let store = dashboard.restore(fragment, &*kv);

    let Some((name, sub)) = matches.subcommand() else {
        bail!("no subcommand given");
    };
    tracing::debug!(command = name, "running");

    match name {
        "summary" => {
            let view = dashboard.view(&store);
            if json {
                emit(out, &*view)
            } else {
                write!(out, "{}", report::render_summary(&view))?;
                Ok(())
            }
        }
        "table" => {
            let updated = apply_table_options(store.clone(), sub)?;
            if updated != store {
                persist_store(dashboard.catalog(), &updated, &mut *kv);
            }
            let view = dashboard.view(&updated);
            if json {
                emit(out, &view.visible_rows().collect::<Vec<_>>())
            } else {
                write!(out, "{}", report::render_table(&view))?;
                Ok(())
            }
        }
        "conflicts" => {
            let view = dashboard.view(&store);
            if json {
                emit(out, &view.conflicts)
            } else {
                write!(out, "{}", report::render_conflicts(&view.conflicts))?;
                Ok(())
            }
        }
        "validate" => {
            let diagnostics = dashboard.validate();
            if json {
                emit(out, &diagnostics)
            } else {
                write!(out, "{}", report::render_diagnostics(&diagnostics))?;
                Ok(())
            }
        }
        "share" => {
            let base = sub.get_one::<String>("base").map_or("", String::as_str);
            if json {
                let outcome = copy_share_link(base, dashboard.catalog(), &store, &mut WriterSink::new(&mut std::io::sink()));
                emit(out, &outcome)
            } else {
                let outcome = copy_share_link(base, dashboard.catalog(), &store, &mut WriterSink::new(out));
                if !outcome.is_copied() {
                    bail!("could not write share link");
                }
                Ok(())
            }
        }
        _ => {
            let updated = apply_mutation(dashboard.catalog(), store, name, sub)?;
            commit(&dashboard, &updated, &mut *kv, json, out)
        }
    }
}

fn open_dashboard(matches: &ArgMatches) -> anyhow::Result<Dashboard> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Dashboard::klimakur_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Dashboard::klimakur(EngineConfig::default())),
    }
}

fn open_store(matches: &ArgMatches) -> Box<dyn KeyValueStore> {
    match matches.get_one::<PathBuf>("store") {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    }
}

fn apply_mutation(
    catalog: &Catalog,
    store: ParameterStore,
    name: &str,
    sub: &ArgMatches,
) -> anyhow::Result<ParameterStore> {
    let updated = match name {
        "toggle" => {
            let mut store = store;
            for query in sub.get_many::<String>("measure").into_iter().flatten() {
                store = store.toggle(&resolve_title(catalog, query)?);
            }
            store
        }
        "select-all" => store.select_all_visible(catalog),
        "deselect-all" => store.deselect_all_visible(catalog),
        "set-cost" => {
            let title = resolve_title(catalog, required(sub, "measure")?)?;
            let value = sub.get_one::<f64>("value").copied().unwrap_or_default();
            store
                .with_cost_override(catalog, &title, value)
                .with_context(|| format!("cannot override cost of '{title}'"))?
        }
        "clear-cost" => {
            let title = resolve_title(catalog, required(sub, "measure")?)?;
            store.without_cost_override(&title)
        }
        "default-cost" => {
            let value = sub.get_one::<f64>("value").copied().unwrap_or_default();
            store
                .with_default_unknown_cost(value)
                .context("cannot set default cost")?
        }
        "target" => {
            let key: TargetKey = required(sub, "key")?.parse()?;
            store.with_target(key)
        }
        "reset" => {
            if sub.get_flag("costs") {
                store.reset_costs()
            } else {
                store.reset_all(catalog)
            }
        }
        other => bail!("unknown command '{other}'"),
    };
    Ok(updated)
}

fn apply_table_options(mut store: ParameterStore, sub: &ArgMatches) -> anyhow::Result<ParameterStore> {
    if let Some(category) = sub.get_one::<String>("category") {
        let filter = if matches!(category.trim().to_lowercase().as_str(), "alle" | "all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(category.parse::<Category>()?)
        };
        store = store.with_category_filter(filter);
    }
    if let Some(text) = sub.get_one::<String>("search") {
        store = store.with_search_text(text.as_str());
    }
    if let Some(kind) = sub.get_one::<String>("cost-type") {
        let filter = match kind.as_str() {
            "known" => CostTypeFilter::Known,
            "assumed" => CostTypeFilter::Assumed,
            _ => CostTypeFilter::All,
        };
        store = store.with_cost_type_filter(filter);
    }
    if let Some(column) = sub.get_one::<String>("sort") {
        let column = match column.as_str() {
            "title" => Some(SortColumn::Title),
            "category" => Some(SortColumn::Category),
            "potential" => Some(SortColumn::Potential),
            "unit_cost" => Some(SortColumn::UnitCost),
            "total_cost" => Some(SortColumn::TotalCost),
            _ => None,
        };
        let direction = if sub.get_flag("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        store = store.with_sort(column.map(|c| SortSpec::new(c, direction)));
    }
    Ok(store)
}

fn commit<W: Write>(
    dashboard: &Dashboard,
    store: &ParameterStore,
    kv: &mut dyn KeyValueStore,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let persisted = persist_store(dashboard.catalog(), store, kv);
    let token = dashboard.encode(store);
    tracing::info!(persisted, token = %token, "state updated");

    if json {
        return emit(out, &serde_json::json!({ "token": token, "persisted": persisted }));
    }
    let view = dashboard.view(store);
    write!(out, "{}", report::render_summary(&view))?;
    writeln!(out, "\nTilstand: {token}")?;
    Ok(())
}

/// Title for a full title or a measure code
///
/// # Errors
/// No row matches, or a code is shared by rows with different titles.
pub fn resolve_title(catalog: &Catalog, query: &str) -> anyhow::Result<String> {
    let query = query.trim();
    if catalog.contains_title(query) {
        return Ok(query.to_string());
    }

    let id = MeasureId::new(query.to_uppercase());
    let mut titles: Vec<&str> = Vec::new();
    for (_, m) in catalog.find_by_id(&id) {
        if !titles.contains(&m.title()) {
            titles.push(m.title());
        }
    }

    match titles.as_slice() {
        [] => bail!("no measure matches '{query}'"),
        [title] => Ok((*title).to_string()),
        many => bail!("'{query}' matches {} measures: {}", many.len(), many.join("; ")),
    }
}

fn required<'a>(sub: &'a ArgMatches, id: &str) -> anyhow::Result<&'a str> {
    sub.get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("missing argument <{id}>"))
}

fn emit<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_cli;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let matches = build_cli().try_get_matches_from(args)?;
        let mut out = Vec::new();
        run(&matches, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn token_of(output: &str) -> String {
        output
            .lines()
            .find_map(|l| l.strip_prefix("Tilstand: "))
            .unwrap()
            .to_string()
    }

    #[test]
    fn resolves_codes_and_titles() {
        let catalog = Catalog::klimakur();
        assert_eq!(
            resolve_title(catalog, "t05").unwrap(),
            "T05 100% av nye personbiler er elektriske innen 2025"
        );
        assert_eq!(
            resolve_title(catalog, "T05 100% av nye personbiler er elektriske innen 2025").unwrap(),
            "T05 100% av nye personbiler er elektriske innen 2025"
        );
        assert!(resolve_title(catalog, "Z99").is_err());
    }

    #[test]
    fn reused_code_is_ambiguous() {
        let err = resolve_title(Catalog::klimakur(), "O01").unwrap_err();
        assert!(err.to_string().contains("matches 2 measures"));
    }

    #[test]
    fn mutation_persists_to_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let path = path.to_str().unwrap();

        run_args(&["klimakur", "toggle", "T05", "--store", path]).unwrap();
        let json = run_args(&["klimakur", "summary", "--json", "--store", path]).unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["counts"]["selected"], 62);
        assert_eq!(view["counts"]["total"], 63);
    }

    #[test]
    fn without_store_nothing_is_remembered() {
        run_args(&["klimakur", "toggle", "T05"]).unwrap();
        let json = run_args(&["klimakur", "summary", "--json"]).unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["counts"]["selected"], 63);
    }

    #[test]
    fn state_token_round_trips_through_share() {
        let output = run_args(&["klimakur", "set-cost", "T05", "900"]).unwrap();
        let token = token_of(&output);

        let link = run_args(&["klimakur", "share", "https://klimakur.test/app#old", "--state", token.as_str()]).unwrap();
        assert_eq!(link.trim(), format!("https://klimakur.test/app#{token}"));

        let json = run_args(&["klimakur", "table", "--search", "nye personbiler er elektriske", "--json", "--state", link.trim()]).unwrap();
        let rows: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows[0]["unit_cost"], 900.0);
        assert_eq!(rows[0]["is_overridden"], true);
    }

    #[test]
    fn reset_costs_keeps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let path = path.to_str().unwrap();

        run_args(&["klimakur", "toggle", "T05", "--store", path]).unwrap();
        run_args(&["klimakur", "default-cost", "3000", "--store", path]).unwrap();
        run_args(&["klimakur", "reset", "--costs", "--store", path]).unwrap();

        let json = run_args(&["klimakur", "summary", "--json", "--store", path]).unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["counts"]["selected"], 62);

        let json = run_args(&["klimakur", "table", "--search", "S01", "--json", "--store", path]).unwrap();
        let rows: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows[0]["unit_cost"], 1500.0);
    }

    #[test]
    fn table_filters_by_category_label() {
        let json = run_args(&["klimakur", "table", "--category", "Petroleum", "--json"]).unwrap();
        let rows: Value = serde_json::from_str(&json).unwrap();
        let rows = rows.as_array().unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r["category"] == "petroleum"));

        let json = run_args(&["klimakur", "table", "--category", "alle", "--json"]).unwrap();
        let rows: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 63);
    }

    #[test]
    fn negative_override_is_clamped() {
        let output = run_args(&["klimakur", "set-cost", "T05", "-200", "--json"]).unwrap();
        let token = serde_json::from_str::<Value>(&output).unwrap()["token"]
            .as_str()
            .unwrap()
            .to_string();
        let json = run_args(&["klimakur", "table", "--search", "nye personbiler er elektriske", "--json", "--state", token.as_str()]).unwrap();
        let rows: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows[0]["unit_cost"], 0.0);
    }

    #[test]
    fn config_file_sets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "default_target = \"cut90_2050\"\n").unwrap();

        let json = run_args(&["klimakur", "summary", "--json", "--config", path.to_str().unwrap()]).unwrap();
        let view: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(view["gap"]["target"]["key"], "cut90_2050");

        let missing = dir.path().join("missing.toml");
        assert!(run_args(&["klimakur", "summary", "--config", missing.to_str().unwrap()]).is_err());
    }

    #[test]
    fn non_finite_default_cost_rejected() {
        assert!(run_args(&["klimakur", "default-cost", "NaN"]).is_err());
    }

    #[test]
    fn validate_reports_known_irregularities() {
        let json = run_args(&["klimakur", "validate", "--json"]).unwrap();
        let diagnostics: Value = serde_json::from_str(&json).unwrap();
        assert!(diagnostics
            .as_array()
            .unwrap()
            .iter()
            .any(|d| d["kind"] == "duplicate_id"));
    }
}
