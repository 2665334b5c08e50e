//! Shared entity command infrastructure
//!
//! The six entity command families are shaped identically: list, show,
//! edit, delete, and (for ordered entities) move. The generic
//! implementations live here so each command file only carries its
//! entity-specific pieces - creation flags, wizards, pretty printers.

use chrono::Utc;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use miette::{IntoDiagnostic, Result};
use serde_json::{json, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use ulid::Ulid;

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::filters::ActiveFilter;
use crate::cli::helpers::{format_short_id_str, truncate_str};
use crate::core::config::Config;
use crate::core::entity::ContentRecord;
use crate::core::ordering::{self, Direction, MoveOutcome, Orderable};
use crate::store::{RestStore, StoreError};

/// Convert a store error into a user-facing diagnostic
pub fn store_report(error: StoreError) -> miette::Report {
    miette::miette!("{error}")
}

// =========================================================================
// Record resolution
// =========================================================================

/// Find a single record by id, id prefix, or title substring.
///
/// Mirrors the lookup rules of `show`/`edit`/`delete` across entities:
/// exact id wins, then id prefix, then a case-insensitive title match.
/// Zero matches or more than one is an error; the ambiguous case lists
/// the candidates first.
pub fn resolve_record<'a, T: ContentRecord>(items: &'a [T], query: &str) -> Result<&'a T> {
    if let Some(exact) = items.iter().find(|item| item.id() == Some(query)) {
        return Ok(exact);
    }

    let query_lower = query.to_lowercase();
    let matches: Vec<&T> = items
        .iter()
        .filter(|item| {
            item.id().is_some_and(|id| id.starts_with(query))
                || item.display_title().to_lowercase().contains(&query_lower)
        })
        .collect();

    match matches.len() {
        0 => Err(miette::miette!(
            "No {} found matching '{}'",
            T::NAME,
            query
        )),
        1 => Ok(matches[0]),
        _ => {
            println!("{} Multiple matches found:", style("!").yellow());
            for item in &matches {
                println!(
                    "  {} - {}",
                    item.id().map(format_short_id_str).unwrap_or_else(|| "-".to_string()),
                    item.display_title()
                );
            }
            Err(miette::miette!(
                "Ambiguous query '{}'. Please be more specific.",
                query
            ))
        }
    }
}

// =========================================================================
// List
// =========================================================================

#[derive(Tabled)]
struct OrderedRow {
    #[tabled(rename = "POS")]
    position: usize,
    #[tabled(rename = "ORDER")]
    order: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "ACTIVE")]
    active: &'static str,
}

/// Generic list for ordered entities: fetch, sort, filter, print
pub async fn run_list_generic<T>(
    store: &RestStore,
    filter: ActiveFilter,
    global: &GlobalOpts,
) -> Result<()>
where
    T: ContentRecord + Orderable,
{
    let mut items = ordering::fetch_sorted::<T, _>(store)
        .await
        .map_err(store_report)?;
    items.retain(|item| filter.matches(item.is_active()));
    emit_list_format(&items, global)
}

/// Print an already-sorted list in the requested output format
pub fn emit_list_format<T>(items: &[T], global: &GlobalOpts) -> Result<()>
where
    T: ContentRecord + Orderable,
{
    match global.format {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&items).into_diagnostic()?);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for item in items {
                if let Some(id) = item.id() {
                    println!("{id}");
                }
            }
        }
        OutputFormat::Table => print_ordered_table(items),
    }
    Ok(())
}

/// Table + count footer for an ordered, display-sorted list
pub fn print_ordered_table<T: ContentRecord + Orderable>(items: &[T]) {
    if items.is_empty() {
        println!("No {} found.", T::NAME_PLURAL);
        return;
    }

    let rows: Vec<OrderedRow> = items
        .iter()
        .enumerate()
        .map(|(i, item)| OrderedRow {
            position: i + 1,
            order: item
                .order()
                .map(|o| o.to_string())
                .unwrap_or_else(|| "-".to_string()),
            id: item
                .id()
                .map(format_short_id_str)
                .unwrap_or_else(|| "-".to_string()),
            title: truncate_str(item.display_title(), 40),
            active: if item.is_active() { "yes" } else { "no" },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
    println!();
    println!("{} {} found", style(items.len()).cyan(), T::NAME_PLURAL);
}

// =========================================================================
// Show
// =========================================================================

/// Generic show that handles YAML/JSON/ID output formats.
///
/// Returns true for table output (default), telling the caller to run
/// its entity-specific pretty printer.
pub fn emit_record_format<T>(record: &T, global: &GlobalOpts) -> Result<bool>
where
    T: ContentRecord,
{
    match global.format {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(record).into_diagnostic()?);
            Ok(false)
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record).into_diagnostic()?);
            Ok(false)
        }
        OutputFormat::Id => {
            match record.id() {
                Some(id) => println!("{id}"),
                None => println!("-"),
            }
            Ok(false)
        }
        OutputFormat::Table => Ok(true),
    }
}

// =========================================================================
// Edit
// =========================================================================

/// Generic edit: round-trip the record through `$EDITOR` as YAML, then
/// PATCH the changed row back.
///
/// `id`, `created_at`, and `order` never ride along on an edit - the
/// first two are backend-managed, and order changes only through `move`.
pub async fn run_edit_generic<T>(store: &RestStore, config: &Config, record: &T) -> Result<()>
where
    T: ContentRecord + 'static,
{
    let id = record
        .id()
        .ok_or_else(|| miette::miette!("this {} has no id and cannot be edited", T::NAME))?
        .to_string();

    let yaml = serde_yml::to_string(record).into_diagnostic()?;
    let path = std::env::temp_dir().join(format!("sct-{}-{}.yaml", T::NAME, Ulid::new()));
    std::fs::write(&path, &yaml).into_diagnostic()?;

    println!(
        "Opening {} in {}...",
        style(path.display()).cyan(),
        style(config.editor()).yellow()
    );
    let edit_result = config.run_editor(&path);
    let edited_yaml = std::fs::read_to_string(&path).into_diagnostic()?;
    let _ = std::fs::remove_file(&path);
    edit_result.map_err(|e| miette::miette!("{e}"))?;

    if edited_yaml == yaml {
        println!("No changes.");
        return Ok(());
    }

    let edited: T = serde_yml::from_str(&edited_yaml)
        .map_err(|e| miette::miette!("edited YAML does not parse: {e}"))?;

    let patch = edit_patch(&edited)?;
    store
        .update_where(T::TABLE, "id", &id, &patch)
        .await
        .map_err(store_report)?;

    println!(
        "{} Updated {} {}",
        style("✓").green(),
        T::NAME,
        style(edited.display_title()).cyan()
    );
    Ok(())
}

/// Serialize an edited record into a PATCH body, stripping columns the
/// toolkit must not overwrite and stamping `updated_at` where the table
/// has one.
pub fn edit_patch<T: ContentRecord>(edited: &T) -> Result<Value> {
    let mut value = serde_json::to_value(edited).into_diagnostic()?;
    if let Value::Object(object) = &mut value {
        object.remove("id");
        object.remove("created_at");
        object.remove("order");
        if T::HAS_TIMESTAMPS {
            object.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));
        }
    }
    Ok(value)
}

// =========================================================================
// Delete
// =========================================================================

/// Generic delete with confirmation. Returns false if the user aborted.
pub async fn run_delete_generic<T>(
    store: &RestStore,
    record: &T,
    yes: bool,
) -> Result<bool>
where
    T: ContentRecord,
{
    let id = record
        .id()
        .ok_or_else(|| miette::miette!("this {} has no id and cannot be deleted", T::NAME))?
        .to_string();

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete {} \"{}\"?",
                T::NAME,
                record.display_title()
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(false);
        }
    }

    store
        .delete_where::<T>("id", &id)
        .await
        .map_err(store_report)?;

    println!(
        "{} Deleted {} {}",
        style("✓").green(),
        T::NAME,
        style(record.display_title()).cyan()
    );
    Ok(true)
}

// =========================================================================
// Move
// =========================================================================

/// Generic single-step reorder: optimistic move, parallel persistence,
/// re-fetch on failure.
pub async fn run_move_generic<T>(
    store: &RestStore,
    position: usize,
    direction: Direction,
) -> Result<()>
where
    T: ContentRecord + Orderable,
{
    let items = ordering::fetch_sorted::<T, _>(store)
        .await
        .map_err(store_report)?;

    if items.is_empty() {
        println!("No {} found.", T::NAME_PLURAL);
        return Ok(());
    }
    if position == 0 || position > items.len() {
        return Err(miette::miette!(
            "Position {} is out of range (1-{})",
            position,
            items.len()
        ));
    }

    let index = position - 1;
    let title = items[index].display_title().to_string();

    match ordering::move_and_persist(store, items, index, direction)
        .await
        .map_err(store_report)?
    {
        MoveOutcome::NoOp { .. } => {
            let edge = match direction {
                Direction::Up => "top",
                Direction::Down => "bottom",
            };
            println!(
                "{} {} is already at the {}.",
                style("·").dim(),
                style(&title).cyan(),
                edge
            );
            Ok(())
        }
        MoveOutcome::Persisted { items, updated } => {
            println!(
                "{} Moved {} {}",
                style("✓").green(),
                style(&title).cyan(),
                direction
            );
            print_ordered_table(&items);
            println!("{}", style(format!("{updated} order update(s) persisted")).dim());
            Ok(())
        }
        MoveOutcome::Reverted { items, error } => {
            println!(
                "{} Reordering failed; the remote order shown below is back in effect.",
                style("!").yellow()
            );
            print_ordered_table(&items);
            Err(store_report(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Service;

    fn service(id: &str, title: &str) -> Service {
        Service {
            id: Some(id.to_string()),
            ..Service::new(title.to_string(), "d".to_string())
        }
    }

    #[test]
    fn test_resolve_exact_id() {
        let items = vec![service("aaa-1", "SEO"), service("aaa-2", "Ads")];
        let found = resolve_record(&items, "aaa-2").unwrap();
        assert_eq!(found.title, "Ads");
    }

    #[test]
    fn test_resolve_id_prefix_and_title() {
        let items = vec![service("abc-1", "SEO"), service("xyz-2", "Paid ads")];
        assert_eq!(resolve_record(&items, "abc").unwrap().title, "SEO");
        assert_eq!(resolve_record(&items, "paid").unwrap().title, "Paid ads");
    }

    #[test]
    fn test_resolve_rejects_ambiguous_and_missing() {
        let items = vec![service("a1", "Brand strategy"), service("a2", "Brand design")];
        assert!(resolve_record(&items, "brand").is_err());
        assert!(resolve_record(&items, "nope").is_err());
    }

    #[test]
    fn test_edit_patch_strips_managed_columns() {
        let patch = edit_patch(&service("aaa-1", "SEO")).unwrap();
        let object = patch.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("created_at"));
        assert!(!object.contains_key("order"));
        assert!(object.contains_key("updated_at"));
        assert_eq!(object["title"], serde_json::json!("SEO"));
    }
}
