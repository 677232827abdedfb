//! `healthgrid catalog` - list, show, add and resort reference entries

use serde_json::{json, Value};

use crate::cli::Cli;
use crate::commands::format::{cell_json, output_by_format_result, print_json_status};
use crate::commands::with_document_lock;
use healthgrid_core::bail_invalid;
use healthgrid_core::catalog::{EntryKind, ReferenceCatalog, ReferenceEntry};
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::{HealthError, Result};
use healthgrid_core::grid::{format_number, parse_cell};
use healthgrid_core::layout::NUTRIENT_COUNT;
use healthgrid_core::store::Store;

fn catalog(store: &Store) -> ReferenceCatalog {
    ReferenceCatalog::new(store.layout(), store.config().max_rows)
}

fn entry_json(kind: EntryKind, entry: &ReferenceEntry) -> Value {
    json!({
        "kind": kind,
        "name": entry.name,
        "measure": cell_json(&entry.measure),
        "attributes": entry.attributes,
    })
}

pub fn execute_list(cli: &Cli, store: &mut Store, kind: Option<EntryKind>) -> Result<()> {
    let catalog = catalog(store);
    let kinds: Vec<EntryKind> = match kind {
        Some(kind) => vec![kind],
        None => EntryKind::ALL.to_vec(),
    };
    let mut listed = Vec::new();
    for kind in kinds {
        for entry in catalog.entries(store.workbook(), kind)? {
            listed.push((kind, entry));
        }
    }

    output_by_format_result!(cli.format,
        json => {
            let entries: Vec<Value> = listed.iter().map(|(k, e)| entry_json(*k, e)).collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "entries": entries }))?);
            Ok(())
        },
        human => {
            if listed.is_empty() && !cli.quiet {
                println!("No catalog entries");
            }
            for (kind, entry) in &listed {
                if entry.measure.is_blank() {
                    println!("{:<6} {}", kind.as_str(), entry.name);
                } else {
                    println!("{:<6} {} ({})", kind.as_str(), entry.name, entry.measure);
                }
            }
        }
    )
}

pub fn execute_show(cli: &Cli, store: &mut Store, name: &str, kind: EntryKind) -> Result<()> {
    let entry = catalog(store)
        .lookup(store.workbook(), kind, name)?
        .ok_or_else(|| HealthError::not_found(&format!("{} entry", kind), name))?;

    output_by_format_result!(cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&entry_json(kind, &entry))?);
            Ok(())
        },
        human => {
            println!("{} [{}]", entry.name, kind);
            if !entry.measure.is_blank() {
                println!("measure: {}", entry.measure);
            }
            let values: Vec<String> = entry.attributes.iter().map(|v| format_number(*v)).collect();
            println!("values: {}", values.join(", "));
        }
    )
}

pub fn execute_add(
    cli: &Cli,
    store: &mut Store,
    kind: EntryKind,
    name: &str,
    measure: Option<&str>,
    values: &[f64],
) -> Result<()> {
    if values.len() > NUTRIENT_COUNT {
        bail_invalid!(
            "catalog values",
            format!("{} values (at most {})", values.len(), NUTRIENT_COUNT)
        );
    }
    let mut attributes = values.to_vec();
    attributes.resize(NUTRIENT_COUNT, 0.0);
    let measure = measure.map(parse_cell).unwrap_or_default();
    let entry = ReferenceEntry::new(name.trim(), measure, attributes);

    let clock = SystemClock;
    with_document_lock(cli, store, |store| store.engine(&clock).add_catalog_entry(kind, &entry))?;

    output_by_format_result!(cli.format,
        json => print_json_status("added", None, &[("entry", entry_json(kind, &entry))]),
        human => {
            if !cli.quiet {
                println!("Added {} to the {} catalog", entry.name, kind.as_str().to_lowercase());
            }
        }
    )
}

pub fn execute_sort(cli: &Cli, store: &mut Store) -> Result<()> {
    let clock = SystemClock;
    with_document_lock(cli, store, |store| store.engine(&clock).resort_catalogs())?;
    let catalog = catalog(store);
    let counts: Vec<(EntryKind, usize)> = EntryKind::ALL
        .into_iter()
        .map(|kind| Ok((kind, catalog.entries(store.workbook(), kind)?.len())))
        .collect::<Result<_>>()?;

    output_by_format_result!(cli.format,
        json => {
            let fields: Vec<(&str, Value)> = counts
                .iter()
                .map(|(kind, n)| (if *kind == EntryKind::Food { "food" } else { "drink" }, json!(n)))
                .collect();
            print_json_status("sorted", None, &fields)
        },
        human => {
            if !cli.quiet {
                for (kind, n) in &counts {
                    println!("{}: {} entries", kind, n);
                }
            }
        }
    )
}
