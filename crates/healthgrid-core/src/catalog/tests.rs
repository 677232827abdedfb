use super::*;
use crate::config::SuggestConfig;
use crate::grid::{MemoryWorkbook, Sheet};

fn catalog() -> ReferenceCatalog {
    ReferenceCatalog::new(&Layout::default(), 1000)
}

fn entry(name: &str, first: f64) -> ReferenceEntry {
    let mut attributes = vec![0.0; NUTRIENT_COUNT];
    attributes[0] = first;
    ReferenceEntry::new(name, Cell::text("1 cup"), attributes)
}

fn snapshot(wb: &MemoryWorkbook, kind: EntryKind) -> Vec<ReferenceEntry> {
    catalog().entries(wb, kind).unwrap()
}

#[test]
fn test_entry_kind_parse() {
    assert_eq!(" FOOD ".parse::<EntryKind>().unwrap(), EntryKind::Food);
    assert_eq!("drink".parse::<EntryKind>().unwrap(), EntryKind::Drink);
    assert!("snack".parse::<EntryKind>().is_err());
}

#[test]
fn test_lookup_uses_normalized_names() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    cat.append(&mut wb, EntryKind::Food, &entry("Crème Fraîche", 2.0))
        .unwrap();

    let found = cat
        .lookup(&wb, EntryKind::Food, "  creme   FRAICHE!")
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Crème Fraîche");
    assert_eq!(found.attributes[0], 2.0);
    assert_eq!(found.attributes.len(), NUTRIENT_COUNT);

    assert!(cat.lookup(&wb, EntryKind::Drink, "creme fraiche").unwrap().is_none());
    assert!(cat.lookup(&wb, EntryKind::Food, "").unwrap().is_none());
}

#[test]
fn test_lookup_returns_first_duplicate() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    cat.append(&mut wb, EntryKind::Food, &entry("Oats", 1.0)).unwrap();
    cat.append(&mut wb, EntryKind::Food, &entry("oats", 9.0)).unwrap();

    let found = cat.lookup(&wb, EntryKind::Food, "OATS").unwrap().unwrap();
    assert_eq!(found.attributes[0], 1.0);

    // duplicates survive a resort
    assert_eq!(cat.resort(&mut wb, EntryKind::Food).unwrap(), 2);
    assert_eq!(snapshot(&wb, EntryKind::Food).len(), 2);
}

#[test]
fn test_append_reuses_first_empty_slot() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    assert_eq!(cat.append(&mut wb, EntryKind::Drink, &entry("Tea", 0.0)).unwrap(), 3);
    assert_eq!(cat.append(&mut wb, EntryKind::Drink, &entry("Milk", 0.0)).unwrap(), 4);
    wb.clear(Sheet::Reference, Range::new(3, 22, 1, CatalogBlock::WIDTH))
        .unwrap();
    assert_eq!(cat.append(&mut wb, EntryKind::Drink, &entry("Cola", 0.0)).unwrap(), 3);
}

#[test]
fn test_catalog_grows_past_scan_window() {
    let mut wb = MemoryWorkbook::new();
    let cat = ReferenceCatalog::new(&Layout::default(), 4);
    for name in ["Apple", "Kiwi", "Mango", "Pear", "Zucchini"] {
        cat.append(&mut wb, EntryKind::Food, &entry(name, 1.0)).unwrap();
        cat.resort(&mut wb, EntryKind::Food).unwrap();
    }

    let names: Vec<String> = cat
        .entries(&wb, EntryKind::Food)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Apple", "Kiwi", "Mango", "Pear", "Zucchini"]);
    assert!(cat.lookup(&wb, EntryKind::Food, "zucchini").unwrap().is_some());
}

#[test]
fn test_resort_compacts_and_sorts() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    for name in ["pear", "Apple", "banana"] {
        cat.append(&mut wb, EntryKind::Food, &entry(name, 1.0)).unwrap();
    }
    // leave a hole and a trailing row
    wb.clear(Sheet::Reference, Range::new(4, 2, 1, CatalogBlock::WIDTH))
        .unwrap();
    cat.append(&mut wb, EntryKind::Food, &entry("Zucchini", 1.0)).unwrap();
    wb.write_cell(Sheet::Reference, crate::grid::CellRef::new(9, 2), Cell::text("cherry"))
        .unwrap();

    cat.resort(&mut wb, EntryKind::Food).unwrap();
    let names: Vec<String> = snapshot(&wb, EntryKind::Food)
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["banana", "cherry", "pear", "Zucchini"]);
    assert!(wb
        .read_row(Sheet::Reference, 7, 2, CatalogBlock::WIDTH)
        .unwrap()
        .iter()
        .all(Cell::is_blank));
    assert!(wb.read_cell(Sheet::Reference, crate::grid::CellRef::new(9, 2)).unwrap().is_blank());
}

#[test]
fn test_resort_is_idempotent() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    for (i, name) in ["kiwi", "Fig", "date", "Fig"].iter().enumerate() {
        cat.append(&mut wb, EntryKind::Drink, &entry(name, i as f64)).unwrap();
    }
    cat.resort(&mut wb, EntryKind::Drink).unwrap();
    let once = snapshot(&wb, EntryKind::Drink);
    cat.resort(&mut wb, EntryKind::Drink).unwrap();
    assert_eq!(snapshot(&wb, EntryKind::Drink), once);
    // stable: the two Figs keep their relative order
    assert_eq!(once[1].attributes[0], 1.0);
    assert_eq!(once[2].attributes[0], 3.0);
}

#[test]
fn test_resort_leaves_other_catalog_alone() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    cat.append(&mut wb, EntryKind::Food, &entry("b", 0.0)).unwrap();
    cat.append(&mut wb, EntryKind::Food, &entry("a", 0.0)).unwrap();
    cat.append(&mut wb, EntryKind::Drink, &entry("z", 0.0)).unwrap();
    cat.append(&mut wb, EntryKind::Drink, &entry("y", 0.0)).unwrap();
    cat.resort(&mut wb, EntryKind::Food).unwrap();
    let drinks: Vec<String> = snapshot(&wb, EntryKind::Drink).into_iter().map(|e| e.name).collect();
    assert_eq!(drinks, vec!["z", "y"]);
}

#[test]
fn test_names_union_is_deduplicated() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    cat.append(&mut wb, EntryKind::Food, &entry(" Milk ", 0.0)).unwrap();
    cat.append(&mut wb, EntryKind::Food, &entry("Bread", 0.0)).unwrap();
    cat.append(&mut wb, EntryKind::Drink, &entry("Milk", 0.0)).unwrap();
    cat.append(&mut wb, EntryKind::Drink, &entry("Juice", 0.0)).unwrap();
    assert_eq!(cat.names(&wb).unwrap(), vec!["Milk", "Bread", "Juice"]);
}

#[test]
fn test_grow_resorts_and_refreshes_helper() {
    let mut wb = MemoryWorkbook::new();
    let cat = catalog();
    let blocks = AutocompleteBlocks::new(&SuggestConfig {
        limit: 10,
        block_size: 4,
        block_spacing: 5,
        slots: 2,
    });
    cat.append(&mut wb, EntryKind::Food, &entry("Toast", 0.0)).unwrap();
    cat.grow(&mut wb, EntryKind::Food, &entry("Apple", 0.0), &blocks)
        .unwrap();

    let names: Vec<String> = snapshot(&wb, EntryKind::Food).into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Apple", "Toast"]);
    assert_eq!(blocks.read_slot(&wb, 1).unwrap(), vec!["Apple", "Toast"]);
}
