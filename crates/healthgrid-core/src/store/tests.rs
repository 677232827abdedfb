use super::*;
use crate::clock::FixedClock;
use crate::grid::{Cell, CellRef, Sheet, Workbook};
use crate::lock::DocumentLock;
use chrono::NaiveDate;
use tempfile::tempdir;

#[test]
fn test_init_and_discover_from_subdirectory() {
    let dir = tempdir().unwrap();
    let store = Store::init(dir.path()).unwrap();
    assert_eq!(store.root(), dir.path().join(DEFAULT_STORE_DIR));
    assert!(store.root().join(CONFIG_FILE).exists());
    assert!(store.root().join(DATABASE_FILE).exists());
    drop(store);

    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    let discovered = Store::discover(&nested).unwrap();
    assert_eq!(discovered.root(), dir.path().join(DEFAULT_STORE_DIR));
    assert_eq!(discovered.config().max_rows, 1000);
}

#[test]
fn test_init_twice_fails() {
    let dir = tempdir().unwrap();
    Store::init(dir.path()).unwrap();
    let err = Store::init(dir.path()).unwrap_err();
    assert!(matches!(err, HealthError::StoreExists { .. }));
}

#[test]
fn test_discover_without_store() {
    let dir = tempdir().unwrap();
    let err = Store::discover(dir.path()).unwrap_err();
    assert!(matches!(err, HealthError::StoreNotFound { .. }));
}

#[test]
fn test_open_uses_config_overrides() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("custom");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join(CONFIG_FILE), "max_rows = 50\n[suggest]\nslots = 4\n").unwrap();
    let store = Store::open(&root).unwrap();
    assert_eq!(store.config().max_rows, 50);
    assert_eq!(store.config().suggest.slots, 4);
    assert_eq!(store.config().suggest.limit, 300);
}

#[test]
fn test_submissions_persist_across_reopen() {
    let dir = tempdir().unwrap();
    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    );
    {
        let mut store = Store::init(dir.path()).unwrap();
        let mut engine = store.engine(&clock);
        engine
            .stage(crate::submit::Family::Water, vec![Cell::Empty, Cell::Number(750.0)])
            .unwrap();
        engine.submit(crate::submit::Family::Water).unwrap();
    }
    let store = Store::discover(dir.path()).unwrap();
    let total = store
        .workbook()
        .read_cell(Sheet::DataTables, CellRef::new(4, 32))
        .unwrap();
    assert_eq!(total, Cell::Number(750.0));
}

#[test]
fn test_lock_file_lives_in_store() {
    let dir = tempdir().unwrap();
    let store = Store::init(dir.path()).unwrap();
    assert_eq!(store.lock().path(), store.root().join(LOCK_FILE));
}

#[test]
fn test_with_lock_holds_document_lock_during_work() {
    let dir = tempdir().unwrap();
    let mut store = Store::init(dir.path()).unwrap();
    let locked = store
        .with_lock(|store| store.lock().try_acquire())
        .unwrap();
    assert!(locked.lock_acquired);
    assert!(!locked.value, "lock must be held while the work runs");
    assert!(store.lock().try_acquire().unwrap());
}

#[test]
fn test_with_lock_proceeds_unlocked_when_busy() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("busy");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join(CONFIG_FILE), "[lock]\ntimeout_secs = 0\npoll_millis = 1\n").unwrap();
    let mut store = Store::open(&root).unwrap();
    let holder = store.lock();
    assert!(holder.try_acquire().unwrap());

    let clock = FixedClock(
        NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    );
    let locked = store
        .with_lock(|store| {
            store
                .engine(&clock)
                .stage(crate::submit::Family::Water, vec![Cell::Empty, Cell::Number(250.0)])
        })
        .unwrap();
    assert!(!locked.lock_acquired);
    let staged = CellRef::new(locked.value.row, locked.value.col + 1);
    assert_eq!(
        store.workbook().read_cell(Sheet::Inputs, staged).unwrap(),
        Cell::Number(250.0)
    );
    holder.release().unwrap();
}
