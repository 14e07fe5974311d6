use std::fs;

use billing_core::{BillingError, InputSource, LedgerStore};
use billing_domain::{ApartmentId, BillingPeriod, Ledger, LedgerEntry, ReceiptRef};
use billing_storage_json::{
    ensure_inputs_exist, export_ledger_csv, fs::tmp_path, load_apartments, load_rate_schedule,
    JsonLedgerStore,
};
use tempfile::tempdir;

fn entry(apartment: u32, period: &str, amount: i64) -> LedgerEntry {
    let period: BillingPeriod = period.parse().expect("period");
    LedgerEntry::pending(
        ApartmentId(apartment),
        period,
        amount,
        ReceiptRef::new(format!("receipts/receipt_{period}_{apartment}.html")),
    )
}

#[test]
fn absent_ledger_loads_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::new(dir.path().join("payments.json"));
    let ledger = store.load().expect("load");
    assert!(ledger.is_empty());
}

#[test]
fn blank_ledger_file_loads_empty() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("payments.json");
    fs::write(&path, "  \n").expect("write blank ledger");
    let ledger = JsonLedgerStore::new(path).load().expect("load");
    assert!(ledger.is_empty());
}

#[test]
fn corrupt_ledger_is_a_storage_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("payments.json");
    fs::write(&path, "[{\"apartment\": 7,").expect("write corrupt ledger");
    let err = JsonLedgerStore::new(path).load().unwrap_err();
    assert!(matches!(err, BillingError::Storage(_)), "got {err}");
}

#[test]
fn save_and_load_roundtrip_keeps_order() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::new(dir.path().join("payments.json"));
    let ledger = Ledger::from_entries(vec![
        entry(9, "2025-02", 5120),
        entry(7, "2025-03", 4475),
        entry(8, "2025-03", 4175),
    ]);

    store.save(&ledger).expect("save");
    let loaded = store.load().expect("load");

    assert_eq!(loaded, ledger);
    let raw = fs::read_to_string(store.path()).expect("read ledger");
    assert!(raw.contains("\"month\": \"2025-03\""));
    assert!(raw.contains("\"receipt_link\": \"receipts/receipt_2025-03_7.html\""));
    assert!(!tmp_path(store.path()).exists());
}

#[test]
fn overwriting_creates_backups_with_retention() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::with_backups(
        dir.path().join("payments.json"),
        dir.path().join("backups"),
        2,
    );

    store.save(&Ledger::new()).expect("initial save");
    assert!(store.list_backups().expect("list").is_empty());

    let mut ledger = Ledger::new();
    ledger.append(entry(7, "2025-03", 4475));
    store.save(&ledger).expect("second save");

    let backups = store.list_backups().expect("list");
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("payments_") && backups[0].ends_with(".json"));
    let restored: Ledger = serde_json::from_str(
        &fs::read_to_string(store.backups_dir().join(&backups[0])).expect("read backup"),
    )
    .expect("parse backup");
    assert!(restored.is_empty());

    for _ in 0..3 {
        store.save(&ledger).expect("repeat save");
    }
    assert_eq!(store.list_backups().expect("list").len(), 2);
}

#[test]
fn rapid_saves_keep_every_backup() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::with_backups(
        dir.path().join("payments.json"),
        dir.path().join("backups"),
        10,
    );

    for amount in [100, 200, 300, 400] {
        store
            .save(&Ledger::from_entries(vec![entry(7, "2025-03", amount)]))
            .expect("save");
    }

    let backups = store.list_backups().expect("list");
    assert_eq!(backups.len(), 3);
    let newest: Ledger = serde_json::from_str(
        &fs::read_to_string(store.backups_dir().join(&backups[0])).expect("read backup"),
    )
    .expect("parse backup");
    assert_eq!(newest.entries()[0].amount, 300);
}

#[test]
fn same_second_backups_list_newest_first() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::new(dir.path().join("payments.json"));
    fs::create_dir_all(store.backups_dir()).expect("backups dir");
    for name in [
        "payments_20250101_000000.json",
        "payments_20250214_093000.json",
        "payments_20250214_093000-2.json",
        "payments_20250214_093000-1.json",
    ] {
        fs::write(store.backups_dir().join(name), "[]").expect("seed backup");
    }

    assert_eq!(
        store.list_backups().expect("list"),
        [
            "payments_20250214_093000-2.json",
            "payments_20250214_093000-1.json",
            "payments_20250214_093000.json",
            "payments_20250101_000000.json",
        ]
    );
}

#[test]
fn failed_save_preserves_original_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonLedgerStore::new(dir.path().join("payments.json"));
    store
        .save(&Ledger::from_entries(vec![entry(7, "2025-03", 4475)]))
        .expect("initial save");
    let original = fs::read_to_string(store.path()).expect("read original");

    // A directory at the staging path makes File::create fail.
    let tmp = tmp_path(store.path());
    fs::create_dir_all(&tmp).expect("block staging path");

    let result = store.save(&Ledger::from_entries(vec![
        entry(7, "2025-03", 4475),
        entry(8, "2025-03", 4175),
    ]));
    assert!(result.is_err());
    assert_eq!(
        fs::read_to_string(store.path()).expect("read after failure"),
        original
    );
}

#[test]
fn missing_inputs_are_all_named() {
    let dir = tempdir().expect("tempdir");
    let rates = dir.path().join("rates_config.json");
    let apartments = dir.path().join("apartments_config.json");

    let err = ensure_inputs_exist(&[
        (InputSource::RateSchedule, rates.as_path()),
        (InputSource::ApartmentList, apartments.as_path()),
    ])
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("rate schedule"), "{message}");
    assert!(message.contains("apartment list"), "{message}");

    fs::write(&rates, "{}").expect("write rates");
    let err = ensure_inputs_exist(&[
        (InputSource::RateSchedule, rates.as_path()),
        (InputSource::ApartmentList, apartments.as_path()),
    ])
    .unwrap_err();
    match err {
        BillingError::MissingInput(missing) => {
            assert_eq!(missing.len(), 1);
            assert_eq!(missing[0].input, InputSource::ApartmentList);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loads_rate_and_apartment_files() {
    let dir = tempdir().expect("tempdir");
    let rates_path = dir.path().join("rates_config.json");
    let apartments_path = dir.path().join("apartments_config.json");
    fs::write(
        &rates_path,
        r#"{"monthly_rates": {"maintenance_sqm": 50, "capital_repair_sqm": 20, "heat_meter_service_sqm": 5},
            "fixed_rates": {"cleaning_unit": 800, "video_service_unit": 300}}"#,
    )
    .expect("write rates");
    fs::write(
        &apartments_path,
        r#"[{"apartment": 7, "area_sqm": 45.0, "has_video": true},
            {"apartment": 8, "area_sqm": 45}]"#,
    )
    .expect("write apartments");

    let rates = load_rate_schedule(&rates_path).expect("rates");
    assert_eq!(rates.area_rates.len(), 3);
    assert_eq!(rates.flat_rates.get("cleaning_unit"), Some(&800.0));

    let apartments = load_apartments(&apartments_path).expect("apartments");
    assert_eq!(apartments.len(), 2);
    assert!(apartments[0].flag("has_video"));
    assert!(!apartments[1].flag("has_video"));
}

#[test]
fn malformed_inputs_name_their_source() {
    let dir = tempdir().expect("tempdir");
    let apartments_path = dir.path().join("apartments_config.json");

    fs::write(&apartments_path, "{not json").expect("write");
    match load_apartments(&apartments_path).unwrap_err() {
        BillingError::MalformedInput { input, .. } => {
            assert_eq!(input, InputSource::ApartmentList)
        }
        other => panic!("unexpected error: {other}"),
    }

    fs::write(&apartments_path, r#"[{"apartment": 3, "area_sqm": 0}]"#).expect("write");
    let err = load_apartments(&apartments_path).unwrap_err();
    assert!(err.to_string().contains("apartment 3 has invalid area"), "{err}");

    let rates_path = dir.path().join("rates_config.json");
    fs::write(&rates_path, r#"{"monthly_rates": {"maintenance_sqm": "fifty"}}"#).expect("write");
    match load_rate_schedule(&rates_path).unwrap_err() {
        BillingError::MalformedInput { input, .. } => assert_eq!(input, InputSource::RateSchedule),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ledger_exports_to_csv_with_labels_verbatim() {
    let dir = tempdir().expect("tempdir");
    let mut legacy = entry(8, "2025-02", 4175);
    legacy.status = serde_json::from_str(r#""Күтуде""#).expect("status");
    let ledger = Ledger::from_entries(vec![legacy, entry(7, "2025-03", 4475)]);
    let path = dir.path().join("export").join("payments.csv");

    let rows = export_ledger_csv(&ledger, &path).expect("export");

    assert_eq!(rows, 2);
    assert_eq!(
        fs::read_to_string(&path).expect("read csv"),
        "apartment,month,amount,status,receipt_link\n\
         8,2025-02,4175,Күтуде,receipts/receipt_2025-02_8.html\n\
         7,2025-03,4475,Pending,receipts/receipt_2025-03_7.html\n"
    );
}

#[test]
fn empty_ledger_exports_header_only() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("payments.csv");

    assert_eq!(export_ledger_csv(&Ledger::new(), &path).expect("export"), 0);
    assert_eq!(
        fs::read_to_string(&path).expect("read csv"),
        "apartment,month,amount,status,receipt_link\n"
    );
}

#[test]
fn apartment_list_loads_from_csv() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("apartments.csv");
    fs::write(
        &path,
        "apartment,area_sqm,owner,has_video\n7,45,Sadykova,true\n8,45,,false\n",
    )
    .expect("write csv");

    let profiles = load_apartments(&path).expect("load csv");

    assert_eq!(profiles.len(), 2);
    assert!(profiles[0].flag("has_video"));
    assert!(!profiles[1].flag("has_video"));
    assert_eq!(profiles[0].owner.as_deref(), Some("Sadykova"));
}

#[test]
fn malformed_csv_apartment_list_names_its_source() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("apartments.csv");
    fs::write(&path, "apartment,area_sqm\n7,big\n").expect("write csv");

    let err = load_apartments(&path).unwrap_err();

    match err {
        BillingError::MalformedInput { input, reason, .. } => {
            assert_eq!(input, InputSource::ApartmentList);
            assert_eq!(reason, "row 2: invalid area `big`");
        }
        other => panic!("unexpected error: {other}"),
    }
}
