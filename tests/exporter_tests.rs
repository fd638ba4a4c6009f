// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use std::io::{self, Write};
use stockkeep::ExportError;
use stockkeep::ledger::InventoryLedger;
use stockkeep::models::ItemForm;
use stockkeep::{cli, commands::exporter};
use tempfile::tempdir;

fn seeded() -> InventoryLedger {
    let mut ledger = InventoryLedger::new();
    ledger
        .add_item(&ItemForm {
            name: "Widget".into(),
            quantity: "10".into(),
            cost_price: "2.50".into(),
            selling_price: "5".into(),
            category: "Electronics".into(),
            location: "Shelf 1".into(),
            min_stock_threshold: "5".into(),
        })
        .unwrap();
    ledger
        .add_item(&ItemForm {
            name: "Rice, 5kg".into(),
            quantity: "3".into(),
            cost_price: "7".into(),
            selling_price: "11.75".into(),
            category: "Food".into(),
            location: "Warehouse A".into(),
            min_stock_threshold: "4".into(),
        })
        .unwrap();
    ledger
}

fn run_export(ledger: &InventoryLedger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["stockkeep", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(ledger, export_m)
    } else {
        panic!("no export subcommand");
    }
}

/// Accepts nothing: every write reports a broken pipe.
struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn inventory_csv_has_header_and_one_line_per_item() {
    let ledger = seeded();
    let mut buf = Vec::new();
    ledger.export(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(
        text,
        "SKU,Item Name,Quantity,Cost Price,Selling Price,Category,Location,Min Stock Threshold\n\
         UQ001,Widget,10,2.5,5.0,Electronics,Shelf 1,5\n\
         UQ002,Rice, 5kg,3,7.0,11.75,Food,Warehouse A,4\n"
    );
}

#[test]
fn empty_inventory_exports_header_only() {
    let ledger = InventoryLedger::new();
    let mut buf = Vec::new();
    ledger.export(&mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "SKU,Item Name,Quantity,Cost Price,Selling Price,Category,Location,Min Stock Threshold\n"
    );
}

#[test]
fn export_inventory_writes_file_via_cli() {
    let ledger = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("stock.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&ledger, &["inventory", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), ledger.list_all().len() + 1);
    assert_eq!(
        lines[0],
        "SKU,Item Name,Quantity,Cost Price,Selling Price,Category,Location,Min Stock Threshold"
    );
    assert_eq!(lines[1], "UQ001,Widget,10,2.5,5.0,Electronics,Shelf 1,5");
    assert!(contents.ends_with('\n'));
}

#[test]
fn export_sales_csv_lists_journal_in_order() {
    let mut ledger = seeded();
    let at = NaiveDate::from_ymd_opt(2025, 6, 30)
        .unwrap()
        .and_hms_opt(17, 45, 0)
        .unwrap();
    ledger.sell_at("Widget", "2", at).unwrap();
    ledger.sell_at("UQ002", "1", at).unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("sales.csv");
    let out_str = out_path.to_string_lossy().to_string();
    run_export(&ledger, &["sales", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        contents,
        "Time,SKU,Name,Category,Qty,Selling Price\n\
         2025-06-30 17:45:00,UQ001,Widget,Electronics,2,5.0\n\
         2025-06-30 17:45:00,UQ002,Rice, 5kg,Food,1,11.75\n"
    );
}

#[test]
fn export_inventory_json() {
    let ledger = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("stock.json");
    let out_str = out_path.to_string_lossy().to_string();

    run_export(&ledger, &["inventory", "--format", "json", "--out", &out_str]).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["sku"], "UQ001");
    assert_eq!(arr[1]["location"], "Warehouse A");
    assert_eq!(arr[1]["quantity"], 3);
}

#[test]
fn export_rejects_unknown_format() {
    let ledger = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("stock.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(&ledger, &["inventory", "--format", "xml", "--out", &out_str]).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out_path.exists());
}

#[test]
fn export_to_missing_directory_fails_cleanly() {
    let ledger = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("no-such-dir").join("stock.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(&ledger, &["inventory", "--out", &out_str]).unwrap_err();
    assert!(err.to_string().contains("Error exporting inventory"));
    assert!(!out_path.exists());
}

#[test]
fn failing_writer_surfaces_io_error() {
    let ledger = seeded();
    let err = ledger.export(FailingWriter).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)), "{:?}", err);

    let err = ledger.journal().export(FailingWriter).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)), "{:?}", err);
}

#[test]
fn failing_writer_mid_export_surfaces_io_error() {
    // Enough rows to overflow csv's internal buffer before the final flush.
    let mut ledger = InventoryLedger::new();
    for i in 0..500 {
        ledger
            .add_item(&ItemForm {
                name: format!("Bulk item number {}", i),
                quantity: "1".into(),
                cost_price: "1.25".into(),
                selling_price: "2.75".into(),
                category: "Other".into(),
                location: "Warehouse B".into(),
                min_stock_threshold: "0".into(),
            })
            .unwrap();
    }
    let err = ledger.export(FailingWriter).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)), "{:?}", err);
}
