// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::InventoryLedger;
use crate::models::{SALES_COLUMNS, render_real};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(ledger: &InventoryLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("low-stock", sub)) => low_stock(ledger, sub)?,
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("sales", sub)) => sales(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct LowStockRow {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub min_stock_threshold: u32,
}

pub fn low_stock_rows(ledger: &InventoryLedger) -> Vec<LowStockRow> {
    ledger
        .find_low_stock()
        .into_iter()
        .map(|i| LowStockRow {
            sku: i.sku.clone(),
            name: i.name.clone(),
            quantity: i.quantity,
            min_stock_threshold: i.min_stock_threshold,
        })
        .collect()
}

fn low_stock(ledger: &InventoryLedger, sub: &clap::ArgMatches) -> Result<()> {
    let data = low_stock_rows(ledger);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No low-stock items.");
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|r| {
            vec![
                r.sku,
                r.name,
                r.quantity.to_string(),
                r.min_stock_threshold.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["SKU", "Name", "Qty", "Min"], rows));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub category: String,
}

pub fn summary_rows(ledger: &InventoryLedger) -> Vec<SummaryRow> {
    ledger
        .list_all()
        .iter()
        .map(|i| SummaryRow {
            sku: i.sku.clone(),
            name: i.name.clone(),
            quantity: i.quantity,
            category: i.category.to_string(),
        })
        .collect()
}

fn summary(ledger: &InventoryLedger, sub: &clap::ArgMatches) -> Result<()> {
    let data = summary_rows(ledger);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No items in inventory.");
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|r| vec![r.sku, r.name, r.quantity.to_string(), r.category])
        .collect();
    println!("{}", pretty_table(&["SKU", "Name", "Qty", "Category"], rows));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SaleRow {
    pub time: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub selling_price: String,
}

pub fn sales_rows(ledger: &InventoryLedger) -> Vec<SaleRow> {
    ledger
        .journal()
        .all_records()
        .iter()
        .map(|r| SaleRow {
            time: r.timestamp(),
            sku: r.sku.clone(),
            name: r.name.clone(),
            category: r.category.to_string(),
            quantity: r.quantity,
            selling_price: render_real(&r.selling_price),
        })
        .collect()
}

fn sales(ledger: &InventoryLedger, sub: &clap::ArgMatches) -> Result<()> {
    let data = sales_rows(ledger);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No sales recorded.");
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|r| {
            vec![
                r.time,
                r.sku,
                r.name,
                r.category,
                r.quantity.to_string(),
                r.selling_price,
            ]
        })
        .collect();
    println!("{}", pretty_table(&SALES_COLUMNS, rows));
    Ok(())
}
