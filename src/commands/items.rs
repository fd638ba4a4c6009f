// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::InventoryLedger;
use crate::models::{InventoryItem, ItemForm, SortKey};
use crate::utils::{arg_or_empty, inventory_table, maybe_print_json};
use anyhow::{Result, anyhow};
use regex::RegexBuilder;

pub fn handle(ledger: &mut InventoryLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("search", sub)) => search(ledger, sub)?,
        Some(("rm", sub)) => {
            let removed = ledger.delete_item(arg_or_empty(sub, "sku"))?;
            println!("Removed {} '{}'", removed.sku, removed.name);
        }
        _ => {}
    }
    Ok(())
}

pub fn form_from_args(sub: &clap::ArgMatches) -> ItemForm {
    ItemForm {
        name: arg_or_empty(sub, "name").to_string(),
        quantity: arg_or_empty(sub, "qty").to_string(),
        cost_price: arg_or_empty(sub, "cost").to_string(),
        selling_price: arg_or_empty(sub, "price").to_string(),
        category: arg_or_empty(sub, "category").to_string(),
        location: arg_or_empty(sub, "location").to_string(),
        min_stock_threshold: arg_or_empty(sub, "min").to_string(),
    }
}

fn add(ledger: &mut InventoryLedger, sub: &clap::ArgMatches) -> Result<()> {
    let sku = ledger.add_item(&form_from_args(sub))?;
    if let Some(item) = ledger.get(&sku) {
        println!("Added '{}' as {}", item.name, sku);
        if item.is_low_stock() {
            println!(
                "Note: {} is already at or below its minimum ({} <= {})",
                sku, item.quantity, item.min_stock_threshold
            );
        }
    }
    Ok(())
}

/// Rows for `item list`: ledger order, or sorted for display only.
pub fn list_rows<'a>(
    ledger: &'a InventoryLedger,
    sub: &clap::ArgMatches,
) -> Result<Vec<&'a InventoryItem>> {
    let mut rows: Vec<&InventoryItem> = ledger.list_all().iter().collect();
    if let Some(col) = sub.get_one::<String>("sort") {
        let key: SortKey = col.parse().map_err(|e: String| anyhow!(e))?;
        if sub.get_flag("desc") {
            rows.sort_by(|a, b| key.compare(b, a));
        } else {
            rows.sort_by(|a, b| key.compare(a, b));
        }
    }
    Ok(rows)
}

fn list(ledger: &InventoryLedger, sub: &clap::ArgMatches) -> Result<()> {
    let rows = list_rows(ledger, sub)?;
    print_items(sub, &rows, "No items in inventory.")
}

pub fn search_rows<'a>(
    ledger: &'a InventoryLedger,
    sub: &clap::ArgMatches,
) -> Result<Vec<&'a InventoryItem>> {
    let text = arg_or_empty(sub, "text").trim();
    if sub.get_flag("regex") && !text.is_empty() {
        let re = RegexBuilder::new(text)
            .case_insensitive(true)
            .build()
            .map_err(|err| anyhow!("Invalid regex pattern '{}': {}", text, err))?;
        Ok(ledger.search_pattern(&re))
    } else {
        Ok(ledger.search(text))
    }
}

fn search(ledger: &InventoryLedger, sub: &clap::ArgMatches) -> Result<()> {
    let rows = search_rows(ledger, sub)?;
    print_items(sub, &rows, "No matching items.")
}

fn print_items(sub: &clap::ArgMatches, rows: &[&InventoryItem], empty: &str) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("{}", empty);
    } else {
        println!("{}", inventory_table(rows.iter().copied()));
    }
    Ok(())
}
