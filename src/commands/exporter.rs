// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::sales_rows;
use crate::config::default_export_path;
use crate::export::{self, ExportFormat};
use crate::ledger::InventoryLedger;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;

pub fn handle(ledger: &InventoryLedger, m: &clap::ArgMatches) -> Result<()> {
    let path = match m.subcommand() {
        Some(("inventory", sub)) => export_inventory(ledger, sub)?,
        Some(("sales", sub)) => export_sales(ledger, sub)?,
        _ => return Ok(()),
    };
    println!("Exported to {}", path.display());
    Ok(())
}

// Format is checked before the output path is resolved, so a bad format
// never creates a file.
fn target(sub: &clap::ArgMatches, kind: &str) -> Result<(ExportFormat, PathBuf)> {
    let fmt: ExportFormat = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv")
        .parse()?;
    let out = match sub
        .get_one::<String>("out")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        Some(p) => PathBuf::from(p),
        None => default_export_path(kind, fmt.extension(), Local::now().naive_local())?,
    };
    Ok((fmt, out))
}

pub fn export_inventory(ledger: &InventoryLedger, sub: &clap::ArgMatches) -> Result<PathBuf> {
    let (fmt, out) = target(sub, "inventory")?;
    export::to_path(&out, |f| match fmt {
        ExportFormat::Csv => ledger.export(f),
        ExportFormat::Json => export::write_json(&ledger.list_all(), f),
    })
    .with_context(|| format!("Error exporting inventory to {}", out.display()))?;
    Ok(out)
}

pub fn export_sales(ledger: &InventoryLedger, sub: &clap::ArgMatches) -> Result<PathBuf> {
    let (fmt, out) = target(sub, "sales")?;
    export::to_path(&out, |f| match fmt {
        ExportFormat::Csv => ledger.journal().export(f),
        ExportFormat::Json => export::write_json(&sales_rows(ledger), f),
    })
    .with_context(|| format!("Error exporting sales to {}", out.display()))?;
    Ok(out)
}
