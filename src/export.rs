// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Tabular snapshots of the inventory and the sales journal.
//!
//! CSV output is comma-joined with no quoting or escaping, one record per
//! line, `\n`-terminated including the last row.

use crate::error::ExportError;
use crate::models::{INVENTORY_COLUMNS, InventoryItem, SALES_COLUMNS, SaleRecord};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

fn csv_writer<W: Write>(w: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_writer(w)
}

// The sink failing shows up as an I/O error whether csv hit it while
// filling its buffer or on the final flush.
fn from_csv(e: csv::Error) -> ExportError {
    if !e.is_io_error() {
        return ExportError::Csv(e);
    }
    match e.into_kind() {
        csv::ErrorKind::Io(err) => ExportError::Io(err),
        other => ExportError::Io(io::Error::other(format!("{:?}", other))),
    }
}

pub fn write_inventory_csv<W: Write>(items: &[InventoryItem], w: W) -> Result<(), ExportError> {
    let mut wtr = csv_writer(w);
    wtr.write_record(INVENTORY_COLUMNS).map_err(from_csv)?;
    for item in items {
        wtr.write_record(item.to_record()).map_err(from_csv)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_sales_csv<W: Write>(records: &[SaleRecord], w: W) -> Result<(), ExportError> {
    let mut wtr = csv_writer(w);
    wtr.write_record(SALES_COLUMNS).map_err(from_csv)?;
    for r in records {
        wtr.write_record(r.to_record()).map_err(from_csv)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(rows: &T, mut w: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut w, rows)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and hands the open file to `write`. The
/// handle is dropped, and so closed, on every return path.
pub fn to_path<F>(path: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut File) -> Result<(), ExportError>,
{
    let mut file = File::create(path)?;
    write(&mut file)?;
    file.sync_all()?;
    info!(path = %path.display(), "export written");
    Ok(())
}
