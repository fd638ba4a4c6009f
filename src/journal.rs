// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ExportError;
use crate::export;
use crate::models::SaleRecord;
use std::io::Write;

/// Append-only log of completed sales. Only the ledger writes to it, and
/// only from a successful sell.
#[derive(Debug, Clone, Default)]
pub struct SalesJournal {
    records: Vec<SaleRecord>,
}

impl SalesJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, sale: SaleRecord) {
        self.records.push(sale);
    }

    /// Chronological (append) order.
    pub fn all_records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn records_for_sku<'a>(&'a self, sku: &'a str) -> impl Iterator<Item = &'a SaleRecord> {
        self.records.iter().filter(move |r| r.sku == sku)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn export<W: Write>(&self, w: W) -> Result<(), ExportError> {
        export::write_sales_csv(&self.records, w)
    }
}
