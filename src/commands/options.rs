// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::InventoryLedger;
use crate::models::{Category, Location};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(ledger: &InventoryLedger) -> Result<()> {
    let rows = vec![
        vec![
            "Category".to_string(),
            Category::ALL.map(|c| c.label()).join(", "),
        ],
        vec![
            "Location".to_string(),
            Location::ALL.map(|l| l.label()).join(", "),
        ],
        vec!["SKU".to_string(), ledger.skus().join(", ")],
        vec!["Item".to_string(), ledger.names().join(", ")],
    ];
    println!("{}", pretty_table(&["Field", "Choices"], rows));
    Ok(())
}
