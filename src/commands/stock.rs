// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::InventoryLedger;
use crate::utils::arg_or_empty;
use anyhow::Result;

pub fn handle(ledger: &mut InventoryLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("restock", sub)) => {
            let sku = arg_or_empty(sub, "sku");
            let new_qty = ledger.restock(sku, arg_or_empty(sub, "qty"))?;
            println!("Stock updated. New quantity: {}", new_qty);
        }
        Some(("sell", sub)) => {
            let (remaining, sale) =
                ledger.sell(arg_or_empty(sub, "item"), arg_or_empty(sub, "qty"))?;
            println!(
                "Sale confirmed: {} x {} ({}) at {}. Remaining stock: {}",
                sale.quantity,
                sale.name,
                sale.sku,
                sale.timestamp(),
                remaining
            );
            if let Some(item) = ledger.get(&sale.sku).filter(|i| i.is_low_stock()) {
                println!(
                    "Low stock: {} has {} left (minimum {})",
                    item.sku, item.quantity, item.min_stock_threshold
                );
            }
        }
        _ => {}
    }
    Ok(())
}
