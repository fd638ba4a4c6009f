// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column headers of the inventory table, in export order.
pub const INVENTORY_COLUMNS: [&str; 8] = [
    "SKU",
    "Item Name",
    "Quantity",
    "Cost Price",
    "Selling Price",
    "Category",
    "Location",
    "Min Stock Threshold",
];

/// Column headers of the sales report, in export order.
pub const SALES_COLUMNS: [&str; 6] = ["Time", "SKU", "Name", "Category", "Qty", "Selling Price"];

pub const SKU_PREFIX: &str = "UQ";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_sku(n: u64) -> String {
    format!("{}{:03}", SKU_PREFIX, n)
}

/// Renders a price the way a plain real number prints: trailing zeros
/// dropped, but always at least one fractional digit (`5` -> `5.0`).
pub fn render_real(d: &Decimal) -> String {
    let n = d.normalize();
    if n.scale() == 0 {
        format!("{}.0", n)
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Clothing,
        Category::Food,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Food => "Food",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown category '{}' (expected one of: {})",
                    s,
                    join_labels(Category::ALL.iter().map(Category::label))
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Warehouse A")]
    WarehouseA,
    #[serde(rename = "Warehouse B")]
    WarehouseB,
    #[serde(rename = "Shelf 1")]
    Shelf1,
    #[serde(rename = "Shelf 2")]
    Shelf2,
    Other,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::WarehouseA,
        Location::WarehouseB,
        Location::Shelf1,
        Location::Shelf2,
        Location::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Location::WarehouseA => "Warehouse A",
            Location::WarehouseB => "Warehouse B",
            Location::Shelf1 => "Shelf 1",
            Location::Shelf2 => "Shelf 2",
            Location::Other => "Other",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Location::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown location '{}' (expected one of: {})",
                    s,
                    join_labels(Location::ALL.iter().map(Location::label))
                )
            })
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub category: Category,
    pub location: Location,
    pub min_stock_threshold: u32,
}

impl InventoryItem {
    /// At or below the threshold counts as low.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock_threshold
    }

    /// Field values in `INVENTORY_COLUMNS` order.
    pub fn to_record(&self) -> [String; 8] {
        [
            self.sku.clone(),
            self.name.clone(),
            self.quantity.to_string(),
            render_real(&self.cost_price),
            render_real(&self.selling_price),
            self.category.to_string(),
            self.location.to_string(),
            self.min_stock_threshold.to_string(),
        ]
    }
}

/// Raw form input for a new item, exactly as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub name: String,
    pub quantity: String,
    pub cost_price: String,
    pub selling_price: String,
    pub category: String,
    pub location: String,
    pub min_stock_threshold: String,
}

/// Snapshot of a completed sale. Copies the item fields so later edits or
/// deletion of the item leave the record untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub sku: String,
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub selling_price: Decimal,
    pub sold_at: NaiveDateTime,
}

impl SaleRecord {
    pub fn timestamp(&self) -> String {
        self.sold_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Field values in `SALES_COLUMNS` order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.timestamp(),
            self.sku.clone(),
            self.name.clone(),
            self.category.to_string(),
            self.quantity.to_string(),
            render_real(&self.selling_price),
        ]
    }
}

/// Columns the inventory table can be sorted on for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Sku,
    Name,
    Quantity,
    Cost,
    Price,
    Category,
    Location,
    Min,
}

impl SortKey {
    pub const NAMES: [&'static str; 8] = [
        "sku", "name", "quantity", "cost", "price", "category", "location", "min",
    ];

    pub fn compare(&self, a: &InventoryItem, b: &InventoryItem) -> std::cmp::Ordering {
        match self {
            SortKey::Sku => (a.sku.len(), &a.sku).cmp(&(b.sku.len(), &b.sku)),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::Cost => a.cost_price.cmp(&b.cost_price),
            SortKey::Price => a.selling_price.cmp(&b.selling_price),
            SortKey::Category => a.category.label().cmp(b.category.label()),
            SortKey::Location => a.location.label().cmp(b.location.label()),
            SortKey::Min => a.min_stock_threshold.cmp(&b.min_stock_threshold),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sku" => Ok(SortKey::Sku),
            "name" => Ok(SortKey::Name),
            "quantity" => Ok(SortKey::Quantity),
            "cost" => Ok(SortKey::Cost),
            "price" => Ok(SortKey::Price),
            "category" => Ok(SortKey::Category),
            "location" => Ok(SortKey::Location),
            "min" => Ok(SortKey::Min),
            other => Err(format!("Unknown sort column '{}'", other)),
        }
    }
}
