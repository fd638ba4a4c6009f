// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ExportError, LedgerError};
use crate::export;
use crate::journal::SalesJournal;
use crate::models::{Category, InventoryItem, ItemForm, Location, SaleRecord, format_sku};
use chrono::{Local, NaiveDateTime, SubsecRound};
use regex::Regex;
use rust_decimal::Decimal;
use std::io::Write;
use tracing::{debug, info, warn};

/// Authoritative in-memory item table plus the sales journal it feeds.
///
/// Every mutating operation validates its whole input before touching
/// state, so a rejected call never leaves a partial update behind.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    items: Vec<InventoryItem>,
    next_sku: u64,
    journal: SalesJournal,
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_sku: 1,
            journal: SalesJournal::new(),
        }
    }
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, form: &ItemForm) -> Result<String, LedgerError> {
        let validated = validate_form(form).inspect_err(|e| warn!(error = %e, "add rejected"))?;

        let sku = format_sku(self.next_sku);
        self.next_sku += 1;
        let item = InventoryItem {
            sku: sku.clone(),
            ..validated
        };
        info!(sku = %sku, name = %item.name, quantity = item.quantity, "item added");
        self.items.push(item);
        Ok(sku)
    }

    pub fn restock(&mut self, sku: &str, additional: &str) -> Result<u32, LedgerError> {
        let sku = sku.trim();
        if sku.is_empty() {
            return Err(LedgerError::validation("Please select SKU and enter quantity."));
        }
        let add = parse_positive_count(additional)?;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.sku == sku)
            .ok_or_else(|| LedgerError::NotFound(sku.to_string()))
            .inspect_err(|e| warn!(error = %e, "restock rejected"))?;
        let new_qty = item
            .quantity
            .checked_add(add)
            .ok_or_else(|| LedgerError::validation("Restock would overflow the stock counter"))?;
        item.quantity = new_qty;
        info!(sku = %sku, added = add, quantity = new_qty, "item restocked");
        Ok(new_qty)
    }

    /// Sells from the item whose SKU is `name_or_sku`, or else the first item
    /// with that exact name. Stamps the sale with the current local time.
    pub fn sell(
        &mut self,
        name_or_sku: &str,
        quantity: &str,
    ) -> Result<(u32, SaleRecord), LedgerError> {
        self.sell_at(name_or_sku, quantity, Local::now().naive_local())
    }

    pub fn sell_at(
        &mut self,
        name_or_sku: &str,
        quantity: &str,
        at: NaiveDateTime,
    ) -> Result<(u32, SaleRecord), LedgerError> {
        let key = name_or_sku.trim();
        if key.is_empty() {
            return Err(LedgerError::validation("Please select item and enter quantity."));
        }
        let qty = parse_positive_count(quantity)?;
        let idx = self
            .position_by_sku_or_name(key)
            .ok_or_else(|| LedgerError::NotFound(key.to_string()))
            .inspect_err(|e| warn!(error = %e, "sale rejected"))?;

        let item = &mut self.items[idx];
        if qty > item.quantity {
            let err = LedgerError::InsufficientStock {
                sku: item.sku.clone(),
                requested: qty,
                available: item.quantity,
            };
            warn!(error = %err, "sale rejected");
            return Err(err);
        }
        item.quantity -= qty;
        let sale = SaleRecord {
            sku: item.sku.clone(),
            name: item.name.clone(),
            category: item.category,
            quantity: qty,
            selling_price: item.selling_price,
            sold_at: at.trunc_subsecs(0),
        };
        let remaining = item.quantity;
        self.journal.record(sale.clone());
        info!(sku = %sale.sku, sold = qty, remaining, "sale recorded");
        Ok((remaining, sale))
    }

    /// Removes the item; its sale records stay in the journal.
    pub fn delete_item(&mut self, sku: &str) -> Result<InventoryItem, LedgerError> {
        let sku = sku.trim();
        let idx = self
            .items
            .iter()
            .position(|i| i.sku == sku)
            .ok_or_else(|| LedgerError::NotFound(sku.to_string()))
            .inspect_err(|e| warn!(error = %e, "delete rejected"))?;
        let removed = self.items.remove(idx);
        info!(sku = %removed.sku, "item deleted");
        Ok(removed)
    }

    pub fn find_low_stock(&self) -> Vec<&InventoryItem> {
        let low: Vec<_> = self.items.iter().filter(|i| i.is_low_stock()).collect();
        debug!(count = low.len(), "low-stock query");
        low
    }

    /// Case-insensitive substring match on SKU, name or category.
    pub fn search(&self, text: &str) -> Vec<&InventoryItem> {
        let needle = text.trim().to_lowercase();
        let hits: Vec<_> = self
            .items
            .iter()
            .filter(|i| {
                needle.is_empty()
                    || i.sku.to_lowercase().contains(&needle)
                    || i.name.to_lowercase().contains(&needle)
                    || i.category.label().to_lowercase().contains(&needle)
            })
            .collect();
        debug!(text = %text, count = hits.len(), "search");
        hits
    }

    /// Same columns as `search`, matched against a regular expression.
    pub fn search_pattern(&self, re: &Regex) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|i| {
                re.is_match(&i.sku) || re.is_match(&i.name) || re.is_match(i.category.label())
            })
            .collect()
    }

    /// Insertion order.
    pub fn list_all(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, sku: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.sku == sku.trim())
    }

    pub fn journal(&self) -> &SalesJournal {
        &self.journal
    }

    /// Contents of the restock selector.
    pub fn skus(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.sku.as_str()).collect()
    }

    /// Contents of the sale selector.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }

    pub fn export<W: Write>(&self, w: W) -> Result<(), ExportError> {
        export::write_inventory_csv(&self.items, w)
    }

    fn position_by_sku_or_name(&self, key: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|i| i.sku == key)
            .or_else(|| self.items.iter().position(|i| i.name == key))
    }
}

/// Builds an item (without SKU) from raw form input. Empty fields are
/// reported before any numeric parsing happens.
fn validate_form(form: &ItemForm) -> Result<InventoryItem, LedgerError> {
    let fields = [
        ("name", form.name.trim()),
        ("quantity", form.quantity.trim()),
        ("cost price", form.cost_price.trim()),
        ("selling price", form.selling_price.trim()),
        ("category", form.category.trim()),
        ("location", form.location.trim()),
        ("min stock threshold", form.min_stock_threshold.trim()),
    ];
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| *k)
        .collect();
    if !missing.is_empty() {
        return Err(LedgerError::validation(format!(
            "Please fill all fields! Missing: {}",
            missing.join(", ")
        )));
    }

    let quantity = parse_non_negative_int("quantity", &form.quantity)?;
    let cost_price = parse_non_negative_real("cost price", &form.cost_price)?;
    let selling_price = parse_non_negative_real("selling price", &form.selling_price)?;
    let min_stock_threshold =
        parse_non_negative_int("min stock threshold", &form.min_stock_threshold)?;
    let category: Category = form.category.parse().map_err(LedgerError::Validation)?;
    let location: Location = form.location.parse().map_err(LedgerError::Validation)?;

    Ok(InventoryItem {
        sku: String::new(),
        name: form.name.trim().to_string(),
        quantity,
        cost_price,
        selling_price,
        category,
        location,
        min_stock_threshold,
    })
}

fn parse_non_negative_int(field: &str, raw: &str) -> Result<u32, LedgerError> {
    let raw = raw.trim();
    let n: i64 = raw.parse().map_err(|_| {
        LedgerError::format(format!("Invalid {} '{}': expected a whole number", field, raw))
    })?;
    if n < 0 {
        return Err(LedgerError::format(format!(
            "Invalid {} '{}': must not be negative",
            field, raw
        )));
    }
    u32::try_from(n)
        .map_err(|_| LedgerError::format(format!("Invalid {} '{}': too large", field, raw)))
}

fn parse_non_negative_real(field: &str, raw: &str) -> Result<Decimal, LedgerError> {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") || lower.parse::<f64>().is_err() {
        return Err(LedgerError::format(format!(
            "Invalid {} '{}': expected a number",
            field, raw
        )));
    }
    let d = exact_decimal(&lower)
        .map_err(|why| LedgerError::format(format!("Invalid {} '{}': {}", field, raw, why)))?;
    if d < Decimal::ZERO {
        return Err(LedgerError::format(format!(
            "Invalid {} '{}': must not be negative",
            field, raw
        )));
    }
    Ok(d)
}

const OUT_OF_RANGE: &str = "out of range";
const TOO_PRECISE: &str = "too precise";

/// Converts an already well-formed decimal literal (optionally with an
/// exponent) into a `Decimal` without rounding. Anything that would need
/// more than 28 fractional digits or a 96-bit mantissa is refused.
fn exact_decimal(s: &str) -> Result<Decimal, &'static str> {
    let (mantissa, exp) = match s.split_once('e') {
        Some((m, e)) => (m, e.parse::<i64>().map_err(|_| OUT_OF_RANGE)?),
        None => (s, 0),
    };
    let (negative, body) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int, frac) = body.split_once('.').unwrap_or((body, ""));
    let frac = frac.trim_end_matches('0');

    let mut digits: String = int.chars().chain(frac.chars()).collect();
    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.replace_range(..leading, "");
    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let mut scale = (frac.len() as i64).checked_sub(exp).ok_or(OUT_OF_RANGE)?;
    while scale > 0 && digits.ends_with('0') {
        digits.pop();
        scale -= 1;
    }
    if scale > 28 {
        return Err(TOO_PRECISE);
    }
    if scale < 0 {
        if digits.len() as i64 - scale > 29 {
            return Err(OUT_OF_RANGE);
        }
        digits.extend(std::iter::repeat_n('0', (-scale) as usize));
        scale = 0;
    }
    let limit = if scale > 0 { TOO_PRECISE } else { OUT_OF_RANGE };
    if digits.len() > 29 {
        return Err(limit);
    }
    let mut mantissa: i128 = digits.parse().map_err(|_| limit)?;
    if negative {
        mantissa = -mantissa;
    }
    Decimal::try_from_i128_with_scale(mantissa, scale as u32).map_err(|_| limit)
}

/// Restock and sale quantities: anything but a strictly positive whole
/// number is a validation failure.
fn parse_positive_count(raw: &str) -> Result<u32, LedgerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LedgerError::validation("Please enter a quantity."));
    }
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(LedgerError::validation(format!("Invalid quantity '{}'", raw))),
    }
}
