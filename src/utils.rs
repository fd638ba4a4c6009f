// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{INVENTORY_COLUMNS, InventoryItem};
use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Inventory table with a trailing `Low` column; low-stock rows are red.
pub fn inventory_table<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(
        INVENTORY_COLUMNS
            .iter()
            .chain(std::iter::once(&"Low"))
            .map(|h| Cell::new(*h)),
    );
    for item in items {
        let low = item.is_low_stock();
        let mut cells: Vec<Cell> = item
            .to_record()
            .into_iter()
            .map(|v| if low { Cell::new(v).fg(Color::Red) } else { Cell::new(v) })
            .collect();
        cells.push(if low {
            Cell::new("LOW").fg(Color::Red)
        } else {
            Cell::new("")
        });
        t.add_row(cells);
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Optional string argument, empty when absent.
pub fn arg_or_empty<'a>(m: &'a clap::ArgMatches, id: &str) -> &'a str {
    m.get_one::<String>(id).map(String::as_str).unwrap_or("")
}

/// Splits a shell line into words. Supports `"double"` and `'single'`
/// quotes and backslash escapes outside single quotes.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('"'), '"') => quote = None,
            (Some('\''), _) => cur.push(c),
            (_, '\\') => {
                let next = chars
                    .next()
                    .ok_or_else(|| anyhow!("Trailing backslash in '{}'", line))?;
                cur.push(next);
                in_word = true;
            }
            (Some(_), _) => cur.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut cur));
                    in_word = false;
                }
            }
            (None, _) => {
                cur.push(c);
                in_word = true;
            }
        }
    }
    if let Some(q) = quote {
        return Err(anyhow!("Unterminated {} quote in '{}'", q, line));
    }
    if in_word {
        words.push(cur);
    }
    Ok(words)
}
