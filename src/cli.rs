// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SortKey;
use clap::{Arg, ArgAction, Command, builder::PossibleValuesParser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as a pretty JSON array"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

// Negative numbers must reach the ledger so it can reject them itself.
fn opt(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(long)
        .allow_negative_numbers(true)
        .help(help)
}

fn export_target(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .help("csv|json"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .help("Output file (defaults to the export directory)"),
        )
}

/// Process-level arguments.
pub fn build_launcher() -> Command {
    Command::new("stockkeep")
        .version(clap::crate_version!())
        .about("In-memory retail inventory: stock, sales, reports, CSV export")
        .arg(
            Arg::new("script")
                .long("script")
                .value_name("FILE")
                .help("Read commands from FILE instead of stdin"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("FILTER")
                .help("tracing filter directive, e.g. info or stockkeep=debug"),
        )
}

/// Grammar of one shell line. The first word is the binary name.
pub fn build_cli() -> Command {
    Command::new("stockkeep")
        .about("Inventory session commands")
        .disable_version_flag(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("item")
                .about("Add, list, search and remove items")
                .subcommand_required(true)
                // Fields are optional here; the ledger reports what is missing.
                .subcommand(
                    Command::new("add")
                        .about("Add a new item; prints its SKU")
                        .arg(opt("name", "name", "Item name"))
                        .arg(opt("qty", "qty", "Opening quantity"))
                        .arg(opt("cost", "cost", "Cost price"))
                        .arg(opt("price", "price", "Selling price"))
                        .arg(opt("category", "category", "Electronics|Clothing|Food|Other"))
                        .arg(opt(
                            "location",
                            "location",
                            "Warehouse A|Warehouse B|Shelf 1|Shelf 2|Other",
                        ))
                        .arg(opt("min", "min", "Minimum stock threshold")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("Show the inventory table")
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(PossibleValuesParser::new(SortKey::NAMES))
                                .help("Sort the displayed rows by a column"),
                        )
                        .arg(
                            Arg::new("desc")
                                .long("desc")
                                .action(ArgAction::SetTrue)
                                .requires("sort")
                                .help("Descending sort"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("search")
                        .about("Filter by SKU, name or category")
                        .arg(Arg::new("text").default_value(""))
                        .arg(
                            Arg::new("regex")
                                .long("regex")
                                .action(ArgAction::SetTrue)
                                .help("Treat TEXT as a case-insensitive regular expression"),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an item by SKU")
                        .arg(opt("sku", "sku", "SKU to delete")),
                ),
        )
        .subcommand(
            Command::new("stock")
                .about("Restock and sell")
                .subcommand_required(true)
                .subcommand(
                    Command::new("restock")
                        .about("Add stock to an existing item")
                        .arg(opt("sku", "sku", "SKU to restock"))
                        .arg(opt("qty", "qty", "Quantity to add")),
                )
                .subcommand(
                    Command::new("sell")
                        .about("Record a sale")
                        .arg(opt("item", "item", "Item name or SKU"))
                        .arg(opt("qty", "qty", "Quantity to sell")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Stock and sales reports")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("low-stock").about("Items at or below their threshold"),
                ))
                .subcommand(json_flags(
                    Command::new("summary").about("SKU, name, quantity and category"),
                ))
                .subcommand(json_flags(
                    Command::new("sales").about("Every recorded sale, oldest first"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write the inventory or the sales journal to a file")
                .subcommand_required(true)
                .subcommand(export_target("inventory", "Export every item"))
                .subcommand(export_target("sales", "Export the sales journal")),
        )
        .subcommand(Command::new("options").about("Show the category and location choices"))
}
