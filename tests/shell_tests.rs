// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Cursor;
use stockkeep::shell::{Flow, Session};
use stockkeep::utils::split_args;
use stockkeep::models::SortKey;
use stockkeep::{LedgerError, cli, commands::items, ledger::InventoryLedger};

const ADD_WIDGET: &str = r#"item add --name "Red Widget" --qty 10 --cost 2.5 --price 5.0 --category Electronics --location "Shelf 1" --min 5"#;

#[test]
fn split_args_honours_quotes_and_escapes() {
    assert_eq!(
        split_args(r#"item add --name "Red Widget" --location 'Shelf 1' --note a\ b"#).unwrap(),
        [
            "item", "add", "--name", "Red Widget", "--location", "Shelf 1", "--note", "a b"
        ]
    );
    assert_eq!(split_args(r#"search """#).unwrap(), ["search", ""]);
    assert!(split_args(r#"item add --name "open"#).is_err());
}

#[test]
fn script_session_drives_the_ledger() {
    let script = format!(
        "{}\n# comment\n\nstock sell --item \"Red Widget\" --qty 6\nstock restock --sku UQ001 --qty 1\nreport low-stock\nquit\nstock sell --item UQ001 --qty 1\n",
        ADD_WIDGET
    );
    let mut session = Session::new();
    let stats = session.run(Cursor::new(script), false).unwrap();

    assert_eq!(stats.failures, 0);
    // Lines after `quit` are never run.
    assert_eq!(session.ledger().get("UQ001").unwrap().quantity, 5);
    assert_eq!(session.ledger().journal().len(), 1);
}

#[test]
fn failed_commands_do_not_stop_the_session() {
    let script = format!(
        "{}\nstock sell --item UQ001 --qty 100\nstock restock --sku UQ404 --qty 1\nitem add --name Empty\nbogus\nstock sell --item UQ001 --qty 4\n",
        ADD_WIDGET
    );
    let mut session = Session::new();
    let stats = session.run(Cursor::new(script), false).unwrap();

    assert_eq!(stats.commands, 6);
    assert_eq!(stats.failures, 4);
    assert_eq!(session.ledger().get("UQ001").unwrap().quantity, 6);
    assert_eq!(session.ledger().list_all().len(), 1);
}

#[test]
fn ledger_errors_surface_through_commands() {
    let mut session = Session::new();
    session.execute_line(ADD_WIDGET).unwrap();
    let err = session
        .execute_line("stock sell --item UQ001 --qty 11")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::InsufficientStock { .. })
    ));

    let err = session
        .execute_line("item add --name X --qty -2 --cost 1 --price 1 --category Food --location Other --min 0")
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::Format(_))
    ));
}

#[test]
fn quit_and_help_are_handled() {
    let mut session = Session::new();
    assert_eq!(session.execute_line("  exit ").unwrap(), Flow::Quit);
    assert_eq!(session.execute_line("item --help").unwrap(), Flow::Continue);
    assert_eq!(session.execute_line("# nothing").unwrap(), Flow::Continue);
}

#[test]
fn list_sort_is_display_only() {
    let mut session = Session::new();
    session.execute_line(ADD_WIDGET).unwrap();
    session
        .execute_line("item add --name Apple --qty 50 --cost 0.2 --price 0.5 --category Food --location \"Shelf 2\" --min 10")
        .unwrap();

    let ledger: &InventoryLedger = session.ledger();
    let matches = cli::build_cli().get_matches_from(["stockkeep", "item", "list", "--sort", "name"]);
    if let Some(("item", item_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = item_m.subcommand() {
            let rows = items::list_rows(ledger, list_m).unwrap();
            assert_eq!(rows[0].name, "Apple");
            assert_eq!(rows[1].name, "Red Widget");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no item subcommand");
    }
    assert_eq!(ledger.list_all()[0].name, "Red Widget");
}

#[test]
fn search_regex_rejects_invalid_pattern() {
    let mut session = Session::new();
    session.execute_line(ADD_WIDGET).unwrap();
    let ledger = session.ledger();

    let matches = cli::build_cli().get_matches_from(["stockkeep", "item", "search", "--regex", "(?P<"]);
    if let Some(("item", item_m)) = matches.subcommand() {
        if let Some(("search", search_m)) = item_m.subcommand() {
            let err = items::search_rows(ledger, search_m).unwrap_err();
            assert!(err.to_string().contains("Invalid regex pattern"));
        } else {
            panic!("no search subcommand");
        }
    } else {
        panic!("no item subcommand");
    }

    let matches =
        cli::build_cli().get_matches_from(["stockkeep", "item", "search", "--regex", "^red|^uq9"]);
    if let Some(("item", item_m)) = matches.subcommand() {
        if let Some(("search", search_m)) = item_m.subcommand() {
            assert_eq!(items::search_rows(ledger, search_m).unwrap().len(), 1);
        }
    }
}

#[test]
fn add_form_fields_map_from_flags() {
    let matches = cli::build_cli().get_matches_from([
        "stockkeep",
        "item",
        "add",
        "--name",
        "Socks",
        "--qty",
        "-1",
    ]);
    if let Some(("item", item_m)) = matches.subcommand() {
        if let Some(("add", add_m)) = item_m.subcommand() {
            let form = items::form_from_args(add_m);
            assert_eq!(form.name, "Socks");
            assert_eq!(form.quantity, "-1");
            assert_eq!(form.category, "");
        } else {
            panic!("no add subcommand");
        }
    } else {
        panic!("no item subcommand");
    }
}

#[test]
fn invalid_utf8_line_is_a_failure_not_the_end() {
    let mut script = b"item add --name \xff\xfe --qty 1\n".to_vec();
    script.extend_from_slice(ADD_WIDGET.as_bytes());
    script.push(b'\n');

    let mut session = Session::new();
    let stats = session.run(Cursor::new(script), false).unwrap();

    assert_eq!(stats.commands, 2);
    assert_eq!(stats.failures, 1);
    assert_eq!(session.ledger().list_all().len(), 1);
    assert_eq!(session.ledger().list_all()[0].name, "Red Widget");
}

#[test]
fn every_sort_column_is_accepted_by_the_cli() {
    for name in SortKey::NAMES {
        assert!(name.parse::<SortKey>().is_ok(), "{}", name);
        assert!(
            cli::build_cli()
                .try_get_matches_from(["stockkeep", "item", "list", "--sort", name])
                .is_ok()
        );
    }
    assert!(
        cli::build_cli()
            .try_get_matches_from(["stockkeep", "item", "list", "--sort", "qty"])
            .is_err()
    );
    assert!("qty".parse::<SortKey>().is_err());
}

#[test]
fn descending_sort_keeps_ties_in_ledger_order() {
    let mut session = Session::new();
    for name in ["First", "Second", "Third"] {
        let qty = if name == "Second" { 9 } else { 4 };
        session
            .execute_line(&format!(
                "item add --name {} --qty {} --cost 1 --price 2 --category Other --location Other --min 0",
                name, qty
            ))
            .unwrap();
    }

    let matches = cli::build_cli().get_matches_from([
        "stockkeep", "item", "list", "--sort", "quantity", "--desc",
    ]);
    if let Some(("item", item_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = item_m.subcommand() {
            let names: Vec<String> = items::list_rows(session.ledger(), list_m)
                .unwrap()
                .iter()
                .map(|i| i.name.clone())
                .collect();
            assert_eq!(names, ["Second", "First", "Third"]);
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no item subcommand");
    }
}
