// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented front end. Holds no business state of its own: every
//! command goes through the ledger and output is re-queried afterwards.

use crate::cli;
use crate::commands;
use crate::ledger::InventoryLedger;
use crate::utils::split_args;
use anyhow::{Result, anyhow};
use clap::error::ErrorKind;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub commands: usize,
    pub failures: usize,
}

#[derive(Debug, Default)]
pub struct Session {
    ledger: InventoryLedger,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        let words = split_args(line)?;
        match words.first().map(String::as_str) {
            Some("quit" | "exit") => return Ok(Flow::Quit),
            Some("help") if words.len() == 1 => {
                cli::build_cli().print_help()?;
                println!();
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        let argv = std::iter::once("stockkeep".to_string()).chain(words);
        let matches = match cli::build_cli().try_get_matches_from(argv) {
            Ok(m) => m,
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    print!("{}", e.render());
                    return Ok(Flow::Continue);
                }
                _ => return Err(anyhow!("{}", e.render().to_string().trim_end())),
            },
        };
        debug!(line, "dispatch");
        dispatch(&mut self.ledger, &matches)?;
        Ok(Flow::Continue)
    }

    /// Reads commands until `quit` or end of input. Failed commands are
    /// reported on stderr and the session carries on.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> Result<SessionStats> {
        let mut stats = SessionStats::default();
        let mut lines = input.lines();
        loop {
            if prompt {
                print!("stockkeep> ");
                std::io::stdout().flush()?;
            }
            let Some(line) = lines.next() else { break };
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    stats.commands += 1;
                    stats.failures += 1;
                    warn!(error = %e, "unreadable input line");
                    eprintln!("Error: {}", e);
                    continue;
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            stats.commands += 1;
            match self.execute_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    stats.failures += 1;
                    eprintln!("Error: {:#}", e);
                }
            }
        }
        Ok(stats)
    }
}

pub fn dispatch(ledger: &mut InventoryLedger, matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("item", sub)) => commands::items::handle(ledger, sub)?,
        Some(("stock", sub)) => commands::stock::handle(ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(ledger, sub)?,
        Some(("options", _)) => commands::options::handle(ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
