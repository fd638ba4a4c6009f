// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, IsTerminal};

use stockkeep::{cli, config, logging, shell::Session};

fn main() -> Result<()> {
    let matches = cli::build_launcher().get_matches();

    let filter = matches
        .get_one::<String>("log")
        .cloned()
        .unwrap_or_else(config::log_filter);
    logging::init(&filter);

    let mut session = Session::new();
    match matches.get_one::<String>("script") {
        Some(path) => {
            let path = path.trim();
            let file = File::open(path).with_context(|| format!("Open script {}", path))?;
            let stats = session.run(BufReader::new(file), false)?;
            if stats.failures > 0 {
                eprintln!("{} of {} commands failed", stats.failures, stats.commands);
                std::process::exit(1);
            }
        }
        None => {
            let stdin = std::io::stdin();
            let prompt = stdin.is_terminal();
            session.run(stdin.lock(), prompt)?;
        }
    }
    Ok(())
}
