// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod journal;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod shell;
pub mod utils;
pub mod commands;

pub use error::{ExportError, LedgerError};
pub use journal::SalesJournal;
pub use ledger::InventoryLedger;
