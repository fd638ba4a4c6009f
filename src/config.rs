// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.stockkeep", "Stockkeep", "stockkeep"));

pub const EXPORT_DIR_ENV: &str = "STOCKKEEP_EXPORT_DIR";
pub const LOG_ENV: &str = "STOCKKEEP_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn export_dir() -> Result<PathBuf> {
    let dir = match env::var_os(EXPORT_DIR_ENV).filter(|v| !v.is_empty()) {
        Some(v) => PathBuf::from(v),
        None => {
            let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
                .context("Could not determine platform-specific data dir")?;
            proj.data_dir().join("exports")
        }
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create export dir {}", dir.display()))?;
    Ok(dir)
}

/// `<export dir>/<kind>-YYYYMMDD-HHMMSS.<ext>`
pub fn default_export_path(kind: &str, ext: &str, now: NaiveDateTime) -> Result<PathBuf> {
    let file = format!("{}-{}.{}", kind, now.format("%Y%m%d-%H%M%S"), ext);
    Ok(export_dir()?.join(file))
}

/// Filter directive from `STOCKKEEP_LOG`, then `RUST_LOG`, then the default.
pub fn log_filter() -> String {
    env::var(LOG_ENV)
        .or_else(|_| env::var("RUST_LOG"))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
