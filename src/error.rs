// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejections from ledger operations. None of them leaves a partial
/// mutation behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A required field is missing, empty, or outside its allowed set.
    #[error("{0}")]
    Validation(String),

    /// A numeric field does not parse, or parses negative.
    #[error("{0}")]
    Format(String),

    #[error("Item '{0}' not found")]
    NotFound(String),

    #[error("Sale quantity {requested} exceeds stock of {available} for {sku}")]
    InsufficientStock {
        sku: String,
        requested: u32,
        available: u32,
    },
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        LedgerError::Format(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown format: {0} (use csv|json)")]
    UnknownFormat(String),
}
