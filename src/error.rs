// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Input file not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Unsupported input format '{0}' (use xlsx, xls, xlsm, ods or csv)")]
    UnsupportedFormat(String),

    #[error("Spreadsheet has no sheets or no header row: {0}")]
    EmptySheet(String),

    #[error("Required column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Expected {expected} columns for positional binding, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("Invalid value '{value}' in row {row}, column '{column}'")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("No periods to analyze")]
    EmptyTable,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Process exit code for this failure: 2 when the input is absent, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::InputMissing(_) => 2,
            _ => 1,
        }
    }
}
