// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod check;
pub mod export;
pub mod forecast;
pub mod report;
pub mod sales;
pub mod summary;

use crate::config::AppConfig;
use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// `--input` if given, else the `input` named in the config.
pub fn resolve_input(cfg: &AppConfig, m: &clap::ArgMatches) -> Result<PathBuf> {
    m.get_one::<String>("input")
        .map(PathBuf::from)
        .or_else(|| cfg.input.clone())
        .ok_or_else(|| anyhow!("No input file: pass --input or set \"input\" in the config"))
}
