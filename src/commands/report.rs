// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::pipeline::run_from_path;
use crate::render::{ReportBuilder, ReportVariant};
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

pub fn handle(cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    let input = super::resolve_input(cfg, m)?;
    let out = m
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| cfg.output_path());
    let variant: ReportVariant = m
        .get_one::<String>("variant")
        .map(|s| s.parse::<ReportVariant>())
        .transpose()
        .map_err(|e: String| anyhow!(e))?
        .unwrap_or_default();

    let analysis = run_from_path(&input, cfg)
        .with_context(|| format!("Analyze {}", input.display()))?;

    let mut builder = ReportBuilder::new(variant)
        .business(cfg.business_name.as_str())
        .currency(cfg.currency.as_str());
    if let Some(title) = m.get_one::<String>("title") {
        builder = builder.title(title.as_str());
    }
    builder
        .write(&analysis, &out)
        .with_context(|| format!("Write report {}", out.display()))?;
    println!("Report written to {}", out.display());
    Ok(())
}
