// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::derive::{derive_records, validate};
use crate::error::ReportError;
use crate::loader::load_periods;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    let input = super::resolve_input(cfg, m)?;
    let records = derive_records(load_periods(&input, &cfg.sheet)?);
    let issues = validate(&records, &cfg.validation);

    if !maybe_print_json(m.get_flag("json"), false, &issues)? {
        if issues.is_empty() {
            println!("check: {} periods, no issues found", records.len());
        } else {
            let rows = issues
                .iter()
                .map(|i| vec![i.period.clone(), i.kind.to_string(), i.detail.clone()])
                .collect();
            println!("{}", pretty_table(&["Period", "Issue", "Detail"], rows));
        }
    }
    // same outcome as summary and report on a table with no periods
    if records.is_empty() {
        return Err(ReportError::EmptyTable.into());
    }
    Ok(())
}
