// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::derive::derive_records;
use crate::loader::load_periods;
use crate::models::{Field, PeriodRecord};
use anyhow::{Context, Result, anyhow};
use std::path::Path;

pub fn handle(cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();
    let input = super::resolve_input(cfg, m)?;
    let records = derive_records(load_periods(&input, &cfg.sheet)?);

    match fmt.as_str() {
        "csv" => write_csv(&records, Path::new(out))?,
        "json" => std::fs::write(out, serde_json::to_string_pretty(&records)?)
            .with_context(|| format!("Write {}", out))?,
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!("Exported {} periods to {}", records.len(), out);
    Ok(())
}

pub fn write_csv(records: &[PeriodRecord], out: &Path) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(out).with_context(|| format!("Create {}", out.display()))?;
    let mut header = vec!["period"];
    header.extend(Field::ALL.iter().map(|f| f.key()));
    header.extend(["total_cost", "computed_profit", "discrepancy"]);
    wtr.write_record(&header)?;
    for r in records {
        let mut row = vec![r.period.format("%Y-%m").to_string()];
        row.extend(Field::ALL.iter().map(|f| r.value(*f).to_string()));
        row.push(r.total_cost.to_string());
        row.push(r.computed_profit.to_string());
        row.push(r.discrepancy.to_string());
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
