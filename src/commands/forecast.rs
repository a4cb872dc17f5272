// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::AppConfig;
use crate::derive::derive_records;
use crate::forecast::{analyze_trend, forecast, points_from_records};
use crate::loader::load_periods;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde_json::json;

pub fn handle(cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    let input = super::resolve_input(cfg, m)?;
    let months = m
        .get_one::<usize>("months")
        .copied()
        .unwrap_or(cfg.forecast.horizon);

    let records = derive_records(load_periods(&input, &cfg.sheet)?);
    let points = points_from_records(&records);
    let trend = analyze_trend(&points);
    let fc = forecast(&points, months);

    if maybe_print_json(
        m.get_flag("json"),
        false,
        &json!({"trend": trend, "forecast": fc}),
    )? {
        return Ok(());
    }
    match &trend {
        Some(t) => println!(
            "Trend: {} ({}), {:.1}% per month, volatility {:.1}%",
            t.direction, t.strength, t.monthly_change_rate, t.volatility
        ),
        None => println!("Trend: insufficient_data"),
    }
    if fc.is_empty() {
        println!("Not enough periods to forecast");
        return Ok(());
    }
    let rows = fc
        .points
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                format!("{:.2}", p.revenue),
                p.orders.to_string(),
                format!("{:.2}", p.avg_order_value),
                p.confidence.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Revenue", "Orders", "Avg order", "Confidence"],
            rows
        )
    );
    println!("Total: {:.2} {}", fc.total_revenue, cfg.currency);
    Ok(())
}
