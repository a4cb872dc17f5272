// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::sales::{monthly_points, read_sales_csv, summarize_sales};
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde_json::json;
use std::path::Path;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let rows = read_sales_csv(Path::new(path)).with_context(|| format!("Open CSV {}", path))?;
    let revenues: Vec<Decimal> = rows.iter().map(|r| r.revenue).collect();
    let summary = summarize_sales(&revenues);
    let months = monthly_points(&rows);

    if maybe_print_json(
        m.get_flag("json"),
        false,
        &json!({"summary": summary, "monthly": months}),
    )? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Total revenue", "Orders", "Avg order value"],
            vec![vec![
                fmt_amount(&summary.total_revenue, 2),
                summary.orders_count.to_string(),
                fmt_amount(&summary.avg_order_value, 2),
            ]],
        )
    );
    if !months.is_empty() {
        let data = months
            .iter()
            .map(|p| {
                vec![
                    p.month.format("%Y-%m").to_string(),
                    format!("{:.2}", p.revenue),
                    format!("{:.0}", p.orders),
                    format!("{:.2}", p.avg_order_value),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Revenue", "Orders", "Avg order"], data)
        );
    }
    Ok(())
}
