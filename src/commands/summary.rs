// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::summarize;
use crate::config::AppConfig;
use crate::derive::derive_records;
use crate::loader::load_periods;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(cfg: &AppConfig, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let input = super::resolve_input(cfg, m)?;

    let rows = load_periods(&input, &cfg.sheet)?;
    let records = derive_records(rows);
    let s = summarize(&records).with_context(|| format!("Summarize {}", input.display()))?;

    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    let ccy = cfg.currency.as_str();
    let mut data = vec![
        vec!["Periods".into(), s.periods.to_string()],
        vec!["Total revenue".into(), fmt_money(&s.total_revenue, ccy)],
        vec!["Total costs".into(), fmt_money(&s.total_cost, ccy)],
        vec!["Total profit".into(), fmt_money(&s.total_profit, ccy)],
        vec!["Average revenue".into(), fmt_money(&s.avg_revenue, ccy)],
        vec!["Average costs".into(), fmt_money(&s.avg_cost, ccy)],
        vec!["Average profit".into(), fmt_money(&s.avg_profit, ccy)],
        vec!["Margin".into(), fmt_pct(&s.margin)],
        vec![
            "Profitable / loss / even".into(),
            format!(
                "{} / {} / {}",
                s.profitable_periods, s.loss_periods, s.zero_profit_periods
            ),
        ],
        vec![
            "Best month".into(),
            format!("{} ({})", s.best.period, fmt_money(&s.best.profit, ccy)),
        ],
        vec![
            "Worst month".into(),
            format!("{} ({})", s.worst.period, fmt_money(&s.worst.profit, ccy)),
        ],
        vec!["Trend".into(), s.trend.to_string()],
    ];
    if let Some(b) = &s.breakeven {
        data.push(vec![
            "Monthly breakeven".into(),
            fmt_money(&b.monthly_breakeven, ccy),
        ]);
        data.push(vec!["Gap to breakeven".into(), fmt_money(&b.gap, ccy)]);
    }
    println!("{}", pretty_table(&["Metric", "Value"], data));
    Ok(())
}
