// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Order-level sales exports: one row per order with a `revenue` column and,
//! optionally, `date` and `amount` (items per order).

use crate::error::{ReportError, Result};
use crate::forecast::MonthlyPoint;
use crate::loader::normalize_header;
use crate::utils::{parse_amount, parse_period, to_f64};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRow {
    pub month: Option<NaiveDate>,
    pub revenue: Decimal,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: Decimal,
    pub orders_count: usize,
    pub avg_order_value: Decimal,
}

/// Totals over order revenues; all zero for no orders.
pub fn summarize_sales(revenues: &[Decimal]) -> SalesSummary {
    if revenues.is_empty() {
        return SalesSummary::default();
    }
    let total_revenue: Decimal = revenues.iter().copied().sum();
    SalesSummary {
        total_revenue,
        orders_count: revenues.len(),
        avg_order_value: total_revenue / Decimal::from(revenues.len()),
    }
}

pub fn read_sales_csv(path: &Path) -> Result<Vec<SaleRow>> {
    if !path.exists() {
        return Err(ReportError::InputMissing(path.to_path_buf()));
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let find = |name: &str| headers.iter().position(|h| normalize_header(h) == name);
    let revenue_idx = find("revenue").ok_or_else(|| ReportError::MissingColumn {
        column: "revenue".into(),
        available: headers.clone(),
    })?;
    let date_idx = find("date");
    let amount_idx = find("amount");

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = i + 2;
        let cell = |idx: usize| rec.get(idx).map(str::trim).unwrap_or("");
        let invalid = |column: &str, value: &str| ReportError::InvalidCell {
            row: line,
            column: column.into(),
            value: value.into(),
        };

        let raw = cell(revenue_idx);
        let revenue = parse_amount(raw).ok_or_else(|| invalid("revenue", raw))?;
        let month = match date_idx.map(cell).filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_period(s).ok_or_else(|| invalid("date", s))?),
            None => None,
        };
        let amount = match amount_idx.map(cell).filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_amount(s).ok_or_else(|| invalid("amount", s))?),
            None => None,
        };
        out.push(SaleRow {
            month,
            revenue,
            amount,
        });
    }
    info!(orders = out.len(), path = %path.display(), "loaded sales export");
    Ok(out)
}

/// Group dated orders by calendar month. Orders per month is the sum of
/// `amount` when the export carries it, else the number of rows.
pub fn monthly_points(rows: &[SaleRow]) -> Vec<MonthlyPoint> {
    let mut by_month: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for r in rows {
        let Some(month) = r.month else { continue };
        let entry = by_month.entry(month).or_default();
        entry.0 += r.revenue;
        entry.1 += r.amount.unwrap_or(Decimal::ONE);
    }
    by_month
        .into_iter()
        .map(|(month, (revenue, orders))| MonthlyPoint {
            month,
            revenue: to_f64(revenue),
            orders: to_f64(orders),
            avg_order_value: if orders.is_zero() {
                0.0
            } else {
                to_f64(revenue / orders)
            },
        })
        .collect()
}
