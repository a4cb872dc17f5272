// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ValidationConfig;
use crate::models::{IssueKind, PeriodRecord, PeriodRow, ValidationIssue};
use crate::stats::mean_dec;
use crate::utils::fmt_amount;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Add `total_cost`, `computed_profit` and `discrepancy` to every row.
pub fn derive_records(rows: Vec<PeriodRow>) -> Vec<PeriodRecord> {
    rows.into_iter().map(derive_record).collect()
}

pub fn derive_record(row: PeriodRow) -> PeriodRecord {
    let f = &row.figures;
    let total_cost = f.net_cost + f.social_contribution + f.income_tax + f.staff_cost;
    let computed_profit = f.net_revenue - total_cost;
    let discrepancy = (f.reported_profit - computed_profit).abs();
    PeriodRecord {
        period: row.period,
        label: row.label,
        figures: row.figures,
        total_cost,
        computed_profit,
        discrepancy,
        missing: row.missing,
    }
}

/// Advisory checks over the derived table. Never fails; every issue is also
/// logged at `warn`.
pub fn validate(records: &[PeriodRecord], cfg: &ValidationConfig) -> Vec<ValidationIssue> {
    if records.is_empty() {
        let issue = ValidationIssue {
            kind: IssueKind::EmptyTable,
            period: String::new(),
            detail: "no periods in the row window".into(),
        };
        warn!(kind = %issue.kind, "{}", issue.detail);
        return vec![issue];
    }
    let mut issues = Vec::new();

    for r in records {
        if !r.missing.is_empty() {
            let fields: Vec<&str> = r.missing.iter().map(|f| f.key()).collect();
            issues.push(ValidationIssue {
                kind: IssueKind::MissingValue,
                period: r.label.clone(),
                detail: format!("empty cells treated as 0: {}", fields.join(", ")),
            });
        }
        if r.figures.net_revenue < Decimal::ZERO {
            issues.push(ValidationIssue {
                kind: IssueKind::NegativeRevenue,
                period: r.label.clone(),
                detail: format!("net revenue {}", fmt_amount(&r.figures.net_revenue, 2)),
            });
        }
    }

    let costs: Vec<Decimal> = records.iter().map(|r| r.total_cost).collect();
    let avg_cost = mean_dec(&costs);
    let limit = avg_cost * cfg.cost_outlier_factor;
    for r in records.iter().filter(|r| r.total_cost > limit) {
        issues.push(ValidationIssue {
            kind: IssueKind::CostOutlier,
            period: r.label.clone(),
            detail: format!(
                "total cost {} exceeds {}x the average of {}",
                fmt_amount(&r.total_cost, 0),
                cfg.cost_outlier_factor.normalize(),
                fmt_amount(&avg_cost, 0)
            ),
        });
    }

    for r in records
        .iter()
        .filter(|r| r.discrepancy > cfg.discrepancy_tolerance)
    {
        issues.push(ValidationIssue {
            kind: IssueKind::ProfitDiscrepancy,
            period: r.label.clone(),
            detail: format!(
                "reported profit {} differs from computed {} by {}",
                fmt_amount(&r.figures.reported_profit, 2),
                fmt_amount(&r.computed_profit, 2),
                fmt_amount(&r.discrepancy, 2)
            ),
        });
    }

    let max_diff = records
        .iter()
        .map(|r| r.discrepancy)
        .max()
        .unwrap_or(Decimal::ZERO);
    if max_diff > cfg.discrepancy_tolerance {
        warn!(max_discrepancy = %max_diff, "reported profit does not match computed profit");
    } else {
        info!(max_discrepancy = %max_diff, "profit cross-check ok");
    }

    for issue in &issues {
        warn!(kind = %issue.kind, period = %issue.period, "{}", issue.detail);
    }
    issues
}
