// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{ReportError, Result};
use crate::models::{
    Breakeven, BreakevenStatus, CostBreakdown, PeriodHighlight, PeriodRecord, SummaryMetrics,
    Trend,
};
use crate::stats::mean_dec;
use rust_decimal::Decimal;

/// Periods compared at each end of the table for the trend label.
pub const TREND_WINDOW: usize = 3;

pub fn summarize(records: &[PeriodRecord]) -> Result<SummaryMetrics> {
    if records.is_empty() {
        return Err(ReportError::EmptyTable);
    }
    let revenue: Vec<Decimal> = records.iter().map(|r| r.figures.net_revenue).collect();
    let costs: Vec<Decimal> = records.iter().map(|r| r.total_cost).collect();
    let profits: Vec<Decimal> = records.iter().map(|r| r.figures.reported_profit).collect();

    let total_revenue: Decimal = revenue.iter().copied().sum();
    let total_cost: Decimal = costs.iter().copied().sum();
    let total_profit: Decimal = profits.iter().copied().sum();
    let avg_revenue = mean_dec(&revenue);
    let avg_cost = mean_dec(&costs);

    let margin = margin_pct(total_profit, total_revenue);

    let profitable_periods = profits.iter().filter(|p| **p > Decimal::ZERO).count();
    let loss_periods = profits.iter().filter(|p| **p < Decimal::ZERO).count();
    let zero_profit_periods = records.len() - profitable_periods - loss_periods;

    let breakeven = (avg_revenue > Decimal::ZERO).then(|| {
        let gap = avg_revenue - avg_cost;
        Breakeven {
            monthly_breakeven: avg_cost,
            current_revenue: avg_revenue,
            gap,
            status: if gap > Decimal::ZERO {
                BreakevenStatus::Above
            } else {
                BreakevenStatus::Below
            },
        }
    });

    Ok(SummaryMetrics {
        periods: records.len(),
        total_revenue,
        total_cost,
        total_profit,
        avg_revenue,
        avg_cost,
        avg_profit: mean_dec(&profits),
        margin,
        profitable_periods,
        loss_periods,
        zero_profit_periods,
        best: highlight(&records[first_extreme(&profits, |a, b| a > b)]),
        worst: highlight(&records[first_extreme(&profits, |a, b| a < b)]),
        trend: profit_trend(&profits),
        cost_breakdown: CostBreakdown {
            net_cost: records.iter().map(|r| r.figures.net_cost).sum(),
            social_contribution: records.iter().map(|r| r.figures.social_contribution).sum(),
            income_tax: records.iter().map(|r| r.figures.income_tax).sum(),
            staff_cost: records.iter().map(|r| r.figures.staff_cost).sum(),
        },
        breakeven,
        max_discrepancy: records
            .iter()
            .map(|r| r.discrepancy)
            .max()
            .unwrap_or(Decimal::ZERO),
    })
}

/// Profit as a percentage of revenue; zero when revenue is not positive.
pub fn margin_pct(profit: Decimal, revenue: Decimal) -> Decimal {
    if revenue > Decimal::ZERO {
        profit / revenue * Decimal::from(100)
    } else {
        Decimal::ZERO
    }
}

/// Index of the first value that no later value beats, so ties keep table order.
fn first_extreme(values: &[Decimal], better: impl Fn(Decimal, Decimal) -> bool) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if better(*v, values[best]) {
            best = i;
        }
    }
    best
}

fn highlight(r: &PeriodRecord) -> PeriodHighlight {
    PeriodHighlight {
        period: r.label.clone(),
        profit: r.figures.reported_profit,
        revenue: r.figures.net_revenue,
        costs: r.total_cost,
    }
}

/// Last `TREND_WINDOW` profits against the first `TREND_WINDOW`.
pub fn profit_trend(profits: &[Decimal]) -> Trend {
    if profits.len() < TREND_WINDOW {
        return Trend::InsufficientData;
    }
    let initial = mean_dec(&profits[..TREND_WINDOW]);
    let recent = mean_dec(&profits[profits.len() - TREND_WINDOW..]);
    if recent > initial { Trend::Up } else { Trend::Down }
}
