// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Linear-trend forecasting, seasonality and risk heuristics over a monthly
//! revenue series. All arithmetic here is `f64`.

use crate::models::{PeriodRecord, Trend};
use crate::stats::{coefficient_of_variation, index_fit, mean, population_variance, sample_std};
use crate::utils::to_f64;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Points needed before a trend or forecast is attempted.
pub const MIN_TREND_POINTS: usize = 3;
/// Points needed before calendar-month effects are considered.
pub const MIN_SEASONAL_POINTS: usize = 6;
/// Longest horizon a forecast extends to.
pub const MAX_HORIZON: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub revenue: f64,
    pub orders: f64,
    pub avg_order_value: f64,
}

/// One point per period. The average ticket from the sheet is used when present,
/// otherwise revenue over orders.
pub fn points_from_records(records: &[PeriodRecord]) -> Vec<MonthlyPoint> {
    records
        .iter()
        .map(|r| {
            let revenue = to_f64(r.figures.net_revenue);
            let orders = to_f64(r.figures.order_count);
            let ticket = to_f64(r.figures.avg_ticket);
            let avg_order_value = if ticket > 0.0 {
                ticket
            } else if orders > 0.0 {
                revenue / orders
            } else {
                0.0
            };
            MonthlyPoint {
                month: r.period,
                revenue,
                orders,
                avg_order_value,
            }
        })
        .collect()
}

fn sorted(points: &[MonthlyPoint]) -> Vec<MonthlyPoint> {
    let mut v = points.to_vec();
    v.sort_by_key(|p| p.month);
    v
}

fn column(points: &[MonthlyPoint], f: impl Fn(&MonthlyPoint) -> f64) -> Vec<f64> {
    points.iter().map(f).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

impl fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrendStrength::Strong => "strong",
            TrendStrength::Moderate => "moderate",
            TrendStrength::Weak => "weak",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub revenue_slope: f64,
    pub direction: Trend,
    pub orders_slope: f64,
    pub avg_order_slope: f64,
    /// Average monthly change, percent of the first value.
    pub monthly_change_rate: f64,
    /// Sample std over mean, percent.
    pub volatility: f64,
    pub strength: TrendStrength,
}

/// `None` below [`MIN_TREND_POINTS`].
pub fn analyze_trend(points: &[MonthlyPoint]) -> Option<TrendAnalysis> {
    if points.len() < MIN_TREND_POINTS {
        return None;
    }
    let pts = sorted(points);
    let revenue = column(&pts, |p| p.revenue);
    let (revenue_slope, _) = index_fit(&revenue);
    let (orders_slope, _) = index_fit(&column(&pts, |p| p.orders));
    let (avg_order_slope, _) = index_fit(&column(&pts, |p| p.avg_order_value));

    let first = revenue[0];
    let last = revenue[revenue.len() - 1];
    let monthly_change_rate = if first == 0.0 {
        0.0
    } else {
        (last - first) / revenue.len() as f64 / first * 100.0
    };
    let m = mean(&revenue);
    let volatility = if m == 0.0 {
        0.0
    } else {
        sample_std(&revenue) / m * 100.0
    };
    let strength = match monthly_change_rate.abs() {
        r if r > 5.0 => TrendStrength::Strong,
        r if r > 2.0 => TrendStrength::Moderate,
        _ => TrendStrength::Weak,
    };
    Some(TrendAnalysis {
        revenue_slope,
        direction: if revenue_slope > 0.0 { Trend::Up } else { Trend::Down },
        orders_slope,
        avg_order_slope,
        monthly_change_rate,
        volatility,
        strength,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn for_step(i: usize) -> Self {
        match i {
            0..=3 => Confidence::High,
            4..=6 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: NaiveDate,
    pub label: String,
    pub revenue: f64,
    pub orders: u64,
    pub avg_order_value: f64,
    pub seasonal_factor: f64,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
    pub total_revenue: f64,
}

impl Forecast {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// "Jan 2025 - Jun 2025", or empty.
    pub fn span(&self) -> String {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => format!("{} - {}", a.label, b.label),
            _ => String::new(),
        }
    }
}

/// Extend the revenue and order fits `horizon` months past the last point,
/// capped at [`MAX_HORIZON`]. Empty below [`MIN_TREND_POINTS`].
pub fn forecast(points: &[MonthlyPoint], horizon: usize) -> Forecast {
    if points.len() < MIN_TREND_POINTS {
        debug!(points = points.len(), "too few points to forecast");
        return Forecast::default();
    }
    let pts = sorted(points);
    let n = pts.len();
    let revenue = column(&pts, |p| p.revenue);
    let (rev_slope, rev_icpt) = index_fit(&revenue);
    let (ord_slope, ord_icpt) = index_fit(&column(&pts, |p| p.orders));
    let overall_mean = mean(&revenue);
    let last_month = pts[n - 1].month;

    let mut out = Vec::new();
    for i in 1..=horizon.min(MAX_HORIZON) {
        let Some(month) = last_month.checked_add_months(Months::new(i as u32)) else {
            break;
        };
        let index = (n + i - 1) as f64;
        let trend_revenue = rev_slope * index + rev_icpt;
        let orders = (ord_slope * index + ord_icpt).trunc().max(1.0) as u64;

        let seasonal_factor = if n >= MIN_SEASONAL_POINTS && overall_mean > 0.0 {
            let same: Vec<f64> = pts
                .iter()
                .filter(|p| p.month.month() == month.month())
                .map(|p| p.revenue)
                .collect();
            if same.is_empty() { 1.0 } else { mean(&same) / overall_mean }
        } else {
            1.0
        };
        let seasonal_revenue = trend_revenue * seasonal_factor;

        out.push(ForecastPoint {
            month,
            label: month.format("%b %Y").to_string(),
            revenue: seasonal_revenue.max(0.0),
            orders,
            avg_order_value: seasonal_revenue / orders as f64,
            seasonal_factor,
            confidence: Confidence::for_step(i),
        });
    }
    let total_revenue = out.iter().map(|p| p.revenue).sum();
    Forecast {
        points: out,
        total_revenue,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthMean {
    /// Calendar month, 1-12.
    pub month: u32,
    pub name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    /// Mean revenue per calendar month, January first.
    pub pattern: Vec<MonthMean>,
    pub best: Vec<MonthMean>,
    pub worst: Vec<MonthMean>,
    /// Population variance of the monthly means.
    pub variance: f64,
}

pub fn month_name(month: u32) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}

/// `None` below [`MIN_SEASONAL_POINTS`].
pub fn seasonality(points: &[MonthlyPoint]) -> Option<Seasonality> {
    if points.len() < MIN_SEASONAL_POINTS {
        return None;
    }
    let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for p in points {
        by_month.entry(p.month.month()).or_default().push(p.revenue);
    }
    let pattern: Vec<MonthMean> = by_month
        .into_iter()
        .map(|(month, values)| MonthMean {
            month,
            name: month_name(month),
            revenue: mean(&values),
        })
        .collect();

    let mut desc = pattern.clone();
    desc.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    let mut asc = pattern.clone();
    asc.sort_by(|a, b| a.revenue.total_cmp(&b.revenue));
    let variance = population_variance(&column_of(&pattern));

    Some(Seasonality {
        best: desc.into_iter().take(3).collect(),
        worst: asc.into_iter().take(3).collect(),
        pattern,
        variance,
    })
}

fn column_of(means: &[MonthMean]) -> Vec<f64> {
    means.iter().map(|m| m.revenue).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub risk: String,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
}

fn risk(risk: &str, severity: Severity, description: String, impact: &str) -> RiskFactor {
    RiskFactor {
        risk: risk.to_string(),
        severity,
        description,
        impact: impact.to_string(),
    }
}

/// `losses` is `(loss periods, total periods)` from the profit table, when known.
pub fn risk_factors(points: &[MonthlyPoint], losses: Option<(usize, usize)>) -> Vec<RiskFactor> {
    if points.len() < 2 {
        return vec![risk(
            "Insufficient data",
            Severity::High,
            "Not enough history to assess risk".to_string(),
            "Forecasts and risk checks are unreliable",
        )];
    }
    let pts = sorted(points);
    let revenue = column(&pts, |p| p.revenue);
    let mut out = Vec::new();

    if revenue.len() >= 3 {
        let tail = &revenue[revenue.len() - 3..];
        if tail.windows(2).all(|w| w[1] <= w[0]) {
            out.push(risk(
                "Falling revenue",
                Severity::High,
                format!("Revenue has declined for {} consecutive months", tail.len()),
                "Direct hit on profitability",
            ));
        }
    }

    let cv = coefficient_of_variation(&revenue);
    if cv > 0.2 {
        out.push(risk(
            "High revenue volatility",
            Severity::Medium,
            format!("Coefficient of variation: {:.2}", cv),
            "Harder to plan and forecast",
        ));
    }

    let aov = column(&pts, |p| p.avg_order_value);
    if let Some(last) = aov.last() {
        if *last < mean(&aov) * 0.9 {
            out.push(risk(
                "Falling average ticket",
                Severity::Medium,
                "The latest average ticket is more than 10% below the historical mean".to_string(),
                "More customers are needed to hold revenue",
            ));
        }
    }

    if let Some((loss, total)) = losses {
        if total > 0 && loss as f64 > total as f64 * 0.3 {
            out.push(risk(
                "Frequent monthly losses",
                Severity::High,
                format!("{} of {} months ran at a loss", loss, total),
                "Threatens long-term financial stability",
            ));
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthScenario {
    pub name: String,
    pub annual_growth_pct: f64,
    pub projected_annual_revenue: f64,
    pub key_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthScenarios {
    pub current_annual: f64,
    pub scenarios: Vec<GrowthScenario>,
}

/// Conservative, moderate and aggressive annual growth over the current run rate.
pub fn growth_scenarios(points: &[MonthlyPoint]) -> GrowthScenarios {
    if points.len() < MIN_TREND_POINTS {
        return GrowthScenarios::default();
    }
    let current_annual = mean(&column(points, |p| p.revenue)) * 12.0;
    let presets: [(&str, f64, &[&str]); 3] = [
        (
            "Conservative",
            5.0,
            &["Keep current quality", "Cost optimization", "Steady promotion"],
        ),
        (
            "Moderate",
            15.0,
            &["New menu items", "Loyalty programme", "Digital marketing"],
        ),
        (
            "Aggressive",
            30.0,
            &[
                "Longer opening hours",
                "Events",
                "Business partnerships",
                "Catering",
            ],
        ),
    ];
    let scenarios = presets
        .iter()
        .map(|(name, pct, actions)| GrowthScenario {
            name: name.to_string(),
            annual_growth_pct: *pct,
            projected_annual_revenue: current_annual * (1.0 + pct / 100.0),
            key_actions: actions.iter().map(|a| a.to_string()).collect(),
        })
        .collect();
    GrowthScenarios {
        current_annual,
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(y: i32, m: u32, revenue: f64) -> MonthlyPoint {
        MonthlyPoint {
            month: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            revenue,
            orders: 10.0,
            avg_order_value: revenue / 10.0,
        }
    }

    #[test]
    fn confidence_steps() {
        assert_eq!(Confidence::for_step(3), Confidence::High);
        assert_eq!(Confidence::for_step(4), Confidence::Medium);
        assert_eq!(Confidence::for_step(7), Confidence::Low);
    }

    #[test]
    fn flat_tail_counts_as_falling() {
        let pts = vec![point(2024, 1, 100.0), point(2024, 2, 90.0), point(2024, 3, 90.0)];
        let risks = risk_factors(&pts, None);
        assert!(risks.iter().any(|r| r.risk == "Falling revenue"));
    }
}
