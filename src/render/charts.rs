// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Plotly figure JSON. Figures are plain `serde_json::Value`s; plotly.js draws
//! them in the browser.

use crate::forecast::{Forecast, MonthlyPoint};
use crate::models::{PeriodRecord, SummaryMetrics};
use crate::stats::pearson;
use crate::utils::to_f64;
use serde_json::{Value, json};

const REVENUE: &str = "#2563eb";
const COST: &str = "#f97316";
const GAIN: &str = "#16a34a";
const LOSS: &str = "#dc2626";

/// A figure bound to the element id it is drawn into.
#[derive(Debug, Clone)]
pub struct Chart {
    pub id: &'static str,
    pub title: String,
    pub figure: Value,
}

fn layout(y_title: &str) -> Value {
    json!({
        "margin": {"t": 30, "r": 20, "b": 50, "l": 70},
        "yaxis": {"title": y_title, "separatethousands": true},
        "legend": {"orientation": "h"},
        "hovermode": "x unified",
    })
}

fn labels(records: &[PeriodRecord]) -> Vec<&str> {
    records.iter().map(|r| r.label.as_str()).collect()
}

pub fn revenue_vs_cost(records: &[PeriodRecord], currency: &str) -> Chart {
    let revenue: Vec<f64> = records.iter().map(|r| to_f64(r.figures.net_revenue)).collect();
    let cost: Vec<f64> = records.iter().map(|r| to_f64(r.total_cost)).collect();
    Chart {
        id: "chart-revenue-cost",
        title: "Revenue vs costs".into(),
        figure: json!({
            "data": [
                {"type": "bar", "name": "Net revenue", "x": labels(records), "y": revenue, "marker": {"color": REVENUE}},
                {"type": "bar", "name": "Total costs", "x": labels(records), "y": cost, "marker": {"color": COST}},
            ],
            "layout": layout(currency),
        }),
    }
}

pub fn profit(records: &[PeriodRecord], currency: &str) -> Chart {
    let values: Vec<f64> = records
        .iter()
        .map(|r| to_f64(r.figures.reported_profit))
        .collect();
    let colors: Vec<&str> = values
        .iter()
        .map(|v| if *v >= 0.0 { GAIN } else { LOSS })
        .collect();
    Chart {
        id: "chart-profit",
        title: "Monthly profit".into(),
        figure: json!({
            "data": [{"type": "bar", "name": "Profit", "x": labels(records), "y": values, "marker": {"color": colors}}],
            "layout": layout(currency),
        }),
    }
}

pub fn cost_breakdown(summary: &SummaryMetrics) -> Chart {
    let b = &summary.cost_breakdown;
    Chart {
        id: "chart-cost-breakdown",
        title: "Cost structure".into(),
        figure: json!({
            "data": [{
                "type": "pie",
                "hole": 0.45,
                "labels": ["Net costs", "Social contributions", "Income tax", "Staff costs"],
                "values": [
                    to_f64(b.net_cost),
                    to_f64(b.social_contribution),
                    to_f64(b.income_tax),
                    to_f64(b.staff_cost),
                ],
            }],
            "layout": {"margin": {"t": 30, "r": 20, "b": 20, "l": 20}},
        }),
    }
}

pub fn correlation(records: &[PeriodRecord], currency: &str) -> Chart {
    let revenue: Vec<f64> = records.iter().map(|r| to_f64(r.figures.net_revenue)).collect();
    let cost: Vec<f64> = records.iter().map(|r| to_f64(r.total_cost)).collect();
    let r = pearson(&revenue, &cost);
    let mut lay = layout(&format!("Total costs ({})", currency));
    lay["xaxis"] = json!({"title": format!("Net revenue ({})", currency)});
    lay["hovermode"] = json!("closest");
    Chart {
        id: "chart-correlation",
        title: format!("Revenue vs costs correlation (r = {:.2})", r),
        figure: json!({
            "data": [{
                "type": "scatter",
                "mode": "markers",
                "x": revenue,
                "y": cost,
                "text": labels(records),
                "marker": {"size": 10, "color": REVENUE},
            }],
            "layout": lay,
        }),
    }
}

pub fn forecast_chart(history: &[MonthlyPoint], forecast: &Forecast, currency: &str) -> Chart {
    let hx: Vec<String> = history
        .iter()
        .map(|p| p.month.format("%b %Y").to_string())
        .collect();
    let hy: Vec<f64> = history.iter().map(|p| p.revenue).collect();
    // join the forecast line to the last actual point
    let mut fx: Vec<String> = hx.last().cloned().into_iter().collect();
    let mut fy: Vec<f64> = hy.last().copied().into_iter().collect();
    fx.extend(forecast.points.iter().map(|p| p.label.clone()));
    fy.extend(forecast.points.iter().map(|p| p.revenue));
    Chart {
        id: "chart-forecast",
        title: "Revenue forecast".into(),
        figure: json!({
            "data": [
                {"type": "scatter", "mode": "lines+markers", "name": "Actual", "x": hx, "y": hy, "line": {"color": REVENUE}},
                {"type": "scatter", "mode": "lines+markers", "name": "Forecast", "x": fx, "y": fy, "line": {"color": COST, "dash": "dash"}},
            ],
            "layout": layout(currency),
        }),
    }
}

/// Figure JSON safe to place inside a `<script>` element.
pub fn script_json(v: &Value) -> String {
    v.to_string().replace("</", "<\\/")
}
