// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Self-contained HTML reports. One page template, filled section by section
//! according to the [`ReportVariant`].

pub mod charts;

use crate::error::Result;
use crate::forecast::{Forecast, GrowthScenarios, RiskFactor, Seasonality};
use crate::models::{
    BreakevenStatus, PeriodHighlight, PeriodRecord, RecoveryPlan, SavingsOpportunity,
    SummaryMetrics, ValidationIssue,
};
use crate::pipeline::Analysis;
use crate::planner::{ActionPlan, ExecutiveSummary, PerformanceGap, Recommendation};
use crate::utils::{fmt_amount, fmt_money, fmt_pct, to_f64};
use charts::{Chart, script_json};
use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVariant {
    #[default]
    Standard,
    Strategic,
    Dashboard,
}

impl ReportVariant {
    pub const NAMES: [&'static str; 3] = ["standard", "strategic", "dashboard"];
}

impl FromStr for ReportVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(ReportVariant::Standard),
            "strategic" => Ok(ReportVariant::Strategic),
            "dashboard" => Ok(ReportVariant::Dashboard),
            other => Err(format!("unknown report variant '{}'", other)),
        }
    }
}

impl fmt::Display for ReportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportVariant::Standard => "standard",
            ReportVariant::Strategic => "strategic",
            ReportVariant::Dashboard => "dashboard",
        })
    }
}

pub struct ReportBuilder {
    variant: ReportVariant,
    title: Option<String>,
    business: String,
    currency: String,
}

impl ReportBuilder {
    pub fn new(variant: ReportVariant) -> Self {
        Self {
            variant,
            title: None,
            business: "My Business".into(),
            currency: "PLN".into(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn business(mut self, name: impl Into<String>) -> Self {
        self.business = name.into();
        self
    }

    pub fn currency(mut self, ccy: impl Into<String>) -> Self {
        self.currency = ccy.into();
        self
    }

    fn resolved_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| match self.variant {
            ReportVariant::Standard => format!("{} financial report", self.business),
            ReportVariant::Strategic => format!("{} strategic report", self.business),
            ReportVariant::Dashboard => format!("{} dashboard", self.business),
        })
    }

    pub fn render(&self, a: &Analysis) -> String {
        let ccy = self.currency.as_str();
        let mut charts = vec![
            charts::revenue_vs_cost(&a.records, ccy),
            charts::profit(&a.records, ccy),
            charts::cost_breakdown(&a.summary),
            charts::correlation(&a.records, ccy),
        ];
        let mut body = vec![render_kpis(&a.summary, ccy)];

        match self.variant {
            ReportVariant::Standard => {
                body.push(render_charts(&charts));
                body.extend(self.standard_sections(a));
            }
            ReportVariant::Strategic => {
                body.insert(0, render_executive(&a.executive, &a.gaps, ccy));
                body.push(render_charts(&charts));
                body.extend(self.standard_sections(a));
                if !a.forecast.is_empty() {
                    let fc = charts::forecast_chart(&a.points, &a.forecast, ccy);
                    body.push(render_forecast(&a.forecast, &fc, ccy));
                    charts.push(fc);
                }
                body.push(render_seasonality(a.seasonality.as_ref(), ccy));
                body.push(render_risks(&a.risks));
                body.push(render_scenarios(&a.scenarios, ccy));
                body.push(render_recommendations(&a.recommendations));
                body.push(render_action_plan(&a.action_plan));
            }
            ReportVariant::Dashboard => {
                body.push(render_simulator(&a.summary, ccy));
                body.push(render_charts(&charts));
            }
        }

        let title = self.resolved_title();
        let span = match (a.records.first(), a.records.last()) {
            (Some(f), Some(l)) => format!("{} - {}", f.label, l.label),
            _ => String::new(),
        };
        let scripts = render_chart_scripts(&charts);
        let extra_js = if self.variant == ReportVariant::Dashboard {
            simulator_javascript()
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
    <script src="{cdn}"></script>
</head>
<body class="variant-{variant}">
    <div class="container">
        <header>
            <h1>{title}</h1>
            <div class="meta">{business} &middot; {span} &middot; {periods} periods</div>
        </header>
        {body}
        <footer>Generated {generated} by profitlens {version}</footer>
    </div>
    <script>{scripts}</script>
    <script>{extra_js}</script>
</body>
</html>"#,
            title = html_escape(&title),
            css = inline_css(),
            cdn = PLOTLY_CDN,
            variant = self.variant,
            business = html_escape(&self.business),
            span = html_escape(&span),
            periods = a.summary.periods,
            body = body.join("\n"),
            generated = Local::now().format("%Y-%m-%d %H:%M"),
            version = env!("CARGO_PKG_VERSION"),
            scripts = scripts,
            extra_js = extra_js,
        )
    }

    fn standard_sections(&self, a: &Analysis) -> Vec<String> {
        let ccy = self.currency.as_str();
        vec![
            render_highlights(&a.summary.best, &a.summary.worst, ccy),
            render_issues(&a.issues),
            render_savings(&a.savings, ccy),
            render_recovery(&a.recovery),
            render_period_table(&a.records),
        ]
    }

    /// Render and write to `path`, creating parent directories.
    pub fn write(&self, a: &Analysis, path: &Path) -> Result<()> {
        write_report(&self.render(a), path)
    }
}

pub fn write_report(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(())
}

fn section(title: &str, inner: String) -> String {
    format!(
        r#"<section class="section">
    <h2>{title}</h2>
    {inner}
</section>"#,
        title = html_escape(title),
        inner = inner,
    )
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", html_escape(h)))
        .collect();
    let body: String = rows
        .into_iter()
        .map(|r| {
            let cells: String = r.into_iter().map(|c| format!("<td>{}</td>", c)).collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
}

fn card(label: &str, value: String, class: &str) -> String {
    format!(
        r#"<div class="summary-card {class}">
        <h3>{label}</h3>
        <div class="value">{value}</div>
    </div>"#,
        class = class,
        label = html_escape(label),
        value = html_escape(&value),
    )
}

fn sign_class(d: Decimal) -> &'static str {
    if d < Decimal::ZERO { "negative" } else { "positive" }
}

fn render_kpis(s: &SummaryMetrics, ccy: &str) -> String {
    let mut cards = vec![
        card("Total revenue", fmt_money(&s.total_revenue, ccy), ""),
        card("Total costs", fmt_money(&s.total_cost, ccy), ""),
        card("Total profit", fmt_money(&s.total_profit, ccy), sign_class(s.total_profit)),
        card("Margin", fmt_pct(&s.margin), sign_class(s.margin)),
        card(
            "Profitable / loss months",
            format!("{} / {}", s.profitable_periods, s.loss_periods),
            "",
        ),
        card("Profit trend", s.trend.to_string(), ""),
    ];
    if let Some(b) = &s.breakeven {
        let class = match b.status {
            BreakevenStatus::Above => "positive",
            BreakevenStatus::Below => "negative",
        };
        cards.push(card(
            "Monthly breakeven",
            fmt_money(&b.monthly_breakeven, ccy),
            "",
        ));
        cards.push(card("Gap to breakeven", fmt_money(&b.gap, ccy), class));
    }
    format!(r#"<div class="summary">{}</div>"#, cards.join("\n"))
}

fn render_charts(charts: &[Chart]) -> String {
    let cells: String = charts
        .iter()
        .map(|c| {
            format!(
                r#"<div class="chart"><h3>{title}</h3><div id="{id}" class="plot"></div></div>"#,
                title = html_escape(&c.title),
                id = c.id,
            )
        })
        .collect();
    format!(r#"<div class="charts">{}</div>"#, cells)
}

fn render_chart_scripts(charts: &[Chart]) -> String {
    charts
        .iter()
        .map(|c| {
            format!(
                "Plotly.newPlot(\"{id}\", ({fig}).data, ({fig}).layout, {{responsive: true}});",
                id = c.id,
                fig = script_json(&c.figure),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_highlights(best: &PeriodHighlight, worst: &PeriodHighlight, ccy: &str) -> String {
    let row = |caption: &str, h: &PeriodHighlight| {
        vec![
            html_escape(caption),
            html_escape(&h.period),
            fmt_money(&h.revenue, ccy),
            fmt_money(&h.costs, ccy),
            fmt_money(&h.profit, ccy),
        ]
    };
    section(
        "Best and worst month",
        table(
            &["", "Month", "Revenue", "Costs", "Profit"],
            vec![row("Best", best), row("Worst", worst)],
        ),
    )
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return section(
            "Data quality",
            r#"<p class="ok">All checks passed.</p>"#.into(),
        );
    }
    let rows = issues
        .iter()
        .map(|i| {
            vec![
                html_escape(&i.period),
                html_escape(&i.kind.to_string()),
                html_escape(&i.detail),
            ]
        })
        .collect();
    section("Data quality", table(&["Month", "Check", "Detail"], rows))
}

fn render_savings(savings: &[SavingsOpportunity], ccy: &str) -> String {
    if savings.is_empty() {
        return section(
            "Savings opportunities",
            "<p>No opportunities found.</p>".into(),
        );
    }
    let total: Decimal = savings.iter().map(|s| s.estimated_annual).sum();
    let mut rows: Vec<Vec<String>> = savings
        .iter()
        .map(|s| {
            vec![
                html_escape(&s.category),
                html_escape(&s.description),
                fmt_money(&s.estimated_annual, ccy),
                html_escape(&s.action),
            ]
        })
        .collect();
    rows.push(vec![
        "<strong>Total</strong>".into(),
        String::new(),
        format!("<strong>{}</strong>", fmt_money(&total, ccy)),
        String::new(),
    ]);
    section(
        "Savings opportunities",
        table(&["Area", "Finding", "Estimated per year", "Action"], rows),
    )
}

fn render_recovery(plan: &RecoveryPlan) -> String {
    let blocks: String = plan
        .buckets()
        .iter()
        .map(|(caption, items)| {
            let li: String = items
                .iter()
                .map(|i| {
                    format!(
                        r#"<li><strong>{action}</strong>: {desc} <span class="tag">impact {impact}</span> <span class="tag">effort {effort}</span></li>"#,
                        action = html_escape(&i.action),
                        desc = html_escape(&i.description),
                        impact = html_escape(&i.impact),
                        effort = html_escape(&i.effort),
                    )
                })
                .collect();
            format!(
                r#"<div class="bucket"><h3>{}</h3><ul>{}</ul></div>"#,
                html_escape(caption),
                li
            )
        })
        .collect();
    section("Recovery plan", format!(r#"<div class="buckets">{}</div>"#, blocks))
}

fn render_period_table(records: &[PeriodRecord]) -> String {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                html_escape(&r.label),
                fmt_amount(&r.figures.net_revenue, 2),
                fmt_amount(&r.total_cost, 2),
                fmt_amount(&r.figures.reported_profit, 2),
                fmt_amount(&r.computed_profit, 2),
                fmt_amount(&r.discrepancy, 2),
                fmt_amount(&r.figures.avg_ticket, 2),
                fmt_amount(&r.figures.order_count, 0),
            ]
        })
        .collect();
    section(
        "Monthly figures",
        table(
            &[
                "Month",
                "Net revenue",
                "Total costs",
                "Reported profit",
                "Computed profit",
                "Discrepancy",
                "Avg ticket",
                "Orders",
            ],
            rows,
        ),
    )
}

fn money_f(v: f64, ccy: &str) -> String {
    let d = Decimal::try_from(v).unwrap_or_default();
    fmt_money(&d, ccy)
}

fn render_executive(e: &ExecutiveSummary, gaps: &[PerformanceGap], ccy: &str) -> String {
    let mut cards = vec![
        card("Situation", e.situation.to_string(), ""),
        card("Revenue trend", e.trend_direction.to_string(), ""),
        card(
            "Trend strength",
            e.trend_strength
                .map(|s| s.to_string())
                .unwrap_or_else(|| "n/a".into()),
            "",
        ),
        card("High risks", e.high_risks.to_string(), ""),
        card(
            "Critical / high recommendations",
            format!(
                "{} / {}",
                e.critical_recommendations, e.high_priority_recommendations
            ),
            "",
        ),
    ];
    if !e.forecast_span.is_empty() {
        cards.push(card(
            &format!("Forecast {}", e.forecast_span),
            money_f(e.forecast_revenue, ccy),
            "",
        ));
    }
    let focus: String = e
        .focus_areas
        .iter()
        .map(|f| format!("<li>{}</li>", html_escape(f)))
        .collect();
    let gap_table = if gaps.is_empty() {
        String::new()
    } else {
        table(
            &["Gap", "Current", "Target", "Impact", "Priority"],
            gaps.iter()
                .map(|g| {
                    vec![
                        html_escape(&g.gap),
                        format!("{:.2}", g.current_value),
                        format!("{:.2}", g.target_value),
                        html_escape(&g.potential_impact),
                        g.priority.to_string(),
                    ]
                })
                .collect(),
        )
    };
    section(
        "Executive summary",
        format!(
            r#"<div class="summary">{}</div><h3>Focus areas</h3><ul>{}</ul>{}"#,
            cards.join("\n"),
            focus,
            gap_table
        ),
    )
}

fn render_forecast(f: &Forecast, chart: &Chart, ccy: &str) -> String {
    let rows = f
        .points
        .iter()
        .map(|p| {
            vec![
                html_escape(&p.label),
                money_f(p.revenue, ccy),
                p.orders.to_string(),
                money_f(p.avg_order_value, ccy),
                p.confidence.to_string(),
            ]
        })
        .collect();
    section(
        "Forecast",
        format!(
            r#"<div class="chart"><div id="{id}" class="plot"></div></div>{table}<p>Total forecast revenue: <strong>{total}</strong></p>"#,
            id = chart.id,
            table = table(&["Month", "Revenue", "Orders", "Avg order", "Confidence"], rows),
            total = money_f(f.total_revenue, ccy),
        ),
    )
}

fn render_seasonality(s: Option<&Seasonality>, ccy: &str) -> String {
    let Some(s) = s else {
        return section(
            "Seasonality",
            "<p>Not enough history to detect seasonality.</p>".into(),
        );
    };
    let list = |months: &[crate::forecast::MonthMean]| -> String {
        months
            .iter()
            .map(|m| format!("<li>{}: {}</li>", html_escape(&m.name), money_f(m.revenue, ccy)))
            .collect()
    };
    section(
        "Seasonality",
        format!(
            r#"<div class="buckets"><div class="bucket"><h3>Strongest months</h3><ul>{}</ul></div><div class="bucket"><h3>Weakest months</h3><ul>{}</ul></div></div><p>Variance of monthly means: {:.0}</p>"#,
            list(&s.best),
            list(&s.worst),
            s.variance
        ),
    )
}

fn render_risks(risks: &[RiskFactor]) -> String {
    if risks.is_empty() {
        return section("Risk factors", "<p>No risk factors detected.</p>".into());
    }
    let rows = risks
        .iter()
        .map(|r| {
            vec![
                html_escape(&r.risk),
                format!(r#"<span class="sev-{0}">{0}</span>"#, r.severity),
                html_escape(&r.description),
                html_escape(&r.impact),
            ]
        })
        .collect();
    section(
        "Risk factors",
        table(&["Risk", "Severity", "Detail", "Impact"], rows),
    )
}

fn render_scenarios(g: &GrowthScenarios, ccy: &str) -> String {
    if g.scenarios.is_empty() {
        return String::new();
    }
    let rows = g
        .scenarios
        .iter()
        .map(|s| {
            vec![
                html_escape(&s.name),
                format!("{:.0}%", s.annual_growth_pct),
                money_f(s.projected_annual_revenue, ccy),
                html_escape(&s.key_actions.join(", ")),
            ]
        })
        .collect();
    section(
        "Growth scenarios",
        format!(
            "<p>Current annual run rate: <strong>{}</strong></p>{}",
            money_f(g.current_annual, ccy),
            table(&["Scenario", "Growth", "Projected revenue", "Key actions"], rows)
        ),
    )
}

fn render_recommendation(r: &Recommendation) -> String {
    let actions: String = r
        .actions
        .iter()
        .map(|a| format!("<li>{}</li>", html_escape(a)))
        .collect();
    format!(
        r#"<div class="rec prio-{prio}">
    <h3>{title} <span class="tag">{prio}</span></h3>
    <p class="meta">{category} &middot; {timeline}</p>
    <p>{desc}</p>
    <ul>{actions}</ul>
    <p class="meta">Expected: {impact}</p>
</div>"#,
        prio = r.priority,
        title = html_escape(&r.title),
        category = html_escape(&r.category),
        timeline = html_escape(&r.timeline),
        desc = html_escape(&r.description),
        actions = actions,
        impact = html_escape(&r.expected_impact),
    )
}

fn render_recommendations(recs: &[Recommendation]) -> String {
    section(
        "Recommendations",
        recs.iter().map(render_recommendation).collect(),
    )
}

fn render_action_plan(plan: &ActionPlan) -> String {
    let buckets: String = plan
        .buckets()
        .iter()
        .map(|(caption, recs)| {
            let li: String = recs
                .iter()
                .map(|r| format!("<li>{} <span class=\"tag\">{}</span></li>", html_escape(&r.title), r.priority))
                .collect();
            format!(
                r#"<div class="bucket"><h3>{}</h3><ul>{}</ul></div>"#,
                html_escape(caption),
                li
            )
        })
        .collect();
    let budget = table(
        &["Area", "Budget"],
        plan.budget
            .iter()
            .map(|(k, v)| vec![html_escape(k), html_escape(v)])
            .collect(),
    );
    let kpis: String = plan
        .kpis
        .iter()
        .map(|k| format!("<li>{}</li>", html_escape(k)))
        .collect();
    section(
        "Action plan",
        format!(
            r#"<div class="buckets">{buckets}</div><h3>Budget estimate</h3>{budget}<h3>KPIs to track</h3><ul>{kpis}</ul>"#
        ),
    )
}

fn render_simulator(s: &SummaryMetrics, ccy: &str) -> String {
    let data = json!({
        "revenue": to_f64(s.avg_revenue),
        "cost": to_f64(s.avg_cost),
        "currency": ccy,
    });
    section(
        "What-if simulator",
        format!(
            r#"<div class="simulator">
    <label>Revenue change <input type="range" id="sim-revenue" min="-50" max="50" value="0"> <span id="sim-revenue-label">0%</span></label>
    <label>Cost change <input type="range" id="sim-cost" min="-50" max="50" value="0"> <span id="sim-cost-label">0%</span></label>
    <div class="summary">
        <div class="summary-card"><h3>Monthly profit</h3><div class="value" id="sim-monthly"></div></div>
        <div class="summary-card"><h3>Annual profit</h3><div class="value" id="sim-annual"></div></div>
        <div class="summary-card"><h3>Margin</h3><div class="value" id="sim-margin"></div></div>
    </div>
</div>
<script>const SIM_BASE = {data};</script>"#,
            data = script_json(&data),
        ),
    )
}

fn simulator_javascript() -> &'static str {
    r#"
(function () {
    const rev = document.getElementById('sim-revenue');
    const cost = document.getElementById('sim-cost');
    if (!rev || !cost || typeof SIM_BASE === 'undefined') return;
    const fmt = (v) => Math.round(v).toLocaleString() + ' ' + SIM_BASE.currency;
    function update() {
        const r = SIM_BASE.revenue * (1 + rev.value / 100);
        const c = SIM_BASE.cost * (1 + cost.value / 100);
        const profit = r - c;
        document.getElementById('sim-revenue-label').textContent = rev.value + '%';
        document.getElementById('sim-cost-label').textContent = cost.value + '%';
        const monthly = document.getElementById('sim-monthly');
        monthly.textContent = fmt(profit);
        monthly.className = 'value ' + (profit < 0 ? 'negative' : 'positive');
        document.getElementById('sim-annual').textContent = fmt(profit * 12);
        document.getElementById('sim-margin').textContent =
            (r > 0 ? (profit / r * 100).toFixed(1) : '0.0') + '%';
    }
    rev.addEventListener('input', update);
    cost.addEventListener('input', update);
    update();
})();
"#
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: #111827;
    background: #f3f4f6;
}
.container { max-width: 1280px; margin: 0 auto; padding: 2rem; }
header { margin-bottom: 2rem; padding-bottom: 1rem; border-bottom: 2px solid #e5e7eb; }
header h1 { font-size: 2rem; font-weight: 700; }
.meta { color: #6b7280; font-size: 0.875rem; }
.summary {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 1rem;
    margin-bottom: 2rem;
}
.summary-card {
    background: #ffffff;
    padding: 1rem;
    border-radius: 0.5rem;
    border-left: 4px solid #2563eb;
}
.summary-card h3 { font-size: 0.8rem; font-weight: 600; color: #6b7280; }
.summary-card .value { font-size: 1.4rem; font-weight: 700; }
.positive { color: #16a34a; }
.negative { color: #dc2626; }
.section { margin-bottom: 2rem; background: #ffffff; padding: 1.5rem; border-radius: 0.5rem; }
.section h2 { font-size: 1.4rem; margin-bottom: 1rem; }
.section h3 { font-size: 1rem; margin: 0.75rem 0 0.5rem; }
.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
.chart { background: #ffffff; padding: 1rem; border-radius: 0.5rem; }
.plot { width: 100%; height: 360px; }
table { width: 100%; border-collapse: collapse; }
th { text-align: left; padding: 0.5rem; font-size: 0.8rem; color: #374151; border-bottom: 2px solid #e5e7eb; }
td { padding: 0.5rem; font-size: 0.85rem; border-bottom: 1px solid #e5e7eb; }
tbody tr:hover { background: #f9fafb; }
.buckets { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 1rem; }
.bucket ul, .section ul { padding-left: 1.25rem; }
.tag { display: inline-block; font-size: 0.7rem; padding: 0 0.4rem; border-radius: 0.25rem; background: #e5e7eb; color: #374151; }
.rec { border-left: 4px solid #9ca3af; padding: 0.5rem 1rem; margin-bottom: 1rem; }
.prio-critical { border-color: #dc2626; }
.prio-high { border-color: #f97316; }
.prio-medium { border-color: #2563eb; }
.sev-high { color: #dc2626; font-weight: 600; }
.sev-medium { color: #f97316; font-weight: 600; }
.sev-low { color: #16a34a; }
.ok { color: #16a34a; }
.simulator label { display: block; margin-bottom: 0.75rem; }
.simulator input[type=range] { width: 300px; vertical-align: middle; }
footer { color: #9ca3af; font-size: 0.8rem; text-align: center; margin-top: 2rem; }
"#
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn parses_variants() {
        assert_eq!("Strategic".parse::<ReportVariant>(), Ok(ReportVariant::Strategic));
        assert!("fancy".parse::<ReportVariant>().is_err());
    }
}
