// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use profitlens::config::AppConfig;
use profitlens::models::{PeriodFigures, PeriodRow};
use profitlens::pipeline::{Analysis, analyze};
use profitlens::render::{ReportBuilder, ReportVariant};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn analysis() -> Analysis {
    let revenues = [900, 1200, 800, 1500, 700, 1100, 950, 600];
    let rows = revenues
        .iter()
        .enumerate()
        .map(|(i, rev)| {
            let period = NaiveDate::from_ymd_opt(2024, i as u32 + 1, 1).unwrap();
            let cost = 850;
            PeriodRow {
                period,
                label: period.format("%b %Y").to_string(),
                figures: PeriodFigures {
                    net_revenue: Decimal::from(*rev),
                    net_cost: Decimal::from(cost),
                    reported_profit: Decimal::from(rev - cost),
                    avg_ticket: Decimal::from(40),
                    order_count: Decimal::from(rev / 40),
                    ..PeriodFigures::default()
                },
                missing: Vec::new(),
            }
        })
        .collect();
    let cfg = AppConfig {
        business_name: "<Bistro & Co>".into(),
        ..AppConfig::default()
    };
    analyze(rows, &cfg).unwrap()
}

fn render(variant: ReportVariant) -> String {
    ReportBuilder::new(variant)
        .business("<Bistro & Co>")
        .currency("PLN")
        .render(&analysis())
}

#[test]
fn standard_report_has_core_sections_and_escapes_text() {
    let html = render(ReportVariant::Standard);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("&lt;Bistro &amp; Co&gt;"));
    assert!(!html.contains("<Bistro & Co>"));
    for needle in [
        "chart-revenue-cost",
        "chart-profit",
        "chart-cost-breakdown",
        "chart-correlation",
        "Best and worst month",
        "Savings opportunities",
        "Recovery plan",
        "Monthly figures",
    ] {
        assert!(html.contains(needle), "missing {needle}");
    }
    assert!(!html.contains("Executive summary"));
    assert!(!html.contains("sim-revenue"));
}

#[test]
fn strategic_report_adds_forecast_and_plans() {
    let html = render(ReportVariant::Strategic);
    for needle in [
        "Executive summary",
        "chart-forecast",
        "Seasonality",
        "Risk factors",
        "Growth scenarios",
        "Recommendations",
        "Action plan",
        "Recovery plan",
    ] {
        assert!(html.contains(needle), "missing {needle}");
    }
    // the marketing recommendation names the business, escaped
    assert!(html.contains("Strengthen the &lt;Bistro &amp; Co&gt; brand"));
}

#[test]
fn dashboard_has_simulator_and_charts() {
    let html = render(ReportVariant::Dashboard);
    assert!(html.contains("id=\"sim-revenue\""));
    assert!(html.contains("id=\"sim-cost\""));
    assert!(html.contains("SIM_BASE"));
    assert!(html.contains("chart-profit"));
    assert!(!html.contains("Recovery plan"));
}

#[test]
fn custom_title_is_used() {
    let html = ReportBuilder::new(ReportVariant::Standard)
        .title("Q1 \"review\"")
        .render(&analysis());
    assert!(html.contains("<title>Q1 &quot;review&quot;</title>"));
}

#[test]
fn write_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested").join("deeper").join("report.html");
    ReportBuilder::new(ReportVariant::Standard)
        .write(&analysis(), &out)
        .unwrap();
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("Monthly figures"));
}

#[test]
fn analysis_carries_every_stage() {
    let a = analysis();
    assert_eq!(a.records.len(), 8);
    assert_eq!(a.summary.periods, 8);
    assert_eq!(a.forecast.points.len(), 6);
    assert!(a.seasonality.is_some());
    assert!(a.recovery.total_actions() >= 7);
    assert_eq!(a.action_plan.total_recommendations, a.recommendations.len());
}
