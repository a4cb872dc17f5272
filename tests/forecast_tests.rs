// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use profitlens::forecast::{
    Confidence, MAX_HORIZON, MonthlyPoint, Severity, TrendStrength, analyze_trend, forecast,
    growth_scenarios, risk_factors, seasonality,
};
use profitlens::models::Trend;
use profitlens::planner::{
    Priority, Situation, action_plan, executive_summary, performance_gaps, recommendations,
};
use rust_decimal::Decimal;

fn series(revenues: &[f64]) -> Vec<MonthlyPoint> {
    revenues
        .iter()
        .enumerate()
        .map(|(i, r)| MonthlyPoint {
            month: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .checked_add_months(chrono::Months::new(i as u32))
                .unwrap(),
            revenue: *r,
            orders: 10.0,
            avg_order_value: r / 10.0,
        })
        .collect()
}

#[test]
fn linear_series_forecasts_slope_plus_last() {
    let pts = series(&[100.0, 200.0, 300.0, 400.0]);
    let fc = forecast(&pts, 3);
    assert_eq!(fc.points.len(), 3);
    let first = &fc.points[0];
    assert!((first.revenue - 500.0).abs() < 1e-9);
    assert_eq!(first.orders, 10);
    assert_eq!(first.label, "May 2024");
    assert_eq!(first.confidence, Confidence::High);
    assert!((fc.total_revenue - (500.0 + 600.0 + 700.0)).abs() < 1e-9);
    assert_eq!(fc.span(), "May 2024 - Jul 2024");
}

#[test]
fn forecast_needs_three_points_and_clamps_at_zero() {
    assert!(forecast(&series(&[100.0, 200.0]), 6).is_empty());

    let falling = forecast(&series(&[300.0, 200.0, 100.0]), 8);
    assert_eq!(falling.points[1].revenue, 0.0);
    assert_eq!(falling.points[3].confidence, Confidence::Medium);
    assert_eq!(falling.points[7].confidence, Confidence::Low);
    assert!(falling.points.iter().all(|p| p.orders >= 1));
}

#[test]
fn forecast_horizon_is_capped() {
    let pts = series(&[100.0, 200.0, 300.0]);
    assert_eq!(forecast(&pts, usize::MAX).points.len(), MAX_HORIZON);
    assert!(forecast(&pts, 0).is_empty());
}

#[test]
fn forecast_applies_same_month_factor_with_enough_history() {
    // 13 months so next January has a historical match
    let mut revenues = vec![100.0; 13];
    revenues[0] = 200.0;
    revenues[12] = 200.0;
    let pts = series(&revenues);
    let fc = forecast(&pts, 1);
    let p = &fc.points[0];
    assert_eq!(p.month.month(), 2);
    // February only appears once with revenue 100
    let overall = revenues.iter().sum::<f64>() / 13.0;
    assert!((p.seasonal_factor - 100.0 / overall).abs() < 1e-9);
}

#[test]
fn trend_analysis_reports_direction_and_strength() {
    assert!(analyze_trend(&series(&[100.0, 110.0])).is_none());

    let t = analyze_trend(&series(&[100.0, 150.0, 200.0, 250.0])).unwrap();
    assert_eq!(t.direction, Trend::Up);
    assert!((t.revenue_slope - 50.0).abs() < 1e-9);
    // (250 - 100) / 4 / 100 * 100
    assert!((t.monthly_change_rate - 37.5).abs() < 1e-9);
    assert_eq!(t.strength, TrendStrength::Strong);

    let flat = analyze_trend(&series(&[100.0, 100.0, 100.0])).unwrap();
    assert_eq!(flat.direction, Trend::Down);
    assert_eq!(flat.strength, TrendStrength::Weak);
    assert_eq!(flat.volatility, 0.0);
}

#[test]
fn seasonality_picks_best_and_worst_months() {
    assert!(seasonality(&series(&[1.0; 5])).is_none());

    let s = seasonality(&series(&[10.0, 60.0, 30.0, 50.0, 20.0, 40.0])).unwrap();
    assert_eq!(s.pattern.len(), 6);
    let best: Vec<&str> = s.best.iter().map(|m| m.name.as_str()).collect();
    let worst: Vec<&str> = s.worst.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(best, vec!["February", "April", "June"]);
    assert_eq!(worst, vec!["January", "May", "March"]);
    // population variance of 10..60 step 10
    assert!((s.variance - 291.666_666_666_666_7).abs() < 1e-6);
}

#[test]
fn risk_factors_cover_each_rule() {
    let single = risk_factors(&series(&[100.0]), None);
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].severity, Severity::High);

    let pts = series(&[100.0, 300.0, 200.0, 120.0, 60.0]);
    let risks = risk_factors(&pts, Some((2, 5)));
    let names: Vec<&str> = risks.iter().map(|r| r.risk.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Falling revenue",
            "High revenue volatility",
            "Falling average ticket",
            "Frequent monthly losses",
        ]
    );

    let calm = risk_factors(&series(&[100.0, 101.0, 102.0]), Some((0, 3)));
    assert!(calm.is_empty());
}

#[test]
fn growth_scenarios_scale_the_run_rate() {
    let g = growth_scenarios(&series(&[100.0, 100.0, 100.0]));
    assert_eq!(g.current_annual, 1200.0);
    let projected: Vec<f64> = g.scenarios.iter().map(|s| s.projected_annual_revenue).collect();
    assert!((projected[0] - 1260.0).abs() < 1e-9);
    assert!((projected[1] - 1380.0).abs() < 1e-9);
    assert!((projected[2] - 1560.0).abs() < 1e-9);
    assert!(growth_scenarios(&series(&[1.0, 2.0])).scenarios.is_empty());
}

#[test]
fn falling_business_gets_a_rescue_plan() {
    let pts = series(&[400.0, 350.0, 300.0, 250.0, 200.0, 150.0]);
    let trend = analyze_trend(&pts);
    let season = seasonality(&pts);
    let recs = recommendations(trend.as_ref(), season.as_ref(), "Bistro");
    assert_eq!(recs.len(), 5);
    assert_eq!(recs[0].priority, Priority::Critical);
    assert!(recs[1].description.contains("June, May"));
    assert!(recs[4].title.contains("Bistro"));

    let plan = action_plan(&recs);
    assert_eq!(plan.month_1.len(), 1);
    assert_eq!(plan.months_2_3.len(), 1);
    assert_eq!(plan.months_2_3[0].title, "Raise the average ticket");
    assert_eq!(plan.quarters_2_4.len(), 3);
    assert_eq!(plan.critical_actions, 1);
    // priority order inside the long-term bucket
    assert_eq!(plan.quarters_2_4[0].priority, Priority::High);

    let fc = forecast(&pts, 6);
    let risks = risk_factors(&pts, None);
    let summary = executive_summary(trend.as_ref(), &fc, &risks, &recs);
    assert_eq!(summary.situation, Situation::RequiresIntervention);
    assert_eq!(summary.critical_recommendations, 1);
    assert_eq!(summary.high_priority_recommendations, 2);
    assert_eq!(summary.focus_areas[0], "Stabilize revenue");
}

#[test]
fn growing_and_stable_situations() {
    let growing = series(&[100.0, 150.0, 200.0]);
    let t = analyze_trend(&growing);
    let s = executive_summary(t.as_ref(), &forecast(&growing, 3), &[], &[]);
    assert_eq!(s.situation, Situation::Growing);

    let slow = series(&[100.0, 101.0, 102.0]);
    let t = analyze_trend(&slow);
    let s = executive_summary(t.as_ref(), &forecast(&slow, 3), &[], &[]);
    assert_eq!(s.situation, Situation::Stable);
}

#[test]
fn performance_gaps_use_fixed_benchmarks() {
    let pts = series(&[1000.0, 2000.0, 1000.0]);
    let gaps = performance_gaps(&pts, Decimal::from(10));
    let names: Vec<&str> = gaps.iter().map(|g| g.gap.as_str()).collect();
    assert_eq!(
        names,
        vec!["Low average ticket", "High revenue volatility", "Low profit margin"]
    );
    assert_eq!(gaps[0].target_value, 280.0);

    let healthy = series(&[3000.0, 3000.0, 3000.0]);
    assert!(performance_gaps(&healthy, Decimal::from(25)).is_empty());
}
