// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::summarize;
use crate::config::AppConfig;
use crate::derive::{derive_records, validate};
use crate::error::Result;
use crate::forecast::{
    Forecast, GrowthScenarios, MonthlyPoint, RiskFactor, Seasonality, TrendAnalysis,
    analyze_trend, forecast, growth_scenarios, points_from_records, risk_factors, seasonality,
};
use crate::loader::load_periods;
use crate::models::{
    PeriodRecord, PeriodRow, RecoveryPlan, SavingsOpportunity, SummaryMetrics, ValidationIssue,
};
use crate::planner::{
    ActionPlan, ExecutiveSummary, PerformanceGap, Recommendation, action_plan, executive_summary,
    performance_gaps, recommendations, recovery_plan,
};
use crate::savings::find_savings;
use serde::Serialize;
use std::path::Path;

/// Everything computed for one input table. Every report variant renders a
/// subset of this.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub records: Vec<PeriodRecord>,
    pub issues: Vec<ValidationIssue>,
    pub summary: SummaryMetrics,
    pub savings: Vec<SavingsOpportunity>,
    pub recovery: RecoveryPlan,
    pub points: Vec<MonthlyPoint>,
    pub trend: Option<TrendAnalysis>,
    pub forecast: Forecast,
    pub seasonality: Option<Seasonality>,
    pub risks: Vec<RiskFactor>,
    pub scenarios: GrowthScenarios,
    pub gaps: Vec<PerformanceGap>,
    pub recommendations: Vec<Recommendation>,
    pub action_plan: ActionPlan,
    pub executive: ExecutiveSummary,
}

pub fn analyze(rows: Vec<PeriodRow>, cfg: &AppConfig) -> Result<Analysis> {
    let records = derive_records(rows);
    let issues = validate(&records, &cfg.validation);
    let summary = summarize(&records)?;
    let savings = find_savings(&records);
    let recovery = recovery_plan(&summary, &cfg.obligations, &cfg.currency);

    let points = points_from_records(&records);
    let trend = analyze_trend(&points);
    let forecast = forecast(&points, cfg.forecast.horizon);
    let seasonality = seasonality(&points);
    let risks = risk_factors(&points, Some((summary.loss_periods, summary.periods)));
    let scenarios = growth_scenarios(&points);
    let gaps = performance_gaps(&points, summary.margin);
    let recommendations = recommendations(trend.as_ref(), seasonality.as_ref(), &cfg.business_name);
    let action_plan = action_plan(&recommendations);
    let executive = executive_summary(trend.as_ref(), &forecast, &risks, &recommendations);

    Ok(Analysis {
        records,
        issues,
        summary,
        savings,
        recovery,
        points,
        trend,
        forecast,
        seasonality,
        risks,
        scenarios,
        gaps,
        recommendations,
        action_plan,
        executive,
    })
}

pub fn run_from_path(path: &Path, cfg: &AppConfig) -> Result<Analysis> {
    let rows = load_periods(path, &cfg.sheet)?;
    analyze(rows, cfg)
}
