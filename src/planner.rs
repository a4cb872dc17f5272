// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns computed metrics into plans: the recovery plan shown in every report
//! and the recommendation set of the strategic report.

use crate::config::Obligation;
use crate::forecast::{
    Forecast, MonthlyPoint, RiskFactor, Seasonality, Severity, TrendAnalysis, TrendStrength,
};
use crate::models::{ActionItem, RecoveryPlan, SummaryMetrics, Trend};
use crate::stats::{coefficient_of_variation, mean};
use crate::utils::{fmt_money, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

fn item(action: &str, description: String, impact: &str, effort: &str) -> ActionItem {
    ActionItem {
        action: action.to_string(),
        description,
        impact: impact.to_string(),
        effort: effort.to_string(),
    }
}

pub fn recovery_plan(
    summary: &SummaryMetrics,
    obligations: &[Obligation],
    currency: &str,
) -> RecoveryPlan {
    let mut plan = RecoveryPlan::default();

    if summary.loss_periods > 0 {
        plan.immediate.push(item(
            "Analyze loss months",
            format!(
                "{} months ended with a loss; identify the causes",
                summary.loss_periods
            ),
            "High",
            "Low",
        ));
    }
    let cash_check = if obligations.is_empty() {
        "Check upcoming liabilities against cash on hand".to_string()
    } else {
        let listed: Vec<String> = obligations
            .iter()
            .map(|o| format!("{} ({})", o.name, fmt_money(&o.amount, currency)))
            .collect();
        format!("Check outstanding liabilities: {}", listed.join(", "))
    };
    plan.immediate
        .push(item("Cash flow emergency check", cash_check, "Critical", "Low"));

    if summary.margin < Decimal::from(20) {
        plan.short_term.push(item(
            "Cut costs by 10%",
            "Renegotiate contracts, eliminate waste".to_string(),
            "High",
            "Medium",
        ));
    }
    plan.short_term.push(item(
        "Raise the average ticket",
        "Upselling and cross-selling, target +10% on the average ticket".to_string(),
        "Medium",
        "Low",
    ));

    plan.medium_term.push(item(
        "Staffing optimization",
        "Review staff costs: outsourcing, automation".to_string(),
        "High",
        "High",
    ));
    plan.medium_term.push(item(
        "Restructure social contributions",
        "Agree an instalment plan for contribution arrears".to_string(),
        "Medium",
        "Medium",
    ));

    plan.long_term.push(item(
        "Diversify revenue",
        "New revenue streams, premium products".to_string(),
        "High",
        "High",
    ));
    plan.long_term.push(item(
        "Tax optimization",
        "Review the tax structure with an advisor".to_string(),
        "Medium",
        "Medium",
    ));

    info!(actions = plan.total_actions(), "recovery plan ready");
    plan
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceGap {
    pub gap: String,
    pub current_value: f64,
    pub target_value: f64,
    pub potential_impact: String,
    pub priority: Priority,
}

pub fn performance_gaps(points: &[MonthlyPoint], margin: Decimal) -> Vec<PerformanceGap> {
    let mut gaps = Vec::new();
    if points.is_empty() {
        return gaps;
    }
    let aov = mean(&points.iter().map(|p| p.avg_order_value).collect::<Vec<_>>());
    if aov < 250.0 {
        gaps.push(PerformanceGap {
            gap: "Low average ticket".into(),
            current_value: aov,
            target_value: 280.0,
            potential_impact: "Revenue up 12-15%".into(),
            priority: Priority::High,
        });
    }
    let cv = coefficient_of_variation(&points.iter().map(|p| p.revenue).collect::<Vec<_>>());
    if cv > 0.15 {
        gaps.push(PerformanceGap {
            gap: "High revenue volatility".into(),
            current_value: cv,
            target_value: 0.10,
            potential_impact: "More predictable cash flow".into(),
            priority: Priority::Medium,
        });
    }
    let margin = to_f64(margin);
    if margin < 15.0 {
        gaps.push(PerformanceGap {
            gap: "Low profit margin".into(),
            current_value: margin,
            target_value: 20.0,
            potential_impact: "Better financial stability".into(),
            priority: Priority::High,
        });
    }
    gaps
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub title: String,
    pub description: String,
    pub actions: Vec<String>,
    pub timeline: String,
    pub expected_impact: String,
    pub priority: Priority,
}

fn rec(
    category: &str,
    title: String,
    description: String,
    actions: &[&str],
    timeline: &str,
    expected_impact: &str,
    priority: Priority,
) -> Recommendation {
    Recommendation {
        category: category.to_string(),
        title,
        description,
        actions: actions.iter().map(|a| a.to_string()).collect(),
        timeline: timeline.to_string(),
        expected_impact: expected_impact.to_string(),
        priority,
    }
}

pub fn recommendations(
    trend: Option<&TrendAnalysis>,
    seasonality: Option<&Seasonality>,
    business_name: &str,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if trend.is_some_and(|t| t.direction == Trend::Down) {
        out.push(rec(
            "Reverse the decline",
            "Revenue rescue programme".into(),
            "Immediate steps to stop the decline".into(),
            &[
                "Competitive review: what are nearby competitors doing?",
                "Customer satisfaction survey (NPS)",
                "Compare menu and prices with competitors",
                "Win-back campaign for regular customers",
                "Short-term promotions to lift traffic",
            ],
            "1-2 months",
            "Decline stopped, revenue stable at the current level",
            Priority::Critical,
        ));
    }

    if let Some(s) = seasonality {
        let weakest: Vec<&str> = s.worst.iter().take(2).map(|m| m.name.as_str()).collect();
        out.push(rec(
            "Seasonal strategy",
            "Weak-month programme".into(),
            format!("Targeted activity in {}", weakest.join(", ")),
            &[
                "Themed events in weak months",
                "Seasonal menu from local produce",
                "Catering partnerships with hotels",
                "Offers for business groups",
                "Company parties and private events",
            ],
            "Before the weak season",
            "15-25% more revenue in weak months",
            Priority::High,
        ));
    }

    out.push(rec(
        "Average ticket growth",
        "Raise the average ticket".into(),
        "Upselling and cross-selling".into(),
        &[
            "Train staff to suggest add-ons",
            "Tasting menu with wine pairing",
            "Premium desserts and specialty coffee",
            "Business packages",
            "Loyalty programme with spending tiers",
        ],
        "2-3 months to implement",
        "Average ticket up by 20-30",
        Priority::High,
    ));
    out.push(rec(
        "Operational efficiency",
        "Improve cost efficiency".into(),
        "Manage costs without losing quality".into(),
        &[
            "Ingredient cost vs dish margin review",
            "Renegotiate supplier contracts",
            "Demand-based staff scheduling",
            "Cut waste through better forecasting",
            "Energy management",
        ],
        "3-6 months",
        "Costs down 5-8%",
        Priority::Medium,
    ));
    out.push(rec(
        "Marketing and positioning",
        format!("Strengthen the {} brand", business_name),
        "Build on what makes the venue unique".into(),
        &[
            "Content marketing on social media",
            "Partnerships with lifestyle and travel creators",
            "Business and networking events",
            "Cooperation with local tour guides",
        ],
        "Ongoing, 6-12 months",
        "Better recognition and more customers",
        Priority::Medium,
    ));
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub month_1: Vec<Recommendation>,
    pub months_2_3: Vec<Recommendation>,
    pub quarters_2_4: Vec<Recommendation>,
    pub budget: Vec<(String, String)>,
    pub kpis: Vec<String>,
    pub total_recommendations: usize,
    pub critical_actions: usize,
}

impl ActionPlan {
    pub fn buckets(&self) -> [(&'static str, &[Recommendation]); 3] {
        [
            ("Month 1 (immediate)", &self.month_1),
            ("Months 2-3 (short term)", &self.months_2_3),
            ("Quarters 2-4 (long term)", &self.quarters_2_4),
        ]
    }
}

pub fn action_plan(recs: &[Recommendation]) -> ActionPlan {
    let mut sorted = recs.to_vec();
    // stable: equal priorities keep their order
    sorted.sort_by_key(|r| r.priority);

    let mut plan = ActionPlan::default();
    for r in sorted {
        let timeline = r.timeline.to_lowercase();
        if r.priority == Priority::Critical || timeline.contains("immediate") {
            plan.month_1.push(r);
        } else if timeline.contains("1-2 month") || timeline.contains("2-3 month") {
            plan.months_2_3.push(r);
        } else {
            plan.quarters_2_4.push(r);
        }
    }
    plan.budget = [
        ("Marketing and promotion", "15,000 - 25,000 per month"),
        ("Staff training", "5,000 - 8,000 one-off"),
        ("Operational upgrades", "20,000 - 40,000 one-off"),
        ("Events and partnerships", "10,000 - 15,000 per month"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    plan.kpis = [
        "Monthly revenue",
        "Average ticket",
        "Customers per month",
        "Profit margin",
        "Net Promoter Score (NPS)",
        "Seat occupancy",
        "Cost per acquisition",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    plan.total_recommendations = recs.len();
    plan.critical_actions = recs
        .iter()
        .filter(|r| r.priority == Priority::Critical)
        .count();
    plan
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    RequiresIntervention,
    Growing,
    Stable,
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Situation::RequiresIntervention => "requires_intervention",
            Situation::Growing => "growing",
            Situation::Stable => "stable",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub situation: Situation,
    pub trend_direction: Trend,
    pub trend_strength: Option<TrendStrength>,
    pub forecast_revenue: f64,
    pub forecast_span: String,
    pub high_risks: usize,
    pub critical_recommendations: usize,
    pub high_priority_recommendations: usize,
    pub focus_areas: Vec<String>,
}

pub fn executive_summary(
    trend: Option<&TrendAnalysis>,
    forecast: &Forecast,
    risks: &[RiskFactor],
    recs: &[Recommendation],
) -> ExecutiveSummary {
    let situation = match trend {
        Some(t) if t.direction == Trend::Down => Situation::RequiresIntervention,
        Some(t) if t.monthly_change_rate > 5.0 => Situation::Growing,
        _ => Situation::Stable,
    };
    let first_focus = if situation == Situation::RequiresIntervention {
        "Stabilize revenue"
    } else {
        "Growth and expansion"
    };
    ExecutiveSummary {
        situation,
        trend_direction: trend.map_or(Trend::InsufficientData, |t| t.direction),
        trend_strength: trend.map(|t| t.strength),
        forecast_revenue: forecast.total_revenue,
        forecast_span: forecast.span(),
        high_risks: risks.iter().filter(|r| r.severity == Severity::High).count(),
        critical_recommendations: recs
            .iter()
            .filter(|r| r.priority == Priority::Critical)
            .count(),
        high_priority_recommendations: recs
            .iter()
            .filter(|r| r.priority == Priority::High)
            .count(),
        focus_areas: [
            first_focus,
            "Average ticket optimization",
            "Seasonality management",
            "Competitive position",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }
}
