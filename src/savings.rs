// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Threshold heuristics that point at cost lines worth a second look.
//!
//! Each rule stands alone: rules may overlap and are reported in evaluation
//! order, not by size of the estimate.

use crate::models::{Field, PeriodRecord, SavingsOpportunity};
use crate::stats::mean_dec;
use rust_decimal::Decimal;
use tracing::info;

/// How the excess over the mean is turned into a yearly figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    /// `(outlier_mean - mean) * outlier_count`
    PerOutlier,
    /// `(outlier_mean - mean) * share * 12`
    AnnualShare(Decimal),
}

#[derive(Debug, Clone)]
pub enum Rule {
    Outlier {
        field: Field,
        /// Rows above `mean * threshold` are outliers.
        threshold: Decimal,
        estimate: Estimate,
        category: &'static str,
        description: &'static str,
        action: &'static str,
    },
    /// Revenue side: a 10% lift of the average ticket across all orders.
    Upsell,
}

fn dec(units: i64, scale: u32) -> Decimal {
    Decimal::new(units, scale)
}

pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::Outlier {
            field: Field::SocialContribution,
            threshold: dec(13, 1),
            estimate: Estimate::PerOutlier,
            category: "Social contributions",
            description: "High social contribution payments in some months",
            action: "Check eligibility for reduced contributions or optimize the contribution base",
        },
        Rule::Outlier {
            field: Field::StaffCost,
            threshold: dec(15, 1),
            estimate: Estimate::AnnualShare(dec(2, 1)),
            category: "Staff costs",
            description: "Large swings in staff costs",
            action: "Review staffing: outsourcing or part-time roles",
        },
        Rule::Outlier {
            field: Field::NetCost,
            threshold: dec(15, 1),
            estimate: Estimate::AnnualShare(dec(15, 2)),
            category: "Net costs (main costs)",
            description: "{n} months with costs above 150% of the average",
            action: "Renegotiate supplier contracts, bulk pricing",
        },
        Rule::Upsell,
    ]
}

pub fn find_savings(records: &[PeriodRecord]) -> Vec<SavingsOpportunity> {
    find_savings_with(records, &default_rules())
}

pub fn find_savings_with(records: &[PeriodRecord], rules: &[Rule]) -> Vec<SavingsOpportunity> {
    let found: Vec<SavingsOpportunity> = rules
        .iter()
        .filter_map(|rule| apply_rule(records, rule))
        .collect();
    let total: Decimal = found.iter().map(|s| s.estimated_annual).sum();
    info!(
        opportunities = found.len(),
        total_annual = %total.round_dp(0),
        "savings scan finished"
    );
    found
}

fn apply_rule(records: &[PeriodRecord], rule: &Rule) -> Option<SavingsOpportunity> {
    match rule {
        Rule::Outlier {
            field,
            threshold,
            estimate,
            category,
            description,
            action,
        } => {
            let values: Vec<Decimal> = records.iter().map(|r| r.value(*field)).collect();
            let avg = mean_dec(&values);
            let limit = avg * threshold;
            let outliers: Vec<Decimal> = values.into_iter().filter(|v| *v > limit).collect();
            if outliers.is_empty() {
                return None;
            }
            let excess = mean_dec(&outliers) - avg;
            let estimated_annual = match estimate {
                Estimate::PerOutlier => excess * Decimal::from(outliers.len()),
                Estimate::AnnualShare(share) => excess * share * Decimal::from(12),
            };
            Some(SavingsOpportunity {
                category: category.to_string(),
                description: description.replace("{n}", &outliers.len().to_string()),
                estimated_annual,
                action: action.to_string(),
            })
        }
        Rule::Upsell => {
            let tickets: Vec<Decimal> = records.iter().map(|r| r.figures.avg_ticket).collect();
            let avg_ticket = mean_dec(&tickets);
            if avg_ticket <= Decimal::ZERO {
                return None;
            }
            let orders: Decimal = records.iter().map(|r| r.figures.order_count).sum();
            Some(SavingsOpportunity {
                category: "Revenue optimization".to_string(),
                description: "Raise the average ticket by 10%".to_string(),
                estimated_annual: avg_ticket * dec(1, 1) * orders,
                action: "Upselling, cross-selling, bundles".to_string(),
            })
        }
    }
}
