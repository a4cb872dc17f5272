// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric columns of the monthly cost table, in sheet order (the period column
/// comes first and is not a `Field`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    GrossRevenue,
    NetRevenue,
    RevenueVat,
    GrossCost,
    NetCost,
    CostVat,
    SocialContribution,
    IncomeTax,
    StaffCost,
    ReportedProfit,
    AvgTicket,
    OrderCount,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::GrossRevenue,
        Field::NetRevenue,
        Field::RevenueVat,
        Field::GrossCost,
        Field::NetCost,
        Field::CostVat,
        Field::SocialContribution,
        Field::IncomeTax,
        Field::StaffCost,
        Field::ReportedProfit,
        Field::AvgTicket,
        Field::OrderCount,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::GrossRevenue => "gross_revenue",
            Field::NetRevenue => "net_revenue",
            Field::RevenueVat => "revenue_vat",
            Field::GrossCost => "gross_cost",
            Field::NetCost => "net_cost",
            Field::CostVat => "cost_vat",
            Field::SocialContribution => "social_contribution",
            Field::IncomeTax => "income_tax",
            Field::StaffCost => "staff_cost",
            Field::ReportedProfit => "reported_profit",
            Field::AvgTicket => "avg_ticket",
            Field::OrderCount => "order_count",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::GrossRevenue => "Gross revenue",
            Field::NetRevenue => "Net revenue",
            Field::RevenueVat => "Revenue VAT",
            Field::GrossCost => "Gross costs",
            Field::NetCost => "Net costs",
            Field::CostVat => "Cost VAT",
            Field::SocialContribution => "Social contributions",
            Field::IncomeTax => "Income tax",
            Field::StaffCost => "Staff costs",
            Field::ReportedProfit => "Profit",
            Field::AvgTicket => "Average ticket",
            Field::OrderCount => "Orders",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodFigures {
    pub gross_revenue: Decimal,
    pub net_revenue: Decimal,
    pub revenue_vat: Decimal,
    pub gross_cost: Decimal,
    pub net_cost: Decimal,
    pub cost_vat: Decimal,
    pub social_contribution: Decimal,
    pub income_tax: Decimal,
    pub staff_cost: Decimal,
    pub reported_profit: Decimal,
    pub avg_ticket: Decimal,
    pub order_count: Decimal,
}

impl PeriodFigures {
    pub fn get(&self, field: Field) -> Decimal {
        match field {
            Field::GrossRevenue => self.gross_revenue,
            Field::NetRevenue => self.net_revenue,
            Field::RevenueVat => self.revenue_vat,
            Field::GrossCost => self.gross_cost,
            Field::NetCost => self.net_cost,
            Field::CostVat => self.cost_vat,
            Field::SocialContribution => self.social_contribution,
            Field::IncomeTax => self.income_tax,
            Field::StaffCost => self.staff_cost,
            Field::ReportedProfit => self.reported_profit,
            Field::AvgTicket => self.avg_ticket,
            Field::OrderCount => self.order_count,
        }
    }

    pub fn set(&mut self, field: Field, value: Decimal) {
        let slot = match field {
            Field::GrossRevenue => &mut self.gross_revenue,
            Field::NetRevenue => &mut self.net_revenue,
            Field::RevenueVat => &mut self.revenue_vat,
            Field::GrossCost => &mut self.gross_cost,
            Field::NetCost => &mut self.net_cost,
            Field::CostVat => &mut self.cost_vat,
            Field::SocialContribution => &mut self.social_contribution,
            Field::IncomeTax => &mut self.income_tax,
            Field::StaffCost => &mut self.staff_cost,
            Field::ReportedProfit => &mut self.reported_profit,
            Field::AvgTicket => &mut self.avg_ticket,
            Field::OrderCount => &mut self.order_count,
        };
        *slot = value;
    }
}

/// One period as read from the sheet, before derived columns exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    pub period: NaiveDate,
    pub label: String,
    pub figures: PeriodFigures,
    /// Fields whose cell was empty; they hold zero in `figures`.
    pub missing: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: NaiveDate,
    pub label: String,
    #[serde(flatten)]
    pub figures: PeriodFigures,
    pub total_cost: Decimal,
    pub computed_profit: Decimal,
    pub discrepancy: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<Field>,
}

impl PeriodRecord {
    pub fn value(&self, field: Field) -> Decimal {
        self.figures.get(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingValue,
    NegativeRevenue,
    CostOutlier,
    ProfitDiscrepancy,
    EmptyTable,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueKind::MissingValue => "missing_value",
            IssueKind::NegativeRevenue => "negative_revenue",
            IssueKind::CostOutlier => "cost_outlier",
            IssueKind::ProfitDiscrepancy => "profit_discrepancy",
            IssueKind::EmptyTable => "empty_table",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub period: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::InsufficientData => "insufficient_data",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodHighlight {
    pub period: String,
    pub profit: Decimal,
    pub revenue: Decimal,
    pub costs: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub net_cost: Decimal,
    pub social_contribution: Decimal,
    pub income_tax: Decimal,
    pub staff_cost: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakevenStatus {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakeven {
    pub monthly_breakeven: Decimal,
    pub current_revenue: Decimal,
    pub gap: Decimal,
    pub status: BreakevenStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub periods: usize,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    pub avg_revenue: Decimal,
    pub avg_cost: Decimal,
    pub avg_profit: Decimal,
    /// Profit as a percentage of net revenue.
    pub margin: Decimal,
    pub profitable_periods: usize,
    pub loss_periods: usize,
    pub zero_profit_periods: usize,
    pub best: PeriodHighlight,
    pub worst: PeriodHighlight,
    pub trend: Trend,
    pub cost_breakdown: CostBreakdown,
    pub breakeven: Option<Breakeven>,
    pub max_discrepancy: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsOpportunity {
    pub category: String,
    pub description: String,
    pub estimated_annual: Decimal,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub action: String,
    pub description: String,
    pub impact: String,
    pub effort: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPlan {
    pub immediate: Vec<ActionItem>,
    pub short_term: Vec<ActionItem>,
    pub medium_term: Vec<ActionItem>,
    pub long_term: Vec<ActionItem>,
}

impl RecoveryPlan {
    pub fn total_actions(&self) -> usize {
        self.immediate.len() + self.short_term.len() + self.medium_term.len() + self.long_term.len()
    }

    /// Buckets in display order with their timeframe captions.
    pub fn buckets(&self) -> [(&'static str, &[ActionItem]); 4] {
        [
            ("Immediate (0-30 days)", &self.immediate),
            ("Short term (1-3 months)", &self.short_term),
            ("Medium term (3-6 months)", &self.medium_term),
            ("Long term (6-12 months)", &self.long_term),
        ]
    }
}
