//! Consolidation products and the opportunities derived from them

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{Money, Percentage};

/// Kind of alternative financing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsolidationType {
    PersonalLoan,
    BalanceTransfer,
    HomeEquityLoan,
    DebtManagementPlan,
    RefinancingProgram,
}

impl fmt::Display for ConsolidationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConsolidationType::PersonalLoan => "Personal Loan",
            ConsolidationType::BalanceTransfer => "Balance Transfer",
            ConsolidationType::HomeEquityLoan => "Home Equity Loan",
            ConsolidationType::DebtManagementPlan => "Debt Management Plan",
            ConsolidationType::RefinancingProgram => "Refinancing Program",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// A financing offer to evaluate against the current debt set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationProduct {
    pub consolidation_type: ConsolidationType,
    /// Rate after any introductory period
    pub interest_rate: Percentage,
    pub term_months: u32,
    /// Introductory rate and its length in months (balance transfers)
    #[serde(default)]
    pub intro_rate: Option<(Percentage, u32)>,
    /// One-time fee as a percentage of the consolidated balance
    #[serde(default)]
    pub fee_percentage: Percentage,
}

/// Borrower facts used for eligibility scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub credit_score: u32,
    pub annual_income: Decimal,
}

/// Advantages, disadvantages, and the overall recommendation for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationAnalysis {
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    /// 0..=100
    pub recommendation_score: Decimal,
    pub risk_assessment: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationOpportunity {
    pub consolidation_type: ConsolidationType,
    pub consolidated_balance: Money,
    pub new_interest_rate: Percentage,
    pub new_monthly_payment: Money,
    /// Negative when consolidating costs more than the minimum-only baseline
    pub total_interest_savings: Money,
    /// Negative when consolidating takes longer than the baseline
    pub time_savings_months: i64,
    pub eligibility_requirements: Vec<String>,
    pub pros_and_cons: ConsolidationAnalysis,
}
