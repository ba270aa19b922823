//! Simulation output: the month-by-month schedule and payoff summaries

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::debt::Strategy;
use super::ids::DebtId;
use super::money::Money;

/// One simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month number
    pub month_index: u32,
    pub date: Date,
    /// Sum of all balances after this month's payments
    pub aggregate_remaining_balance: Money,
    pub total_payment_this_month: Money,
    /// Interest charged this month across all debts
    pub interest_portion: Money,
    /// Payment applied to principal this month
    pub principal_portion: Money,
    /// Interest the minimum payment did not cover, added to principal owed
    pub capitalized_interest: Money,
    /// Debts still carrying a balance after this month
    pub active_debt_count: usize,
    pub debts_completed_this_month: Vec<DebtId>,
}

/// Ordered schedule, month 1..N
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub(crate) fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ScheduleEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter()
    }

    pub fn total_interest(&self) -> Decimal {
        self.entries.iter().map(|e| e.interest_portion.amount()).sum()
    }

    pub fn total_principal(&self) -> Decimal {
        self.entries.iter().map(|e| e.principal_portion.amount()).sum()
    }

    pub fn total_payments(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| e.total_payment_this_month.amount())
            .sum()
    }

    pub fn total_capitalized_interest(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| e.capitalized_interest.amount())
            .sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// When and at what interest cost a single debt was retired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub debt_id: DebtId,
    pub name: String,
    pub month_index: u32,
    pub date: Date,
    pub interest_paid: Money,
}

/// Complete result of one successful simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub strategy: Strategy,
    pub extra_payment: Money,
    pub schedule: Schedule,
    pub payoff_months: u32,
    pub payoff_date: Date,
    pub total_interest: Money,
    pub total_payments: Money,
    /// Sum of all starting balances
    pub original_balance: Money,
    /// Per-debt payoff summary, in payoff order
    pub debt_payoffs: Vec<DebtPayoff>,
}

impl PayoffResult {
    /// Month of the first debt payoff ("first win")
    pub fn first_payoff_month(&self) -> Option<u32> {
        self.debt_payoffs.first().map(|p| p.month_index)
    }
}
