//! Debt account snapshots and payoff strategies

use std::fmt;

use jiff::Timestamp;
use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::DebtId;
use super::money::{Currency, Money, Percentage, round_storage};

/// Category of a debt account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebtType {
    CreditCard,
    StudentLoan,
    Mortgage,
    AutoLoan,
    PersonalLoan,
    HomeEquityLoan,
    MedicalDebt,
    Other,
}

impl fmt::Display for DebtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtType::CreditCard => "Credit Card",
            DebtType::StudentLoan => "Student Loan",
            DebtType::Mortgage => "Mortgage",
            DebtType::AutoLoan => "Auto Loan",
            DebtType::PersonalLoan => "Personal Loan",
            DebtType::HomeEquityLoan => "Home Equity Loan",
            DebtType::MedicalDebt => "Medical Debt",
            DebtType::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Immutable snapshot of one debt's terms
///
/// Created by the account-sync collaborator; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    pub id: DebtId,
    pub name: String,
    pub debt_type: DebtType,
    pub balance: Money,
    /// Annual percentage rate
    pub interest_rate: Percentage,
    pub minimum_payment: Money,
    #[serde(default)]
    pub credit_limit: Option<Money>,
    #[serde(default)]
    pub due_date: Option<Date>,
    #[serde(default)]
    pub last_payment_date: Option<Date>,
    #[serde(default)]
    pub last_payment_amount: Option<Money>,
    pub created_at: Timestamp,
}

impl DebtAccount {
    pub fn currency(&self) -> Currency {
        self.balance.currency()
    }

    /// Balance divided by credit limit, as a fraction
    ///
    /// `None` when there is no limit or the limit is zero.
    pub fn utilization(&self) -> Option<Decimal> {
        self.credit_limit
            .filter(|limit| !limit.is_zero())
            .map(|limit| self.balance.amount() / limit.amount())
    }

    /// Interest accrued on the current balance over one month
    pub fn monthly_interest_charge(&self) -> Money {
        self.balance.scale(self.interest_rate.monthly_rate())
    }

    /// Share of the minimum payment that reduces principal in the first month
    ///
    /// Negative when the minimum does not cover the interest.
    pub fn payment_to_principal_ratio(&self) -> Decimal {
        if self.minimum_payment.is_zero() {
            return Decimal::ZERO;
        }
        let principal = self.minimum_payment.amount() - self.monthly_interest_charge().amount();
        round_storage(principal / self.minimum_payment.amount())
    }

    /// Whether the minimum payment alone reduces the balance
    pub fn amortizes(&self) -> bool {
        self.balance.is_zero()
            || self.minimum_payment.amount() > self.monthly_interest_charge().amount()
    }

    /// Whether the creditor is typically open to negotiating this debt
    pub fn qualifies_for_negotiation(&self) -> bool {
        match self.debt_type {
            DebtType::CreditCard => self.balance.amount() > dec!(1000),
            DebtType::MedicalDebt => true,
            DebtType::PersonalLoan => self.balance.amount() > dec!(5000),
            _ => false,
        }
    }
}

/// Extra-payment prioritization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Highest interest rate first
    Avalanche,
    /// Lowest balance first
    Snowball,
    /// Caller-supplied priority weights
    Custom,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Avalanche => write!(f, "Avalanche"),
            Strategy::Snowball => write!(f, "Snowball"),
            Strategy::Custom => write!(f, "Custom"),
        }
    }
}

/// Priority weights for the custom strategy (higher weight is paid first)
///
/// Debts without a weight rank as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub weights: FxHashMap<DebtId, Decimal>,
}

impl PriorityWeights {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, debt_id: DebtId, weight: Decimal) -> Self {
        self.weights.insert(debt_id, weight);
        self
    }

    pub fn weight(&self, debt_id: DebtId) -> Decimal {
        self.weights.get(&debt_id).copied().unwrap_or(Decimal::ZERO)
    }
}
