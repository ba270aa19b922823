//! YAML plan files
//!
//! A plan file holds everything one run needs:
//!
//! ```yaml
//! currency: USD
//! start_date: 2025-01-01
//! strategy: Avalanche
//! extra_payment: 250
//! profile:
//!   credit_score: 720
//!   annual_income: 85000
//! debts:
//!   - name: Visa
//!     type: CreditCard
//!     balance: 5000
//!     apr: 19.99
//!     minimum_payment: 150
//!   - name: Car
//!     type: AutoLoan
//!     balance: 12000
//!     apr: 6.5
//!     minimum_payment: 320
//! ```
//!
//! Debts are listed by name; ids are assigned in file order.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use debtplan_core::config::{DebtBuilder, PlanBuilder, PlanMetadata, SimulationConfig};
use debtplan_core::model::{
    ConsolidationProduct, Currency, DebtAccount, DebtType, Money, Strategy, UserProfile,
};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_strategy() -> Strategy {
    Strategy::Avalanche
}

fn default_debt_type() -> DebtType {
    DebtType::Other
}

/// Top-level plan file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(default)]
    pub currency: Currency,

    /// Month 0 of the schedule; defaults to today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    #[serde(default = "default_strategy")]
    pub strategy: Strategy,

    /// Monthly payment on top of all minimums
    #[serde(default)]
    pub extra_payment: Decimal,

    #[serde(default)]
    pub rollover_freed_minimums: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_months: Option<u32>,

    /// Needed by `consolidate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,

    /// Offers to score; the standard catalogue is used when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<ConsolidationProduct>,

    pub debts: Vec<DebtData>,
}

/// One debt in human-readable form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtData {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default = "default_debt_type")]
    pub debt_type: DebtType,

    pub balance: Decimal,

    /// Annual percentage rate, e.g. 19.99
    pub apr: Decimal,

    pub minimum_payment: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Date>,

    /// Priority under the custom strategy (higher is paid first)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
}

/// A plan file resolved into engine inputs
#[derive(Debug, Clone)]
pub struct Plan {
    pub debts: Vec<DebtAccount>,
    pub config: SimulationConfig,
    pub metadata: PlanMetadata,
    pub currency: Currency,
    pub strategy: Strategy,
    pub extra_payment: Decimal,
    pub profile: Option<UserProfile>,
    pub products: Vec<ConsolidationProduct>,
}

impl PlanFile {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Read and parse a plan file from disk
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read plan file {}", path.display()))?;
        let plan = Self::from_yaml(&text)
            .map_err(|e| eyre!("failed to parse plan file {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), debts = plan.debts.len(), "plan loaded");
        Ok(plan)
    }

    /// Resolve into engine inputs, using `today` when no start date is set
    pub fn into_plan(self, today: Date) -> Plan {
        let mut builder = PlanBuilder::new()
            .currency(self.currency)
            .start_date(self.start_date.unwrap_or(today))
            .rollover_freed_minimums(self.rollover_freed_minimums);
        if let Some(months) = self.max_months {
            builder = builder.max_months(months);
        }

        for debt in self.debts {
            let mut debt_builder = DebtBuilder::new(debt.name.clone(), debt.debt_type)
                .balance(debt.balance)
                .apr(debt.apr)
                .minimum_payment(debt.minimum_payment);
            if let Some(description) = debt.description {
                debt_builder = debt_builder.description(description);
            }
            if let Some(limit) = debt.credit_limit {
                debt_builder = debt_builder.credit_limit(limit);
            }
            if let Some(due) = debt.due_date {
                debt_builder = debt_builder.due_date(due.year(), due.month(), due.day());
            }
            builder = builder.debt(debt_builder);
            if let Some(weight) = debt.weight {
                builder = builder.weight(debt.name, weight);
            }
        }

        let (debts, config, metadata) = builder.build();
        Plan {
            debts,
            config,
            metadata,
            currency: self.currency,
            strategy: self.strategy,
            extra_payment: self.extra_payment,
            profile: self.profile,
            products: self.products,
        }
    }
}

impl Plan {
    /// The plan's extra payment, or an override from the command line
    pub fn extra(&self, amount: Option<Decimal>) -> Money {
        Money::new(amount.unwrap_or(self.extra_payment), self.currency)
    }
}
