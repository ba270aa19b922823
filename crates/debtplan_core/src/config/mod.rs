//! Simulation configuration
//!
//! The main configuration type is `SimulationConfig`, which controls how the
//! amortization simulator runs over a debt set.
//!
//! # Builder DSL
//!
//! For a more ergonomic way to assemble a plan, use the builder DSL:
//!
//! ```ignore
//! use debtplan_core::config::{DebtBuilder, PlanBuilder};
//! use rust_decimal_macros::dec;
//!
//! let (debts, config, metadata) = PlanBuilder::new()
//!     .start(2025, 1, 1)
//!     .debt(DebtBuilder::credit_card("Visa")
//!         .balance(dec!(5_000))
//!         .apr(dec!(19.99))
//!         .minimum_payment(dec!(150)))
//!     .debt(DebtBuilder::auto_loan("Car")
//!         .balance(dec!(12_000))
//!         .apr(dec!(6.5))
//!         .minimum_payment(dec!(320)))
//!     .build();
//! ```

use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use crate::model::{DebtAccount, PriorityWeights};

pub mod builder;
pub mod debt_builder;
pub mod metadata;

pub use builder::PlanBuilder;
pub use debt_builder::DebtBuilder;
pub use metadata::{EntityMetadata, PlanMetadata};

/// Hard cap on simulated months (50 years)
pub const DEFAULT_MAX_MONTHS: u32 = 600;

fn default_max_months() -> u32 {
    DEFAULT_MAX_MONTHS
}

/// Amortization simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Months simulated before the debt set is declared diverging
    #[serde(default = "default_max_months")]
    pub max_months: u32,

    /// Fold a paid-off debt's minimum payment into the extra-payment budget
    /// for later months ("rolling snowball"). Off by default: the extra
    /// payment stays at the caller-supplied amount for the whole run.
    #[serde(default)]
    pub rollover_freed_minimums: bool,

    /// Date of month 0. When unset, the UTC date of the most recent
    /// `created_at` among the debts is used, so results depend only on inputs.
    #[serde(default)]
    pub start_date: Option<Date>,

    /// Required by `Strategy::Custom`
    #[serde(default)]
    pub custom_weights: Option<PriorityWeights>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            rollover_freed_minimums: false,
            start_date: None,
            custom_weights: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    #[must_use]
    pub fn with_rollover(mut self, rollover: bool) -> Self {
        self.rollover_freed_minimums = rollover;
        self
    }

    #[must_use]
    pub fn with_custom_weights(mut self, weights: PriorityWeights) -> Self {
        self.custom_weights = Some(weights);
        self
    }

    /// Resolve month 0 for a debt set
    pub fn resolve_start_date(&self, debts: &[DebtAccount]) -> Date {
        self.start_date.unwrap_or_else(|| {
            debts
                .iter()
                .map(|d| d.created_at)
                .max()
                .unwrap_or(jiff::Timestamp::UNIX_EPOCH)
                .to_zoned(TimeZone::UTC)
                .date()
        })
    }
}
