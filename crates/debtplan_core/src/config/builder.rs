//! Plan Builder
//!
//! The PlanBuilder provides a fluent API for assembling a debt set with
//! automatic ID assignment, name-based lookups, and metadata tracking.
//!
//! # Example
//!
//! ```ignore
//! use debtplan_core::config::{DebtBuilder, PlanBuilder};
//! use rust_decimal_macros::dec;
//!
//! let (debts, config, metadata) = PlanBuilder::new()
//!     .start(2025, 1, 1)
//!     .rollover_freed_minimums(true)
//!
//!     .debt(DebtBuilder::credit_card("Visa")
//!         .balance(dec!(4_200))
//!         .apr(dec!(22.9))
//!         .minimum_payment(dec!(120)))
//!     .debt(DebtBuilder::student_loan("Federal")
//!         .balance(dec!(18_000))
//!         .apr(dec!(5.5))
//!         .minimum_payment(dec!(210)))
//!
//!     // Only read by Strategy::Custom
//!     .weight("Federal", dec!(10))
//!     .build();
//! ```

use rust_decimal::Decimal;

use super::SimulationConfig;
use super::debt_builder::DebtBuilder;
use super::metadata::PlanMetadata;
use crate::model::{Currency, DebtAccount, DebtId, PriorityWeights};

/// Builder for creating plans with automatic ID assignment and metadata tracking
pub struct PlanBuilder {
    config: SimulationConfig,
    metadata: PlanMetadata,
    currency: Currency,
    next_debt_id: u16,

    // Resolved during build
    pending_debts: Vec<DebtBuilder>,
    pending_weights: Vec<(String, Decimal)>,
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanBuilder {
    /// Create a new plan builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            metadata: PlanMetadata::new(),
            currency: Currency::default(),
            next_debt_id: 0,
            pending_debts: Vec::new(),
            pending_weights: Vec::new(),
        }
    }

    // =========================================================================
    // Basic Configuration
    // =========================================================================

    /// Set the date of month 0
    #[must_use]
    pub fn start_date(mut self, date: jiff::civil::Date) -> Self {
        self.config.start_date = Some(date);
        self
    }

    /// Set the date of month 0 (convenience method)
    #[must_use]
    pub fn start(mut self, year: i16, month: i8, day: i8) -> Self {
        self.config.start_date = Some(jiff::civil::date(year, month, day));
        self
    }

    #[must_use]
    pub fn max_months(mut self, months: u32) -> Self {
        self.config.max_months = months;
        self
    }

    #[must_use]
    pub fn rollover_freed_minimums(mut self, rollover: bool) -> Self {
        self.config.rollover_freed_minimums = rollover;
        self
    }

    /// Currency applied to debts that do not set their own
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    // =========================================================================
    // Debts
    // =========================================================================

    /// Add a debt using the DebtBuilder
    #[must_use]
    pub fn debt(mut self, builder: DebtBuilder) -> Self {
        self.pending_debts.push(builder);
        self
    }

    /// Quick method to add a credit card
    #[must_use]
    pub fn credit_card(
        self,
        name: impl Into<String>,
        balance: Decimal,
        apr: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        self.debt(
            DebtBuilder::credit_card(name)
                .balance(balance)
                .apr(apr)
                .minimum_payment(minimum_payment),
        )
    }

    /// Custom-strategy priority for a debt, by name
    #[must_use]
    pub fn weight(mut self, debt_name: impl Into<String>, weight: Decimal) -> Self {
        self.pending_weights.push((debt_name.into(), weight));
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the debt set, configuration, and metadata
    #[must_use]
    pub fn build(mut self) -> (Vec<DebtAccount>, SimulationConfig, PlanMetadata) {
        let mut debts = Vec::with_capacity(self.pending_debts.len());

        for mut debt_builder in self.pending_debts.drain(..) {
            let debt_id = debt_builder.id.unwrap_or_else(|| {
                let id = DebtId(self.next_debt_id);
                self.next_debt_id += 1;
                id
            });
            debt_builder.id = Some(debt_id);
            if debt_builder.currency.is_none() {
                debt_builder.currency = Some(self.currency);
            }

            self.metadata.register_debt(
                debt_id,
                Some(debt_builder.name.clone()),
                debt_builder.description.clone(),
            );
            debts.push(debt_builder.build());
        }

        if !self.pending_weights.is_empty() {
            let mut weights = PriorityWeights::new();
            for (name, weight) in self.pending_weights {
                match self.metadata.debt_id(&name) {
                    Some(id) => weights = weights.with(id, weight),
                    None => tracing::warn!(debt = %name, "priority weight for unknown debt ignored"),
                }
            }
            self.config.custom_weights = Some(weights);
        }

        (debts, self.config, self.metadata)
    }
}
