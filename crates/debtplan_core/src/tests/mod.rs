//! Scenario tests for the debt payoff engine
//!
//! Tests are organized by topic:
//! - `simulation` - Month loop, divergence, input validation
//! - `scenarios` - Comparison, sweeps, and target solving
//! - `consolidation` - Product scoring and savings estimates
//! - `milestones` - Percentage-paid and per-debt milestones
//! - `builder_dsl` - Builder DSL for fluent plan setup
//! - `properties` - Property-based invariants

mod builder_dsl;
mod milestones;
mod simulation;

use rust_decimal::Decimal;

use crate::config::DebtBuilder;
use crate::model::{Currency, DebtAccount, DebtId, Money};

pub(crate) fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

/// A plain installment debt with no extras
pub(crate) fn loan(id: u16, balance: Decimal, apr: Decimal, minimum: Decimal) -> DebtAccount {
    DebtBuilder::personal_loan(format!("Loan {id}"))
        .id(DebtId(id))
        .balance(balance)
        .apr(apr)
        .minimum_payment(minimum)
        .build()
}

pub(crate) fn card(id: u16, balance: Decimal, apr: Decimal, minimum: Decimal) -> DebtAccount {
    DebtBuilder::credit_card(format!("Card {id}"))
        .id(DebtId(id))
        .balance(balance)
        .apr(apr)
        .minimum_payment(minimum)
        .build()
}
