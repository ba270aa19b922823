//! Debt payoff optimization library
//!
//! This crate provides a deterministic amortization engine for paying down a
//! set of debts. It supports:
//! - Exact decimal money (no binary floating point anywhere)
//! - Avalanche, snowball, and caller-weighted payoff strategies
//! - Month-by-month schedules with explicit divergence detection
//! - Strategy comparison, extra-payment sweeps, and target-date solving
//! - Consolidation product scoring and savings estimates
//! - Creditor negotiation opportunities and payoff milestones
//!
//! Every entry point is a pure function of its inputs: no I/O, no shared
//! state, safe to call from any number of threads.
//!
//! # Builder DSL
//!
//! Use the fluent builder API for ergonomic plan setup:
//!
//! ```ignore
//! use debtplan_core::config::{DebtBuilder, PlanBuilder};
//! use debtplan_core::model::{Money, Strategy};
//! use debtplan_core::simulation::simulate;
//! use rust_decimal_macros::dec;
//!
//! let (debts, config, _metadata) = PlanBuilder::new()
//!     .start(2025, 1, 1)
//!     .debt(DebtBuilder::credit_card("Visa")
//!         .balance(dec!(5_000))
//!         .apr(dec!(19.99))
//!         .minimum_payment(dec!(150)))
//!     .build();
//!
//! let extra = Money::new(dec!(200), debts[0].currency());
//! let result = simulate(&debts, Strategy::Avalanche, extra, &config)?;
//! println!("Debt-free in {} months", result.payoff_months);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod allocator;
pub mod consolidation;
pub mod date_math;
pub mod error;
pub mod milestones;
pub mod negotiation;
pub mod scenario;
pub mod simulation;
pub mod simulation_state;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{DebtBuilder, PlanBuilder, PlanMetadata, SimulationConfig};
pub use error::{EngineError, InputError, MoneyError, Result};
pub use model::{Currency, DebtAccount, DebtId, Money, PayoffResult, Percentage, Strategy};
pub use simulation::simulate;
