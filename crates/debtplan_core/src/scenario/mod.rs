//! Scenario runner: strategy comparison, what-if sweeps, and target solving
//!
//! Every scenario is built from repeated calls to the amortization simulator.
//!
//! # Example
//!
//! ```ignore
//! use debtplan_core::scenario::{ScenarioConfig, compare, solve_for_target};
//! use debtplan_core::model::{Currency, Money, Strategy};
//! use rust_decimal_macros::dec;
//!
//! let config = ScenarioConfig::default();
//! let comparison = compare(&debts, Money::new(dec!(200), Currency::USD), &config)?;
//! println!("{}: {}", comparison.recommended_strategy, comparison.recommendation_reason);
//!
//! let solution = solve_for_target(&debts, Strategy::Avalanche, 36, &config)?;
//! println!("Pay {} extra per month", solution.required_extra_payment);
//! ```

mod binary_search;
mod compare;
mod config;
mod result;
mod sweep;

pub use binary_search::{solve_for_target, solve_for_target_date};
pub use compare::{
    ComparisonResult, DebtEfficiency, PsychologicalFactors, compare, efficiency_metrics,
};
pub use config::{PsychologicalPreference, ScenarioConfig};
pub use result::{SolverHistory, SolverStep, SweepPoint, TargetSolution};
pub use sweep::sweep;
