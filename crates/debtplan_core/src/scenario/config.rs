//! Scenario configuration types
//!
//! Controls how strategy comparisons pick a recommendation and how the
//! target-date solver bounds its search.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

/// How much the borrower values early payoffs over total cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PsychologicalPreference {
    /// Favor early wins (snowball) unless avalanche saves a material amount
    QuickWins,
    /// Always favor the lowest total interest
    Mathematical,
    /// Let the debt set decide via the quick-wins weight
    #[default]
    Balanced,
}

fn default_material_savings_threshold() -> Decimal {
    dec!(500)
}

fn default_quick_wins_weight() -> Decimal {
    dec!(0.6)
}

fn default_solver_max_iterations() -> usize {
    64
}

/// Configuration for `compare`, `sweep`, and the target solvers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Interest difference (plan currency) above which avalanche is
    /// recommended regardless of preference
    #[serde(default = "default_material_savings_threshold")]
    pub material_savings_threshold: Decimal,

    #[serde(default)]
    pub psychological_preference: PsychologicalPreference,

    /// Under `Balanced`, snowball wins an immaterial difference when the
    /// quick-wins importance of the debt set exceeds this weight (0..1)
    #[serde(default = "default_quick_wins_weight")]
    pub quick_wins_weight: Decimal,

    /// Largest extra payment the solver will try. `None` uses the total
    /// original balance.
    #[serde(default)]
    pub solver_upper_bound: Option<Decimal>,

    #[serde(default = "default_solver_max_iterations")]
    pub solver_max_iterations: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            material_savings_threshold: default_material_savings_threshold(),
            psychological_preference: PsychologicalPreference::default(),
            quick_wins_weight: default_quick_wins_weight(),
            solver_upper_bound: None,
            solver_max_iterations: default_solver_max_iterations(),
        }
    }
}

impl ScenarioConfig {
    #[must_use]
    pub fn new(simulation: SimulationConfig) -> Self {
        Self {
            simulation,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_preference(mut self, preference: PsychologicalPreference) -> Self {
        self.psychological_preference = preference;
        self
    }

    #[must_use]
    pub fn with_solver_upper_bound(mut self, bound: Decimal) -> Self {
        self.solver_upper_bound = Some(bound);
        self
    }
}
