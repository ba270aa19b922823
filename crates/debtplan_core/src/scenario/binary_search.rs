//! Binary search for the extra payment that meets a payoff target
//!
//! The search runs over whole cents and keeps the invariant that `low` misses
//! the target and `high` meets it, so the answer always meets the target and
//! one cent less always misses. Where payoff months are non-increasing in the
//! extra payment (avalanche always, snowball when the debts share one APR and
//! minimum) the amounts that meet a target form an interval
//! `[answer, upper_bound]` and the answer is the global minimum.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::date_math::months_between;
use crate::error::{EngineError, InputError, Result};
use crate::model::{Currency, DebtAccount, Money, PayoffResult, Strategy};
use crate::simulation::{simulate, total_balance, validate_debts};

use super::config::ScenarioConfig;
use super::result::{SolverHistory, SolverStep, TargetSolution};

const CENTS: Decimal = dec!(100);

struct Evaluation<'a> {
    debts: &'a [DebtAccount],
    strategy: Strategy,
    currency: Currency,
    target_months: u32,
    config: &'a ScenarioConfig,
}

impl Evaluation<'_> {
    /// Simulate at `cents`; `Ok(None)` when the debt set diverges
    fn evaluate(&self, cents: Decimal, history: &mut SolverHistory) -> Result<Option<PayoffResult>> {
        let extra = Money::new(cents / CENTS, self.currency);
        let outcome = match simulate(self.debts, self.strategy, extra, &self.config.simulation) {
            Ok(result) => Some(result),
            Err(err) if err.is_diverging() => None,
            Err(err) => return Err(err),
        };

        let payoff_months = outcome.as_ref().map(|r| r.payoff_months);
        let meets_target = payoff_months.is_some_and(|m| m <= self.target_months);
        tracing::debug!(extra = %extra, ?payoff_months, meets_target, "solver step");

        history.record(SolverStep {
            extra_payment: extra,
            payoff_months,
            meets_target,
        });
        Ok(outcome.filter(|_| meets_target))
    }
}

fn upper_bound(debts: &[DebtAccount], config: &ScenarioConfig) -> Decimal {
    config
        .solver_upper_bound
        .unwrap_or_else(|| total_balance(debts))
}

/// Find the smallest extra payment (to the cent) with `payoff_months <= target_months`
///
/// Fails with `Unreachable` when even the configured upper bound misses the
/// target, rather than returning the bound itself.
pub fn solve_for_target(
    debts: &[DebtAccount],
    strategy: Strategy,
    target_months: u32,
    config: &ScenarioConfig,
) -> Result<TargetSolution> {
    if target_months == 0 {
        return Err(InputError::InvalidTarget("target must be at least one month".into()).into());
    }
    let currency = validate_debts(debts)?;
    let bound = upper_bound(debts, config);
    if bound < Decimal::ZERO {
        return Err(InputError::NegativeExtraPayment(bound).into());
    }

    let search = Evaluation {
        debts,
        strategy,
        currency,
        target_months,
        config,
    };
    let mut history = SolverHistory::new();

    let mut low = Decimal::ZERO;
    if let Some(result) = search.evaluate(low, &mut history)? {
        return Ok(solution(target_months, result, 0, true, history));
    }

    let mut high = (bound * CENTS).ceil();
    let Some(mut best) = search.evaluate(high, &mut history)? else {
        let best_months = history.steps.last().and_then(|s| s.payoff_months);
        return Err(EngineError::Unreachable {
            target_months,
            best_months,
            upper_bound: bound,
        });
    };

    let mut iterations = 0;
    while high - low > Decimal::ONE && iterations < config.solver_max_iterations {
        iterations += 1;
        let mid = ((low + high) / dec!(2)).floor();
        match search.evaluate(mid, &mut history)? {
            Some(result) => {
                high = mid;
                best = result;
            }
            None => low = mid,
        }
    }

    let converged = high - low <= Decimal::ONE;
    if !converged {
        tracing::warn!(
            iterations,
            gap_cents = %(high - low),
            "solver stopped before converging; answer may not be minimal"
        );
    }

    Ok(solution(target_months, best, iterations, converged, history))
}

/// Solve for a calendar payoff date instead of a month count
///
/// The date is converted to whole months after the simulation start date; a
/// date that leaves no full month is `Unreachable`.
pub fn solve_for_target_date(
    debts: &[DebtAccount],
    strategy: Strategy,
    target_date: Date,
    config: &ScenarioConfig,
) -> Result<TargetSolution> {
    validate_debts(debts)?;
    let start = config.simulation.resolve_start_date(debts);
    let target_months = months_between(start, target_date);

    if target_months == 0 {
        return Err(EngineError::Unreachable {
            target_months,
            best_months: None,
            upper_bound: upper_bound(debts, config),
        });
    }

    solve_for_target(debts, strategy, target_months, config)
}

fn solution(
    target_months: u32,
    result: PayoffResult,
    iterations: usize,
    converged: bool,
    history: SolverHistory,
) -> TargetSolution {
    TargetSolution {
        strategy: result.strategy,
        target_months,
        required_extra_payment: result.extra_payment,
        payoff_months: result.payoff_months,
        payoff_date: result.payoff_date,
        total_interest: result.total_interest,
        iterations,
        converged,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebtBuilder;

    fn loan() -> Vec<DebtAccount> {
        vec![
            DebtBuilder::personal_loan("Loan")
                .balance(dec!(1200))
                .minimum_payment(dec!(100))
                .build(),
        ]
    }

    #[test]
    fn test_zero_target_is_invalid() {
        let err = solve_for_target(&loan(), Strategy::Avalanche, 0, &ScenarioConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidInput(InputError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_target_already_met_needs_no_extra() {
        let solution =
            solve_for_target(&loan(), Strategy::Avalanche, 24, &ScenarioConfig::default()).unwrap();
        assert_eq!(solution.required_extra_payment.amount(), Decimal::ZERO);
        assert_eq!(solution.payoff_months, 12);
        assert_eq!(solution.history.num_evaluations(), 1);
    }

    #[test]
    fn test_bound_too_small_is_unreachable() {
        let config = ScenarioConfig::default().with_solver_upper_bound(dec!(10));
        let err = solve_for_target(&loan(), Strategy::Avalanche, 3, &config).unwrap_err();
        assert_eq!(
            err,
            EngineError::Unreachable {
                target_months: 3,
                best_months: Some(11),
                upper_bound: dec!(10),
            }
        );
    }
}
