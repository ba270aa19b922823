//! Subcommand dispatch: plan in, report out

use std::io::Write;

use color_eyre::eyre::eyre;
use debtplan_core::consolidation::{self, ConsolidationConfig};
use debtplan_core::milestones::{DEFAULT_THRESHOLDS, debt_payoffs, milestones};
use debtplan_core::model::{ConsolidationProduct, Money, Strategy};
use debtplan_core::negotiation;
use debtplan_core::scenario::{
    ScenarioConfig, compare, solve_for_target, solve_for_target_date, sweep,
};
use debtplan_core::simulation::simulate;

use crate::cli::{Command, StrategyArg};
use crate::plan::Plan;
use crate::report::Report;

fn pick_strategy(plan: &Plan, arg: Option<StrategyArg>) -> Strategy {
    arg.map(Strategy::from).unwrap_or(plan.strategy)
}

/// Run one subcommand against a resolved plan
pub fn execute(command: &Command, plan: &Plan) -> color_eyre::Result<Report> {
    let report = match command {
        Command::Simulate {
            strategy, extra, ..
        } => {
            let strategy = pick_strategy(plan, *strategy);
            let result = simulate(&plan.debts, strategy, plan.extra(*extra), &plan.config)?;
            tracing::info!(%strategy, months = result.payoff_months, "simulation complete");
            Report::Payoff(result)
        }

        Command::Compare { extra, preference } => {
            let config = ScenarioConfig::new(plan.config.clone()).with_preference((*preference).into());
            let result = compare(&plan.debts, plan.extra(*extra), &config)?;
            tracing::info!(recommended = %result.recommended_strategy, "comparison complete");
            Report::Comparison(Box::new(result))
        }

        Command::Sweep { strategy, amounts } => {
            let strategy = pick_strategy(plan, *strategy);
            let amounts: Vec<Money> = amounts.iter().map(|a| plan.extra(Some(*a))).collect();
            Report::Sweep(sweep(&plan.debts, strategy, &amounts, &plan.config)?)
        }

        Command::Solve {
            strategy,
            months,
            date,
            upper_bound,
        } => {
            let strategy = pick_strategy(plan, *strategy);
            let mut config = ScenarioConfig::new(plan.config.clone());
            if let Some(bound) = upper_bound {
                config = config.with_solver_upper_bound(*bound);
            }
            let solution = match (months, date) {
                (Some(months), _) => solve_for_target(&plan.debts, strategy, *months, &config)?,
                (None, Some(date)) => solve_for_target_date(&plan.debts, strategy, *date, &config)?,
                (None, None) => return Err(eyre!("solve needs --months or --date")),
            };
            Report::Solution(solution)
        }

        Command::Consolidate { min_balance } => {
            let profile = plan
                .profile
                .ok_or_else(|| eyre!("consolidate needs a `profile` section in the plan file"))?;
            let products = if plan.products.is_empty() {
                ConsolidationProduct::catalogue(Some(profile.credit_score))
            } else {
                plan.products.clone()
            };
            let config = ConsolidationConfig {
                min_consolidation_balance: min_balance.unwrap_or_default(),
                simulation: plan.config.clone(),
                ..Default::default()
            };
            let found = consolidation::analyze(&plan.debts, &products, &profile, &config)?;
            tracing::info!(
                candidates = products.len(),
                eligible = found.len(),
                "consolidation analysis complete"
            );
            Report::Consolidation(found)
        }

        Command::Milestones {
            strategy,
            extra,
            thresholds,
        } => {
            let strategy = pick_strategy(plan, *strategy);
            let result = simulate(&plan.debts, strategy, plan.extra(*extra), &plan.config)?;
            let thresholds = if thresholds.is_empty() {
                DEFAULT_THRESHOLDS.as_slice()
            } else {
                thresholds.as_slice()
            };
            Report::Milestones {
                milestones: milestones(&result.schedule, result.original_balance, thresholds)?,
                debt_payoffs: debt_payoffs(&result.schedule),
            }
        }

        Command::Negotiate => Report::Negotiation(negotiation::opportunities(&plan.debts)),
    };
    Ok(report)
}

/// Execute `command` and write its report as text or JSON
pub fn run(
    command: &Command,
    plan: &Plan,
    json: bool,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    let report = execute(command, plan)?;
    if json {
        report.write_json(out)?;
    } else {
        report.write_text(out, &plan.metadata, command.show_schedule())?;
    }
    Ok(())
}
