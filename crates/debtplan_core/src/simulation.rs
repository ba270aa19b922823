//! Amortization simulator
//!
//! Runs the month loop in [`crate::simulation_state`] until every debt is
//! retired, the debt set provably cannot pay off, or `max_months` is hit.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::config::SimulationConfig;
use crate::date_math::add_months;
use crate::error::{EngineError, InputError, MoneyError, Result};
use crate::model::{
    Currency, DebtAccount, DebtPayoff, Money, PayoffResult, Schedule, Strategy,
};
use crate::simulation_state::{MonthState, SimContext};

/// Reject malformed debt sets before any month is simulated
///
/// Returns the common currency of the set.
pub fn validate_debts(debts: &[DebtAccount]) -> Result<Currency> {
    let first = debts.first().ok_or(InputError::NoDebts)?;
    let currency = first.currency();
    let mut seen = FxHashSet::default();

    for debt in debts {
        if !seen.insert(debt.id) {
            return Err(InputError::DuplicateDebtId(debt.id).into());
        }
        if debt.balance.is_negative() {
            return Err(InputError::NegativeBalance(debt.id).into());
        }
        if debt.interest_rate.is_negative() {
            return Err(InputError::NegativeRate(debt.id).into());
        }
        if debt.minimum_payment.is_negative() {
            return Err(InputError::NegativeMinimumPayment(debt.id).into());
        }
        for amount in [debt.balance, debt.minimum_payment] {
            if amount.currency() != currency {
                return Err(MoneyError::CurrencyMismatch {
                    expected: currency,
                    actual: amount.currency(),
                }
                .into());
            }
        }
    }

    Ok(currency)
}

/// Sum of starting balances
pub fn total_balance(debts: &[DebtAccount]) -> Decimal {
    debts.iter().map(|d| d.balance.amount()).sum()
}

/// Simulate paying down `debts` under `strategy` with a fixed extra payment
///
/// Fails with `InvalidInput` before the loop starts, or with `Diverging` when
/// the payments cannot amortize the debt set within `max_months`.
pub fn simulate(
    debts: &[DebtAccount],
    strategy: Strategy,
    extra_payment: Money,
    config: &SimulationConfig,
) -> Result<PayoffResult> {
    let currency = validate_debts(debts)?;
    if extra_payment.currency() != currency {
        return Err(MoneyError::CurrencyMismatch {
            expected: currency,
            actual: extra_payment.currency(),
        }
        .into());
    }
    if extra_payment.is_negative() {
        return Err(InputError::NegativeExtraPayment(extra_payment.amount()).into());
    }
    if strategy == Strategy::Custom && config.custom_weights.is_none() {
        return Err(EngineError::StrategyNotConfigured(strategy));
    }

    let start_date = config.resolve_start_date(debts);
    if add_months(start_date, config.max_months).is_none() {
        return Err(InputError::HorizonOutOfRange {
            start_date,
            max_months: config.max_months,
        }
        .into());
    }

    let ctx = SimContext {
        debts,
        strategy,
        weights: config.custom_weights.as_ref(),
        currency,
        start_date,
        rollover_freed_minimums: config.rollover_freed_minimums,
    };

    tracing::debug!(
        %strategy,
        extra = %extra_payment,
        debts = debts.len(),
        start = %ctx.start_date,
        "simulating payoff"
    );

    let mut state = MonthState::initial(&ctx, extra_payment.amount());
    let mut entries = Vec::new();
    let mut debt_payoffs = Vec::new();

    while !state.is_settled() {
        if state.month >= config.max_months {
            let remaining_balance = state.aggregate_balance();
            let debt_ids = state.active_ids(&ctx);
            tracing::warn!(
                month = state.month,
                remaining = %remaining_balance,
                "month cap reached with debt outstanding"
            );
            return Err(EngineError::Diverging {
                month: state.month,
                debt_ids,
                remaining_balance,
            });
        }

        let (next, entry) = state.advance(&ctx)?;

        // A rising aggregate is only fatal once it can never turn around
        let hopeless = !next.is_settled()
            && next.aggregate_balance() >= state.aggregate_balance()
            && (next.repeats(&state) || next.cannot_amortize(&ctx));
        if hopeless {
            let debt_ids = state.stalled_debts(&next, &ctx);
            tracing::warn!(
                month = next.month,
                remaining = %next.aggregate_balance(),
                stalled = ?debt_ids,
                "aggregate balance stopped decreasing"
            );
            return Err(EngineError::Diverging {
                month: next.month,
                debt_ids,
                remaining_balance: next.aggregate_balance(),
            });
        }

        for debt_id in &entry.debts_completed_this_month {
            if let Some(debt) = debts.iter().find(|d| d.id == *debt_id) {
                let interest = next.interest_paid.get(debt_id).copied().unwrap_or_default();
                debt_payoffs.push(DebtPayoff {
                    debt_id: *debt_id,
                    name: debt.name.clone(),
                    month_index: entry.month_index,
                    date: entry.date,
                    interest_paid: Money::new(interest, currency),
                });
            }
        }

        entries.push(entry);
        state = next;
    }

    let schedule = Schedule::from_entries(entries);
    let payoff_months = state.month;
    let payoff_date = schedule.last().map_or(ctx.start_date, |e| e.date);

    tracing::debug!(%strategy, payoff_months, "payoff simulated");

    Ok(PayoffResult {
        strategy,
        extra_payment,
        payoff_months,
        payoff_date,
        total_interest: Money::new(schedule.total_interest(), currency),
        total_payments: Money::new(schedule.total_payments(), currency),
        original_balance: Money::new(total_balance(debts), currency),
        debt_payoffs,
        schedule,
    })
}

/// Simulate with minimum payments only (the comparison baseline)
///
/// Freed minimums are never rolled over here, whatever the config says.
pub fn simulate_minimum_only(
    debts: &[DebtAccount],
    config: &SimulationConfig,
) -> Result<PayoffResult> {
    let currency = validate_debts(debts)?;
    let config = config.clone().with_rollover(false);
    simulate(debts, Strategy::Avalanche, Money::zero(currency), &config)
}
