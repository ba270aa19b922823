//! Per-month simulation state
//!
//! Each month consumes a `MonthState` by reference and produces the next one.
//! Nothing is mutated in place, so a state can be inspected or replayed after
//! the loop has moved on.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rustc_hash::FxHashMap;

use crate::allocator::{RankKey, rank_indices};
use crate::date_math::add_months;
use crate::error::{InputError, Result};
use crate::model::{
    Currency, DebtAccount, DebtId, Money, PriorityWeights, ScheduleEntry, Strategy, round_storage,
};

/// Fixed inputs shared by every month of one simulation run
#[derive(Debug, Clone, Copy)]
pub struct SimContext<'a> {
    pub debts: &'a [DebtAccount],
    pub strategy: Strategy,
    pub weights: Option<&'a PriorityWeights>,
    pub currency: Currency,
    pub start_date: Date,
    pub rollover_freed_minimums: bool,
}

/// Balances and running totals at the end of a month
#[derive(Debug, Clone)]
pub struct MonthState {
    pub month: u32,
    /// Outstanding balance per still-active debt
    pub balances: FxHashMap<DebtId, Decimal>,
    /// Extra payment available next month
    pub extra_budget: Decimal,
    /// Interest charged per debt since month 0
    pub interest_paid: FxHashMap<DebtId, Decimal>,
}

/// What happened to one debt during the minimum-payment pass
#[derive(Debug, Clone, Copy)]
struct MinimumStep {
    debt_index: usize,
    balance: Decimal,
    interest: Decimal,
    paid: Decimal,
    principal: Decimal,
    capitalized: Decimal,
}

impl MonthState {
    /// Month 0: every debt with a positive balance is active
    pub fn initial(ctx: &SimContext<'_>, extra_payment: Decimal) -> Self {
        let balances = ctx
            .debts
            .iter()
            .filter(|d| d.balance.is_positive())
            .map(|d| (d.id, d.balance.amount()))
            .collect();

        Self {
            month: 0,
            balances,
            extra_budget: extra_payment,
            interest_paid: FxHashMap::default(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn aggregate_balance(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Ids of active debts, in input order
    pub fn active_ids(&self, ctx: &SimContext<'_>) -> Vec<DebtId> {
        ctx.debts
            .iter()
            .filter(|d| self.balances.contains_key(&d.id))
            .map(|d| d.id)
            .collect()
    }

    /// Simulate the next month, returning the new state and its schedule entry
    pub fn advance(&self, ctx: &SimContext<'_>) -> Result<(MonthState, ScheduleEntry)> {
        let month = self.month + 1;

        // 1. Accrue interest and apply minimums to every active debt
        let mut steps: Vec<MinimumStep> = Vec::with_capacity(self.balances.len());
        for (debt_index, debt) in ctx.debts.iter().enumerate() {
            let Some(&balance) = self.balances.get(&debt.id) else {
                continue;
            };
            let interest = round_storage(balance * debt.interest_rate.monthly_rate());
            let owed = balance + interest;
            let paid = debt.minimum_payment.amount().min(owed);
            steps.push(MinimumStep {
                debt_index,
                balance: owed - paid,
                interest,
                paid,
                principal: (paid - interest).max(Decimal::ZERO),
                capitalized: (interest - paid).max(Decimal::ZERO),
            });
        }

        // 2. Re-rank whatever is still owed after minimums
        let owing: Vec<&MinimumStep> = steps.iter().filter(|s| s.balance > Decimal::ZERO).collect();
        let order = rank_indices(&owing, ctx.strategy, ctx.weights, |s| {
            let debt = &ctx.debts[s.debt_index];
            RankKey {
                debt_id: debt.id,
                rate: debt.interest_rate,
                balance: s.balance,
            }
        })?;

        // 3. The whole extra budget goes to the top debt, capped at its balance
        let target = order.first().map(|&i| owing[i].debt_index);
        let mut extra_applied = Decimal::ZERO;

        let mut balances = FxHashMap::default();
        let mut interest_paid = self.interest_paid.clone();
        let mut completed = Vec::new();
        let mut freed_minimums = Decimal::ZERO;
        let mut interest_total = Decimal::ZERO;
        let mut principal_total = Decimal::ZERO;
        let mut capitalized_total = Decimal::ZERO;
        let mut paid_total = Decimal::ZERO;

        for step in &steps {
            let debt = &ctx.debts[step.debt_index];
            let mut balance = step.balance;

            if Some(step.debt_index) == target {
                extra_applied = self.extra_budget.min(balance);
                balance -= extra_applied;
            }

            *interest_paid.entry(debt.id).or_insert(Decimal::ZERO) += step.interest;
            interest_total += step.interest;
            principal_total += step.principal;
            capitalized_total += step.capitalized;
            paid_total += step.paid;

            // 4. Exactly zero retires the debt
            if balance.is_zero() {
                completed.push(debt.id);
                freed_minimums += debt.minimum_payment.amount();
            } else {
                balances.insert(debt.id, balance);
            }
        }

        principal_total += extra_applied;
        paid_total += extra_applied;

        let extra_budget = if ctx.rollover_freed_minimums {
            self.extra_budget + freed_minimums
        } else {
            self.extra_budget
        };

        let next = MonthState {
            month,
            balances,
            extra_budget,
            interest_paid,
        };

        // 5. Summarize the month
        let date = add_months(ctx.start_date, month).ok_or(InputError::HorizonOutOfRange {
            start_date: ctx.start_date,
            max_months: month,
        })?;
        let entry = ScheduleEntry {
            month_index: month,
            date,
            aggregate_remaining_balance: Money::new(next.aggregate_balance(), ctx.currency),
            total_payment_this_month: Money::new(paid_total, ctx.currency),
            interest_portion: Money::new(interest_total, ctx.currency),
            principal_portion: Money::new(principal_total, ctx.currency),
            capitalized_interest: Money::new(capitalized_total, ctx.currency),
            active_debt_count: next.balances.len(),
            debts_completed_this_month: completed,
        };

        Ok((next, entry))
    }

    /// Debts whose balance did not go down between `self` and `next`
    pub fn stalled_debts(&self, next: &MonthState, ctx: &SimContext<'_>) -> Vec<DebtId> {
        self.active_ids(ctx)
            .into_iter()
            .filter(|id| match (self.balances.get(id), next.balances.get(id)) {
                (Some(before), Some(after)) => after >= before,
                _ => false,
            })
            .collect()
    }

    /// True when no later month can bring the aggregate balance down
    ///
    /// Monthly capacity (active minimums plus the extra budget) never grows:
    /// retired minimums are either dropped or moved into the budget. Interest
    /// is at least the aggregate times the lowest active rate, less one
    /// rounding step per debt. Once capacity is at or below that floor the
    /// aggregate can only hold or rise, and the floor rises with it.
    pub fn cannot_amortize(&self, ctx: &SimContext<'_>) -> bool {
        let mut capacity = self.extra_budget;
        let mut lowest_rate: Option<Decimal> = None;
        for debt in ctx.debts.iter().filter(|d| self.balances.contains_key(&d.id)) {
            capacity += debt.minimum_payment.amount();
            let rate = debt.interest_rate.monthly_rate();
            lowest_rate = Some(lowest_rate.map_or(rate, |lowest| lowest.min(rate)));
        }

        let Some(rate) = lowest_rate else {
            return false;
        };
        let rounding = ROUNDING_STEP * Decimal::from(self.balances.len());
        capacity <= self.aggregate_balance() * rate - rounding
    }

    /// Same balances and budget as `previous`, so every later month repeats this one
    pub fn repeats(&self, previous: &MonthState) -> bool {
        self.balances == previous.balances && self.extra_budget == previous.extra_budget
    }
}

/// Largest error `round_storage` introduces into one interest charge
const ROUNDING_STEP: Decimal = dec!(0.00005);
