//! Text and JSON rendering of engine results

use std::io::{self, Write};

use debtplan_core::config::PlanMetadata;
use debtplan_core::milestones::{DebtCompletion, Milestone};
use debtplan_core::model::{ConsolidationOpportunity, DebtId, Money, PayoffResult};
use debtplan_core::negotiation::NegotiationOpportunity;
use debtplan_core::scenario::{ComparisonResult, DebtEfficiency, SweepPoint, TargetSolution};
use rust_decimal::Decimal;
use serde::Serialize;

/// Output of one command
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Payoff(PayoffResult),
    Comparison(Box<ComparisonResult>),
    Sweep(Vec<SweepPoint>),
    Solution(TargetSolution),
    Consolidation(Vec<ConsolidationOpportunity>),
    Milestones {
        milestones: Vec<Milestone>,
        debt_payoffs: Vec<DebtCompletion>,
    },
    Negotiation(Vec<NegotiationOpportunity>),
}

impl Report {
    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    pub fn write_text(
        &self,
        out: &mut impl Write,
        metadata: &PlanMetadata,
        show_schedule: bool,
    ) -> io::Result<()> {
        match self {
            Report::Payoff(result) => payoff(out, result, show_schedule),
            Report::Comparison(result) => comparison(out, result),
            Report::Sweep(points) => sweep(out, points),
            Report::Solution(solution) => target_solution(out, solution),
            Report::Consolidation(found) => consolidation(out, found),
            Report::Milestones {
                milestones,
                debt_payoffs,
            } => milestone_table(out, milestones, debt_payoffs, metadata),
            Report::Negotiation(found) => negotiation(out, found),
        }
    }
}

/// Format money with thousands separators, e.g. `USD 12,345.67`
pub fn format_money(money: Money) -> String {
    let amount = money.display_amount();
    let text = format!("{:.2}", amount.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{} {grouped}.{cents}", money.currency())
}

/// Format a month count as years and months, e.g. `3y 4m`
pub fn format_months(months: u32) -> String {
    match (months / 12, months % 12) {
        (0, m) => format!("{m}m"),
        (y, 0) => format!("{y}y"),
        (y, m) => format!("{y}y {m}m"),
    }
}

fn debt_label(metadata: &PlanMetadata, id: DebtId) -> String {
    metadata
        .debt_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("debt {}", id.0))
}

fn payoff(out: &mut impl Write, result: &PayoffResult, show_schedule: bool) -> io::Result<()> {
    writeln!(out, "Strategy:        {}", result.strategy)?;
    writeln!(out, "Extra payment:   {}", format_money(result.extra_payment))?;
    writeln!(
        out,
        "Debt-free:       {} ({})",
        result.payoff_date,
        format_months(result.payoff_months)
    )?;
    writeln!(out, "Total interest:  {}", format_money(result.total_interest))?;
    writeln!(out, "Total paid:      {}", format_money(result.total_payments))?;

    writeln!(out)?;
    writeln!(out, "{:<24} {:>6} {:>12} {:>18}", "Debt", "Month", "Date", "Interest")?;
    for p in &result.debt_payoffs {
        writeln!(
            out,
            "{:<24} {:>6} {:>12} {:>18}",
            p.name,
            p.month_index,
            p.date.to_string(),
            format_money(p.interest_paid)
        )?;
    }

    if show_schedule {
        writeln!(out)?;
        writeln!(
            out,
            "{:>5} {:>12} {:>18} {:>16} {:>18} {:>7}",
            "Month", "Date", "Payment", "Interest", "Remaining", "Active"
        )?;
        for entry in &result.schedule {
            writeln!(
                out,
                "{:>5} {:>12} {:>18} {:>16} {:>18} {:>7}",
                entry.month_index,
                entry.date.to_string(),
                format_money(entry.total_payment_this_month),
                format_money(entry.interest_portion),
                format_money(entry.aggregate_remaining_balance),
                entry.active_debt_count
            )?;
        }
    }
    Ok(())
}

fn comparison(out: &mut impl Write, result: &ComparisonResult) -> io::Result<()> {
    writeln!(out, "{:<12} {:>8} {:>18} {:>12}", "Strategy", "Months", "Interest", "First win")?;
    for r in [&result.avalanche, &result.snowball] {
        let first = r
            .first_payoff_month()
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        writeln!(
            out,
            "{:<12} {:>8} {:>18} {:>12}",
            r.strategy.to_string(),
            r.payoff_months,
            format_money(r.total_interest),
            first
        )?;
    }
    match &result.minimum_only {
        Ok(r) => writeln!(
            out,
            "{:<12} {:>8} {:>18} {:>12}",
            "Minimums",
            r.payoff_months,
            format_money(r.total_interest),
            "-"
        )?,
        Err(e) => writeln!(out, "{:<12} {e}", "Minimums")?,
    }

    writeln!(out)?;
    efficiency_table(out, &result.efficiency)?;

    writeln!(out)?;
    writeln!(out, "Recommended: {}", result.recommended_strategy)?;
    writeln!(out, "  {}", result.recommendation_reason)?;
    if let (Some(saved), Some(months)) = (
        result.interest_savings_vs_minimum,
        result.time_savings_vs_minimum_months,
    ) {
        writeln!(
            out,
            "  Saves {} and {} months over minimum payments",
            format_money(saved),
            months
        )?;
    }
    Ok(())
}

fn efficiency_table(out: &mut impl Write, metrics: &[DebtEfficiency]) -> io::Result<()> {
    writeln!(
        out,
        "{:<24} {:>8} {:>18} {:>12}",
        "Debt", "APR", "Monthly interest", "Of minimum"
    )?;
    for m in metrics {
        let share = (m.interest_to_payment_ratio * Decimal::ONE_HUNDRED).round_dp(1);
        writeln!(
            out,
            "{:<24} {:>8} {:>18} {:>11}%{}",
            m.debt_name,
            m.interest_rate.to_string(),
            format_money(m.monthly_interest_cost),
            share,
            if m.amortizes { "" } else { " (minimum below interest)" }
        )?;
    }
    Ok(())
}

fn sweep(out: &mut impl Write, points: &[SweepPoint]) -> io::Result<()> {
    writeln!(out, "{:>18} {:>8} {:>18}", "Extra", "Months", "Interest")?;
    for point in points {
        match &point.result {
            Ok(r) => writeln!(
                out,
                "{:>18} {:>8} {:>18}",
                format_money(point.extra_payment),
                r.payoff_months,
                format_money(r.total_interest)
            )?,
            Err(e) => writeln!(out, "{:>18}  {e}", format_money(point.extra_payment))?,
        }
    }
    Ok(())
}

fn target_solution(out: &mut impl Write, solution: &TargetSolution) -> io::Result<()> {
    writeln!(
        out,
        "Pay {} extra per month to be debt-free in {} months ({})",
        format_money(solution.required_extra_payment),
        solution.payoff_months,
        solution.payoff_date
    )?;
    writeln!(out, "Target:          {} months", solution.target_months)?;
    writeln!(out, "Strategy:        {}", solution.strategy)?;
    writeln!(out, "Total interest:  {}", format_money(solution.total_interest))?;
    writeln!(
        out,
        "Evaluations:     {}{}",
        solution.history.num_evaluations(),
        if solution.converged { "" } else { " (not converged)" }
    )?;
    Ok(())
}

fn consolidation(out: &mut impl Write, found: &[ConsolidationOpportunity]) -> io::Result<()> {
    if found.is_empty() {
        return writeln!(out, "No consolidation products cleared the eligibility threshold.");
    }
    for o in found {
        writeln!(
            out,
            "{} (score {}, {:?} risk)",
            o.consolidation_type,
            o.pros_and_cons.recommendation_score.round_dp(0),
            o.pros_and_cons.risk_assessment
        )?;
        writeln!(out, "  Balance:          {}", format_money(o.consolidated_balance))?;
        writeln!(out, "  Rate:             {}", o.new_interest_rate)?;
        writeln!(out, "  Payment:          {}", format_money(o.new_monthly_payment))?;
        writeln!(out, "  Interest saved:   {}", format_money(o.total_interest_savings))?;
        writeln!(out, "  Months saved:     {}", o.time_savings_months)?;
        for pro in &o.pros_and_cons.advantages {
            writeln!(out, "  + {pro}")?;
        }
        for con in &o.pros_and_cons.disadvantages {
            writeln!(out, "  - {con}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn milestone_table(
    out: &mut impl Write,
    milestones: &[Milestone],
    debt_payoffs: &[DebtCompletion],
    metadata: &PlanMetadata,
) -> io::Result<()> {
    writeln!(out, "{:>8} {:>18} {:>6} {:>12}", "Paid", "Remaining", "Month", "Date")?;
    for m in milestones {
        writeln!(
            out,
            "{:>7}% {:>18} {:>6} {:>12}{}",
            m.percentage,
            format_money(m.target_remaining_balance),
            m.month_index,
            m.date.to_string(),
            if m.reached { "" } else { " (not reached)" }
        )?;
    }

    writeln!(out)?;
    for p in debt_payoffs {
        writeln!(
            out,
            "{:<24} paid off in month {} ({}), motivation {}/10",
            debt_label(metadata, p.debt_id),
            p.month_index,
            p.date,
            p.motivation_boost
        )?;
    }
    Ok(())
}

fn negotiation(out: &mut impl Write, found: &[NegotiationOpportunity]) -> io::Result<()> {
    if found.is_empty() {
        return writeln!(out, "No debts qualify for negotiation.");
    }
    for o in found {
        writeln!(out, "{}: {}", o.debt_name, o.negotiation_type)?;
        writeln!(out, "  Balance:            {}", format_money(o.current_balance))?;
        writeln!(out, "  Potential savings:  {}", format_money(o.potential_savings))?;
        writeln!(out, "  Success chance:     {}", o.success_probability)?;
        writeln!(out, "  {}", o.negotiation_strategy)?;
        for point in &o.talking_points {
            writeln!(out, "  * {point}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use debtplan_core::model::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Money::new(dec!(0), Currency::USD)), "USD 0.00");
        assert_eq!(format_money(Money::new(dec!(999.999), Currency::USD)), "USD 1,000.00");
        assert_eq!(
            format_money(Money::new(dec!(1234567.891), Currency::EUR)),
            "EUR 1,234,567.89"
        );
        assert_eq!(format_money(Money::new(dec!(-42.5), Currency::GBP)), "-GBP 42.50");
    }

    #[test]
    fn test_format_months() {
        assert_eq!(format_months(7), "7m");
        assert_eq!(format_months(24), "2y");
        assert_eq!(format_months(41), "3y 5m");
    }
}
