//! Consolidation analysis
//!
//! Scores each candidate financing product against the borrower profile and
//! estimates what replacing the current debts with it would save relative to
//! paying minimums only.
//!
//! Eligibility is out of 100: up to 40 for the credit-score tier, up to 30 for
//! the debt-to-income tier, and up to 30 for a product-specific bonus.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::model::{
    ConsolidationAnalysis, ConsolidationOpportunity, ConsolidationProduct, ConsolidationType,
    DISPLAY_SCALE, DebtAccount, DebtType, Money, Percentage, RiskLevel, UserProfile, round_storage,
};
use crate::simulation::{simulate_minimum_only, total_balance, validate_debts};

const SCORE_PENALTY_NO_SAVINGS: Decimal = dec!(20);

fn default_min_eligibility_score() -> Decimal {
    dec!(50)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationConfig {
    /// Products scoring below this are dropped
    #[serde(default = "default_min_eligibility_score")]
    pub min_eligibility_score: Decimal,
    /// Smallest consolidated balance worth analyzing; zero disables the floor
    #[serde(default)]
    pub min_consolidation_balance: Decimal,
    /// Used for the minimum-only baseline
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            min_eligibility_score: default_min_eligibility_score(),
            min_consolidation_balance: Decimal::ZERO,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ConsolidationProduct {
    /// Standard market offers, with rates tiered by credit score
    ///
    /// An unknown score gets a conservative mid-tier rate.
    pub fn catalogue(credit_score: Option<u32>) -> Vec<ConsolidationProduct> {
        let personal_loan_rate = match credit_score {
            Some(s) if s >= 750 => dec!(8.5),
            Some(s) if s >= 700 => dec!(12),
            Some(s) if s >= 650 => dec!(16),
            Some(_) => dec!(20),
            None => dec!(15),
        };
        let transfer_rate = match credit_score {
            Some(s) if s >= 750 => dec!(15.9),
            Some(s) if s >= 700 => dec!(18.9),
            Some(s) if s >= 650 => dec!(22.9),
            Some(_) => dec!(25.9),
            None => dec!(21.9),
        };
        let refinance_rate = match credit_score {
            Some(s) if s >= 750 => dec!(6.9),
            Some(s) if s >= 700 => dec!(9.9),
            Some(s) if s >= 650 => dec!(13.9),
            Some(_) => dec!(17.9),
            None => dec!(12.9),
        };

        vec![
            ConsolidationProduct {
                consolidation_type: ConsolidationType::PersonalLoan,
                interest_rate: Percentage::from_raw(personal_loan_rate),
                term_months: 60,
                intro_rate: None,
                fee_percentage: Percentage::ZERO,
            },
            ConsolidationProduct {
                consolidation_type: ConsolidationType::BalanceTransfer,
                interest_rate: Percentage::from_raw(transfer_rate),
                term_months: 18,
                intro_rate: Some((Percentage::ZERO, 18)),
                fee_percentage: Percentage::from_raw(dec!(3)),
            },
            ConsolidationProduct {
                consolidation_type: ConsolidationType::HomeEquityLoan,
                interest_rate: Percentage::from_raw(dec!(7.5)),
                term_months: 120,
                intro_rate: None,
                fee_percentage: Percentage::ZERO,
            },
            ConsolidationProduct {
                consolidation_type: ConsolidationType::DebtManagementPlan,
                interest_rate: Percentage::from_raw(dec!(8)),
                term_months: 60,
                intro_rate: None,
                fee_percentage: Percentage::ZERO,
            },
            ConsolidationProduct {
                consolidation_type: ConsolidationType::RefinancingProgram,
                interest_rate: Percentage::from_raw(refinance_rate),
                term_months: 84,
                intro_rate: None,
                fee_percentage: Percentage::ZERO,
            },
        ]
    }

    /// Rate charged in a 1-based month of the new loan
    fn rate_for_month(&self, month: u32) -> Percentage {
        match self.intro_rate {
            Some((intro, length)) if month <= length => intro,
            _ => self.interest_rate,
        }
    }
}

/// Balance-weighted average annual rate, `Σ(rate·balance) / Σ balance`
pub fn weighted_average_rate(debts: &[DebtAccount]) -> Percentage {
    let total = total_balance(debts);
    if total <= Decimal::ZERO {
        return Percentage::ZERO;
    }
    let weighted: Decimal = debts
        .iter()
        .map(|d| d.interest_rate.value() * d.balance.amount())
        .sum();
    Percentage::from_raw(round_storage(weighted / total))
}

/// Level payment that retires `principal` in `term_months`
///
/// `P·r(1+r)^n / ((1+r)^n − 1)`, or straight-line when the rate is zero.
pub fn level_payment(principal: Decimal, rate: Percentage, term_months: u32) -> Decimal {
    if term_months == 0 {
        return principal;
    }
    let n = Decimal::from(term_months);
    let r = rate.monthly_rate();
    if r.is_zero() {
        return principal / n;
    }
    let factor = (Decimal::ONE + r).powu(u64::from(term_months));
    principal * r * factor / (factor - Decimal::ONE)
}

fn credit_tier(credit_score: u32) -> Decimal {
    match credit_score {
        s if s >= 750 => dec!(40),
        s if s >= 700 => dec!(30),
        s if s >= 650 => dec!(20),
        s if s >= 600 => dec!(10),
        _ => Decimal::ZERO,
    }
}

/// Monthly minimum payments over monthly income
pub fn debt_to_income(debts: &[DebtAccount], annual_income: Decimal) -> Option<Decimal> {
    let monthly_income = annual_income / dec!(12);
    if monthly_income <= Decimal::ZERO {
        return None;
    }
    let minimums: Decimal = debts.iter().map(|d| d.minimum_payment.amount()).sum();
    Some(minimums / monthly_income)
}

fn dti_tier(dti: Option<Decimal>) -> Decimal {
    match dti {
        Some(r) if r <= dec!(0.20) => dec!(30),
        Some(r) if r <= dec!(0.30) => dec!(25),
        Some(r) if r <= dec!(0.40) => dec!(15),
        Some(r) if r <= dec!(0.50) => dec!(5),
        _ => Decimal::ZERO,
    }
}

fn product_bonus(kind: ConsolidationType, credit_score: u32, consolidated: Decimal) -> Decimal {
    match kind {
        ConsolidationType::BalanceTransfer => match credit_score {
            s if s >= 740 => dec!(30),
            s if s >= 700 => dec!(15),
            _ => Decimal::ZERO,
        },
        ConsolidationType::PersonalLoan => match credit_score {
            s if s >= 700 => dec!(30),
            s if s >= 650 => dec!(20),
            _ => dec!(10),
        },
        ConsolidationType::DebtManagementPlan => dec!(30),
        ConsolidationType::RefinancingProgram => {
            if credit_score >= 680 {
                dec!(30)
            } else {
                dec!(10)
            }
        }
        ConsolidationType::HomeEquityLoan => {
            if consolidated >= dec!(10000) {
                dec!(30)
            } else {
                dec!(15)
            }
        }
    }
}

/// Eligibility score (0..=100) for one product
pub fn eligibility_score(
    kind: ConsolidationType,
    profile: &UserProfile,
    debts: &[DebtAccount],
) -> Decimal {
    credit_tier(profile.credit_score)
        + dti_tier(debt_to_income(debts, profile.annual_income))
        + product_bonus(kind, profile.credit_score, total_balance(debts))
}

/// Debts a product would absorb
fn covered_debts(kind: ConsolidationType, debts: &[DebtAccount]) -> Vec<DebtAccount> {
    debts
        .iter()
        .filter(|d| d.balance.is_positive())
        .filter(|d| kind != ConsolidationType::BalanceTransfer || d.debt_type == DebtType::CreditCard)
        .cloned()
        .collect()
}

/// Months and total interest to retire `balance` under a product's terms
fn project_new_terms(
    balance: Decimal,
    product: &ConsolidationProduct,
    payment: Decimal,
    max_months: u32,
) -> (u32, Decimal) {
    let mut remaining = balance;
    let mut interest_total = Decimal::ZERO;
    let mut month = 0;

    while remaining > Decimal::ZERO && month < max_months {
        month += 1;
        let interest = round_storage(remaining * product.rate_for_month(month).monthly_rate());
        let owed = remaining + interest;
        remaining = owed - payment.min(owed);
        interest_total += interest;
    }

    (month, interest_total)
}

/// Minimum-only interest and months for the covered debts
///
/// A diverging baseline is measured over the full horizon: its first-month
/// interest repeated for `max_months`.
fn baseline(debts: &[DebtAccount], config: &SimulationConfig) -> Result<(u32, Decimal)> {
    match simulate_minimum_only(debts, config) {
        Ok(result) => Ok((result.payoff_months, result.total_interest.amount())),
        Err(err) if err.is_diverging() => {
            let monthly: Decimal = debts
                .iter()
                .map(|d| d.monthly_interest_charge().amount())
                .sum();
            Ok((config.max_months, monthly * Decimal::from(config.max_months)))
        }
        Err(err) => Err(err),
    }
}

fn risk_for(kind: ConsolidationType) -> RiskLevel {
    match kind {
        ConsolidationType::HomeEquityLoan => RiskLevel::High,
        ConsolidationType::BalanceTransfer | ConsolidationType::DebtManagementPlan => {
            RiskLevel::Moderate
        }
        ConsolidationType::PersonalLoan | ConsolidationType::RefinancingProgram => RiskLevel::Low,
    }
}

fn requirements_for(kind: ConsolidationType) -> Vec<String> {
    let items: &[&str] = match kind {
        ConsolidationType::PersonalLoan => &[
            "Credit score of 650 or higher",
            "Stable, verifiable income",
            "Debt-to-income ratio under 36%",
        ],
        ConsolidationType::BalanceTransfer => &[
            "Credit score of 700 or higher",
            "New card limit large enough for the transferred balance",
            "No new charges on the old cards",
        ],
        ConsolidationType::HomeEquityLoan => &[
            "Home equity of at least the consolidated balance",
            "Appraisal and income verification",
            "Good credit history",
        ],
        ConsolidationType::DebtManagementPlan => &[
            "Enrollment with a nonprofit credit counseling agency",
            "Closing enrolled credit card accounts",
        ],
        ConsolidationType::RefinancingProgram => &[
            "Credit score of 680 or higher",
            "On-time payment history on the existing loans",
        ],
    };
    items.iter().map(|s| (*s).to_string()).collect()
}

fn pros_and_cons(
    product: &ConsolidationProduct,
    current_rate: Percentage,
    payment: Money,
    savings: Decimal,
    time_savings: i64,
    eligibility: Decimal,
) -> ConsolidationAnalysis {
    let mut advantages = vec![format!("Single monthly payment of {payment}")];
    let mut disadvantages = Vec::new();

    if product.interest_rate < current_rate {
        advantages.push(format!(
            "Rate drops from {current_rate} to {}",
            product.interest_rate
        ));
    } else {
        disadvantages.push(format!(
            "Rate of {} is not below the current average of {current_rate}",
            product.interest_rate
        ));
    }
    if let Some((intro, months)) = product.intro_rate {
        advantages.push(format!("{intro} introductory rate for {months} months"));
        disadvantages.push(format!(
            "Rate rises to {} after the introductory period",
            product.interest_rate
        ));
    }
    if savings > Decimal::ZERO {
        advantages.push(format!("Saves {savings:.2} in interest"));
    } else {
        disadvantages.push(format!("Costs {:.2} more in interest", -savings));
    }
    match time_savings {
        t if t > 0 => advantages.push(format!("Debt-free {t} months sooner")),
        t if t < 0 => disadvantages.push(format!("Takes {} months longer", -t)),
        _ => {}
    }
    if !product.fee_percentage.value().is_zero() {
        disadvantages.push(format!("{} up-front fee", product.fee_percentage));
    }
    match product.consolidation_type {
        ConsolidationType::HomeEquityLoan => {
            disadvantages.push("Home is collateral; missed payments risk foreclosure".to_string());
        }
        ConsolidationType::DebtManagementPlan => {
            disadvantages.push("Enrolled accounts are usually closed".to_string());
        }
        _ => {}
    }

    let recommendation_score = if savings <= Decimal::ZERO {
        (eligibility - SCORE_PENALTY_NO_SAVINGS).max(Decimal::ZERO)
    } else {
        eligibility
    };

    ConsolidationAnalysis {
        advantages,
        disadvantages,
        recommendation_score,
        risk_assessment: risk_for(product.consolidation_type),
    }
}

/// Evaluate candidate products against the debt set
///
/// Returns opportunities sorted by recommendation score, highest first. The
/// list is empty when no product clears the eligibility threshold.
pub fn analyze(
    debts: &[DebtAccount],
    products: &[ConsolidationProduct],
    profile: &UserProfile,
    config: &ConsolidationConfig,
) -> Result<Vec<ConsolidationOpportunity>> {
    let currency = validate_debts(debts)?;
    let current_rate = weighted_average_rate(debts);
    let mut opportunities = Vec::new();

    for product in products {
        let kind = product.consolidation_type;
        let eligibility = eligibility_score(kind, profile, debts);
        if eligibility < config.min_eligibility_score {
            tracing::debug!(%kind, %eligibility, "product below eligibility threshold");
            continue;
        }

        let covered = covered_debts(kind, debts);
        let covered_balance = total_balance(&covered);
        if covered.is_empty()
            || covered_balance <= Decimal::ZERO
            || covered_balance < config.min_consolidation_balance
        {
            continue;
        }

        let consolidated =
            round_storage(covered_balance * (Decimal::ONE + product.fee_percentage.as_fraction()));
        let first_rate = match product.intro_rate {
            Some((intro, length)) if length >= product.term_months => intro,
            _ => product.interest_rate,
        };
        let payment = level_payment(consolidated, first_rate, product.term_months)
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::ToPositiveInfinity);

        let (base_months, base_interest) = baseline(&covered, &config.simulation)?;
        let (new_months, new_interest) =
            project_new_terms(consolidated, product, payment, config.simulation.max_months);

        let savings = base_interest - new_interest;
        let time_savings = i64::from(base_months) - i64::from(new_months);
        let payment = Money::new(payment, currency);

        opportunities.push(ConsolidationOpportunity {
            consolidation_type: kind,
            consolidated_balance: Money::new(consolidated, currency),
            new_interest_rate: product.interest_rate,
            new_monthly_payment: payment,
            total_interest_savings: Money::new(savings, currency),
            time_savings_months: time_savings,
            eligibility_requirements: requirements_for(kind),
            pros_and_cons: pros_and_cons(
                product,
                current_rate,
                payment,
                savings,
                time_savings,
                eligibility,
            ),
        });
    }

    opportunities.sort_by(|a, b| {
        b.pros_and_cons
            .recommendation_score
            .cmp(&a.pros_and_cons.recommendation_score)
    });

    tracing::debug!(
        candidates = products.len(),
        eligible = opportunities.len(),
        "consolidation analyzed"
    );
    Ok(opportunities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebtBuilder;

    #[test]
    fn test_level_payment() {
        // 10,000 at 12% over 12 months
        let payment = level_payment(dec!(10000), Percentage::from_raw(dec!(12)), 12);
        assert_eq!(payment.round_dp(2), dec!(888.49));

        let flat = level_payment(dec!(1800), Percentage::ZERO, 18);
        assert_eq!(flat, dec!(100));
    }

    #[test]
    fn test_weighted_average_rate() {
        let debts = vec![
            DebtBuilder::credit_card("Low")
                .balance(dec!(1000))
                .apr(dec!(10))
                .build(),
            DebtBuilder::credit_card("High")
                .balance(dec!(3000))
                .apr(dec!(20))
                .build(),
        ];
        assert_eq!(weighted_average_rate(&debts).value(), dec!(17.5));
    }

    #[test]
    fn test_eligibility_tiers() {
        let debts = vec![
            DebtBuilder::credit_card("Card")
                .balance(dec!(6000))
                .apr(dec!(22))
                .minimum_payment(dec!(1000))
                .build(),
        ];
        // 1000 / 5000 monthly income = 20% DTI
        let profile = UserProfile {
            credit_score: 745,
            annual_income: dec!(60000),
        };
        assert_eq!(
            eligibility_score(ConsolidationType::BalanceTransfer, &profile, &debts),
            dec!(90)
        );
        assert_eq!(
            eligibility_score(ConsolidationType::HomeEquityLoan, &profile, &debts),
            dec!(75)
        );
    }

    #[test]
    fn test_catalogue_tiers_by_score() {
        let excellent = ConsolidationProduct::catalogue(Some(780));
        let unknown = ConsolidationProduct::catalogue(None);
        assert_eq!(excellent.len(), 5);
        assert_eq!(excellent[0].interest_rate.value(), dec!(8.5));
        assert_eq!(unknown[0].interest_rate.value(), dec!(15));
        assert_eq!(excellent[1].fee_percentage.value(), dec!(3));
    }
}
