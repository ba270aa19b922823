//! Creditor negotiation opportunities
//!
//! Flags debts that creditors commonly renegotiate and estimates what asking
//! could be worth. Estimates are rules of thumb per debt type, not offers.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::{DebtAccount, DebtId, DebtType, Money, Percentage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NegotiationType {
    InterestRateReduction,
    BalanceSettlement,
    PaymentPlanModification,
}

impl fmt::Display for NegotiationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NegotiationType::InterestRateReduction => "Interest Rate Reduction",
            NegotiationType::BalanceSettlement => "Balance Settlement",
            NegotiationType::PaymentPlanModification => "Payment Plan Modification",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationOpportunity {
    pub debt_id: DebtId,
    pub debt_name: String,
    pub current_balance: Money,
    pub negotiation_type: NegotiationType,
    pub potential_savings: Money,
    pub success_probability: Percentage,
    pub negotiation_strategy: String,
    pub talking_points: Vec<String>,
    pub required_preparation: Vec<String>,
}

/// Type, savings share of the balance (%), and success probability (%)
fn terms_for(debt: &DebtAccount) -> (NegotiationType, Decimal, Decimal) {
    match debt.debt_type {
        DebtType::CreditCard if debt.balance.amount() > dec!(5000) => {
            (NegotiationType::InterestRateReduction, dec!(20), dec!(70))
        }
        DebtType::CreditCard => (NegotiationType::PaymentPlanModification, dec!(10), dec!(60)),
        DebtType::MedicalDebt => (NegotiationType::BalanceSettlement, dec!(40), dec!(80)),
        DebtType::PersonalLoan => (NegotiationType::InterestRateReduction, dec!(15), dec!(50)),
        _ => (NegotiationType::PaymentPlanModification, dec!(5), dec!(30)),
    }
}

fn strategy_text(kind: NegotiationType) -> String {
    let text = match kind {
        NegotiationType::InterestRateReduction => {
            "Call the creditor and ask for a lower APR, citing your payment history and competing offers"
        }
        NegotiationType::BalanceSettlement => {
            "Offer a lump-sum payment for part of the balance, commonly 40-60% of what is owed"
        }
        NegotiationType::PaymentPlanModification => {
            "Ask for a longer term or a lower required payment while the balance is paid down"
        }
    };
    text.to_string()
}

fn talking_points(debt: &DebtAccount, kind: NegotiationType) -> Vec<String> {
    let mut points = vec![
        format!("I want to resolve the {} account", debt.name),
        "I have kept up with payments as best I can".to_string(),
    ];
    match kind {
        NegotiationType::InterestRateReduction => {
            points.push(format!(
                "My current rate of {} is above what competitors are offering",
                debt.interest_rate
            ));
            points.push("A lower rate lets me pay the balance off sooner".to_string());
        }
        NegotiationType::BalanceSettlement => {
            points.push("I can pay a reduced amount in one payment now".to_string());
            points.push("The settlement would close the account in full".to_string());
        }
        NegotiationType::PaymentPlanModification => {}
    }
    if !debt.amortizes() {
        points.push(format!(
            "My minimum payment of {} does not cover the {} of monthly interest",
            debt.minimum_payment,
            debt.monthly_interest_charge()
        ));
    }
    points
}

fn preparation_steps(kind: NegotiationType) -> Vec<String> {
    let mut steps = vec![
        "Collect recent statements and your payment history".to_string(),
        "Look up current rates for comparable products".to_string(),
        "Write down a short summary of your financial situation".to_string(),
    ];
    if kind == NegotiationType::BalanceSettlement {
        steps.push("Have the settlement funds ready before calling".to_string());
        steps.push("Get the agreement in writing before paying".to_string());
    }
    steps
}

/// Negotiation opportunities for each qualifying debt, in input order
///
/// Qualifying: credit cards over 1,000, any medical debt, personal loans
/// over 5,000.
pub fn opportunities(debts: &[DebtAccount]) -> Vec<NegotiationOpportunity> {
    debts
        .iter()
        .filter(|d| d.qualifies_for_negotiation())
        .map(|debt| {
            let (kind, savings_pct, success_pct) = terms_for(debt);
            NegotiationOpportunity {
                debt_id: debt.id,
                debt_name: debt.name.clone(),
                current_balance: debt.balance,
                negotiation_type: kind,
                potential_savings: debt.balance.scale(savings_pct / dec!(100)),
                success_probability: Percentage::from_raw(success_pct),
                negotiation_strategy: strategy_text(kind),
                talking_points: talking_points(debt, kind),
                required_preparation: preparation_steps(kind),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebtBuilder;

    #[test]
    fn test_only_qualifying_debts_are_listed() {
        let debts = vec![
            DebtBuilder::credit_card("Big Card")
                .id(DebtId(0))
                .balance(dec!(8000))
                .apr(dec!(24.99))
                .build(),
            DebtBuilder::credit_card("Small Card")
                .id(DebtId(1))
                .balance(dec!(400))
                .build(),
            DebtBuilder::medical_debt("Hospital")
                .id(DebtId(2))
                .balance(dec!(2500))
                .build(),
            DebtBuilder::mortgage("House")
                .id(DebtId(3))
                .balance(dec!(250000))
                .build(),
        ];

        let found = opportunities(&debts);
        let ids: Vec<_> = found.iter().map(|o| o.debt_id).collect();
        assert_eq!(ids, vec![DebtId(0), DebtId(2)]);

        assert_eq!(found[0].negotiation_type, NegotiationType::InterestRateReduction);
        assert_eq!(found[0].potential_savings.amount(), dec!(1600));
        assert_eq!(found[1].negotiation_type, NegotiationType::BalanceSettlement);
        assert_eq!(found[1].potential_savings.amount(), dec!(1000));
        assert_eq!(found[1].required_preparation.len(), 5);
    }

    #[test]
    fn test_mid_size_card_gets_plan_modification() {
        let debts = vec![
            DebtBuilder::credit_card("Card")
                .balance(dec!(3000))
                .build(),
        ];
        let found = opportunities(&debts);
        assert_eq!(found[0].negotiation_type, NegotiationType::PaymentPlanModification);
        assert_eq!(found[0].success_probability.value(), dec!(60));
    }

    #[test]
    fn test_growing_balance_is_a_talking_point() {
        let debts = vec![
            DebtBuilder::credit_card("Card")
                .balance(dec!(12000))
                .apr(dec!(29.99))
                .minimum_payment(dec!(250))
                .build(),
        ];
        let found = opportunities(&debts);
        let last = found[0].talking_points.last().unwrap();
        assert!(last.contains("does not cover"));

        let debts = vec![
            DebtBuilder::credit_card("Card")
                .balance(dec!(12000))
                .apr(dec!(29.99))
                .minimum_payment(dec!(400))
                .build(),
        ];
        let found = opportunities(&debts);
        assert!(found[0].talking_points.iter().all(|p| !p.contains("does not cover")));
    }
}
