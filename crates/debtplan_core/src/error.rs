use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Currency, DebtId, Strategy};

/// Errors raised while validating caller-supplied inputs, before any simulation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputError {
    NoDebts,
    DuplicateDebtId(DebtId),
    NegativeBalance(DebtId),
    NegativeRate(DebtId),
    NegativeMinimumPayment(DebtId),
    NegativeExtraPayment(Decimal),
    NegativePercentage(Decimal),
    /// Milestone threshold outside 0..=100
    InvalidThreshold(Decimal),
    /// Target payoff horizon of zero months, or a date not after the start date
    InvalidTarget(String),
    /// Start date plus the month cap runs past the last representable date
    HorizonOutOfRange { start_date: Date, max_months: u32 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoDebts => write!(f, "at least one debt account is required"),
            InputError::DuplicateDebtId(id) => write!(f, "debt {id:?} appears more than once"),
            InputError::NegativeBalance(id) => write!(f, "debt {id:?} has a negative balance"),
            InputError::NegativeRate(id) => {
                write!(f, "debt {id:?} has a negative interest rate")
            }
            InputError::NegativeMinimumPayment(id) => {
                write!(f, "debt {id:?} has a negative minimum payment")
            }
            InputError::NegativeExtraPayment(amount) => {
                write!(f, "extra payment {amount} is negative")
            }
            InputError::NegativePercentage(value) => {
                write!(f, "percentage {value} is negative")
            }
            InputError::InvalidThreshold(value) => {
                write!(f, "milestone threshold {value} is outside 0..=100")
            }
            InputError::InvalidTarget(reason) => write!(f, "invalid payoff target: {reason}"),
            InputError::HorizonOutOfRange {
                start_date,
                max_months,
            } => write!(
                f,
                "{max_months} months from {start_date} is past the last supported date"
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Errors from money arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoneyError {
    CurrencyMismatch { expected: Currency, actual: Currency },
    DivisionByZero,
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::CurrencyMismatch { expected, actual } => {
                write!(f, "currency mismatch: expected {expected}, found {actual}")
            }
            MoneyError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for MoneyError {}

/// Top-level error returned across the simulate/compare/analyze boundary
///
/// Every variant is plain data so batch operations can carry a failure per
/// scenario instead of aborting the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineError {
    InvalidInput(InputError),
    Money(MoneyError),
    /// Minimum payments cannot amortize the debt set
    Diverging {
        /// Month in which divergence was detected
        month: u32,
        /// Debts whose balance did not decrease that month
        debt_ids: Vec<DebtId>,
        /// Aggregate balance outstanding at detection time
        remaining_balance: Decimal,
    },
    /// The target payoff horizon cannot be met within the search bound
    Unreachable {
        target_months: u32,
        /// Best payoff horizon achieved at the upper bound, if any
        best_months: Option<u32>,
        upper_bound: Decimal,
    },
    /// Custom strategy selected without priority weights
    StrategyNotConfigured(Strategy),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput(e) => write!(f, "invalid input: {e}"),
            EngineError::Money(e) => write!(f, "{e}"),
            EngineError::Diverging {
                month,
                debt_ids,
                remaining_balance,
            } => write!(
                f,
                "debts never pay off: balance {remaining_balance} stopped decreasing in month {month} (debts {debt_ids:?})"
            ),
            EngineError::Unreachable {
                target_months,
                best_months,
                upper_bound,
            } => match best_months {
                Some(best) => write!(
                    f,
                    "payoff in {target_months} months is unreachable: extra payment {upper_bound} still takes {best} months"
                ),
                None => write!(
                    f,
                    "payoff in {target_months} months is unreachable: extra payment {upper_bound} never pays off"
                ),
            },
            EngineError::StrategyNotConfigured(strategy) => {
                write!(f, "{strategy} strategy requires priority weights")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidInput(e) => Some(e),
            EngineError::Money(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InputError> for EngineError {
    fn from(err: InputError) -> Self {
        EngineError::InvalidInput(err)
    }
}

impl From<MoneyError> for EngineError {
    fn from(err: MoneyError) -> Self {
        EngineError::Money(err)
    }
}

impl EngineError {
    /// True when the error reports a debt set that never pays off
    #[must_use]
    pub fn is_diverging(&self) -> bool {
        matches!(self, EngineError::Diverging { .. })
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
