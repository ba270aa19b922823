use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use debtplan_core::model::Strategy;
use debtplan_core::scenario::PsychologicalPreference;
use jiff::civil::Date;
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "debtplan")]
#[command(about = "Plan, compare, and optimize debt payoff")]
pub struct Args {
    /// Path to the YAML plan file
    #[arg(short, long, global = true, default_value = "plan.yaml")]
    pub plan: PathBuf,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Simulate the plan month by month
    Simulate {
        /// Override the plan's strategy
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Override the plan's extra payment
        #[arg(short, long)]
        extra: Option<Decimal>,

        /// Print every month of the schedule
        #[arg(long)]
        schedule: bool,
    },

    /// Compare avalanche and snowball and recommend one
    Compare {
        #[arg(short, long)]
        extra: Option<Decimal>,

        #[arg(long, value_enum, default_value_t = PreferenceArg::Balanced)]
        preference: PreferenceArg,
    },

    /// Simulate a list of extra-payment amounts
    Sweep {
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Comma-separated amounts, e.g. 0,100,250
        #[arg(short, long, value_delimiter = ',', required = true)]
        amounts: Vec<Decimal>,
    },

    /// Find the smallest extra payment that meets a payoff target
    Solve {
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Target payoff horizon in months
        #[arg(short, long, required_unless_present = "date", conflicts_with = "date")]
        months: Option<u32>,

        /// Target payoff date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<Date>,

        /// Largest extra payment to search (default: total balance)
        #[arg(long)]
        upper_bound: Option<Decimal>,
    },

    /// Score consolidation products against the plan's debts
    Consolidate {
        /// Skip products whose consolidated balance is below this amount
        #[arg(long)]
        min_balance: Option<Decimal>,
    },

    /// Percentage-paid and per-debt payoff milestones
    Milestones {
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        #[arg(short, long)]
        extra: Option<Decimal>,

        /// Comma-separated percentages (default: 25,50,75,90,100)
        #[arg(short, long, value_delimiter = ',')]
        thresholds: Vec<Decimal>,
    },

    /// List debts worth negotiating with the creditor
    Negotiate,
}

impl Command {
    /// Whether text output should include the month-by-month schedule
    pub fn show_schedule(&self) -> bool {
        matches!(self, Command::Simulate { schedule: true, .. })
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Avalanche,
    Snowball,
    Custom,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Avalanche => Strategy::Avalanche,
            StrategyArg::Snowball => Strategy::Snowball,
            StrategyArg::Custom => Strategy::Custom,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceArg {
    QuickWins,
    Mathematical,
    Balanced,
}

impl From<PreferenceArg> for PsychologicalPreference {
    fn from(arg: PreferenceArg) -> Self {
        match arg {
            PreferenceArg::QuickWins => PsychologicalPreference::QuickWins,
            PreferenceArg::Mathematical => PsychologicalPreference::Mathematical,
            PreferenceArg::Balanced => PsychologicalPreference::Balanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_sweep_amounts() {
        let args = Args::parse_from(["debtplan", "sweep", "--amounts", "0,100,250.50"]);
        match args.command {
            Command::Sweep { amounts, strategy } => {
                assert_eq!(amounts, vec![dec!(0), dec!(100), dec!(250.50)]);
                assert!(strategy.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(args.plan, PathBuf::from("plan.yaml"));
    }

    #[test]
    fn test_parse_solve_by_date() {
        let args = Args::parse_from([
            "debtplan",
            "--json",
            "solve",
            "--date",
            "2027-06-01",
            "--strategy",
            "snowball",
        ]);
        assert!(args.json);
        match args.command {
            Command::Solve {
                months,
                date,
                strategy,
                ..
            } => {
                assert_eq!(months, None);
                assert_eq!(date, Some(jiff::civil::date(2027, 6, 1)));
                assert_eq!(strategy, Some(StrategyArg::Snowball));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_solve_needs_a_target() {
        assert!(Args::try_parse_from(["debtplan", "solve"]).is_err());
        assert!(
            Args::try_parse_from(["debtplan", "solve", "--months", "12", "--date", "2027-01-01"])
                .is_err()
        );
    }

    #[test]
    fn test_preference_names() {
        let args = Args::parse_from(["debtplan", "compare", "--preference", "quick-wins"]);
        assert!(matches!(
            args.command,
            Command::Compare {
                preference: PreferenceArg::QuickWins,
                ..
            }
        ));
    }
}
