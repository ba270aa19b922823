use std::io;

use clap::Parser;
use debtplan::cli::Args;
use debtplan::plan::PlanFile;
use debtplan::{commands, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let today = jiff::Zoned::now().date();
    let plan = PlanFile::load(&args.plan)?.into_plan(today);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&args.command, &plan, args.json, &mut out)?;

    tracing::debug!("done");
    Ok(())
}
