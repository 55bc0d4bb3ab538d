use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, features::FeaturesArg};

mod analyze;
mod features;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Report tile class, blast threats, safety and scoring potential of every cell
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Extract the default feature vector of players
    Features(#[clap(flatten)] FeaturesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
    }
    Ok(())
}
