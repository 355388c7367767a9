use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "dealgauge",
    version,
    about = "Deal qualification and intent signal scoring for sales pipelines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Check(RunArgs),
    Init(InitArgs),
    Classify(ClassifyArgs),
    Bant {
        #[command(subcommand)]
        command: BantSubcommand,
    },
    Meddpicc {
        #[command(subcommand)]
        command: MeddpiccSubcommand,
    },
    Signals {
        #[command(subcommand)]
        command: SignalsSubcommand,
    },
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[arg(long, default_value = "deals.json")]
    pub input: PathBuf,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// One-shot classification without a deal book: either a single
/// --value/--max pair, or repeated --dim specs aggregated together.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub value: Option<f64>,
    #[arg(long)]
    pub max: Option<f64>,
    #[arg(long, default_value = "quality")]
    pub scale: String,
    #[arg(long = "dim", value_name = "NAME=VALUE/MAX")]
    pub dimensions: Vec<String>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum BantSubcommand {
    Score(RunArgs),
}

#[derive(Debug, Subcommand)]
pub enum MeddpiccSubcommand {
    Score(RunArgs),
}

#[derive(Debug, Subcommand)]
pub enum SignalsSubcommand {
    Classify(RunArgs),
}
