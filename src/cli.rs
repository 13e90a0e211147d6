use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ETF analytics: overlap, momentum, correlation, expense projection, rebasing
#[derive(Parser)]
#[command(name = "etf_analytics")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pairwise holdings overlap for 2-5 funds
    Overlap(InputArgs),

    /// Rank funds by momentum score
    HotCold(HotColdArgs),

    /// Pearson correlation of two return series
    Correlate(InputArgs),

    /// Compare compounding cost of two expense ratios
    Expense(ExpenseArgs),

    /// Rebase a price series to 100
    Normalize(InputArgs),

    /// Trailing 1W/1M/3M/YTD/1Y price changes
    PriceChanges(PriceChangesArgs),

    /// Run a single tagged request file
    Run(InputArgs),

    /// Run many tagged request files concurrently, one JSON line per file
    Batch(BatchArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// JSON input file, or `-` for stdin
    pub input: PathBuf,
}

#[derive(Args)]
pub struct HotColdArgs {
    /// JSON array of fund snapshots, or `-` for stdin
    pub input: PathBuf,

    /// Only rank funds in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum rows returned
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ExpenseArgs {
    /// Amount invested
    #[arg(long, default_value_t = 100_000.0)]
    pub principal: f64,

    /// Projection horizon in years
    #[arg(long, default_value_t = 30)]
    pub years: u32,

    /// Expense ratio of fund A as a decimal (0.0003 = 0.03%)
    #[arg(long)]
    pub er_a: f64,

    /// Expense ratio of fund B as a decimal
    #[arg(long)]
    pub er_b: f64,

    /// Gross annual return; defaults to ANNUAL_RETURN from the environment
    #[arg(long)]
    pub annual_return: Option<f64>,
}

#[derive(Args)]
pub struct PriceChangesArgs {
    /// JSON array of {date, close} points, or `-` for stdin
    pub input: PathBuf,

    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Request files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write JSON lines here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_expense_args_parse() {
        let cli = Cli::try_parse_from([
            "etf_analytics", "expense", "--er-a", "0.0003", "--er-b", "0.0009", "--years", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Expense(args) => {
                assert_eq!(args.years, 5);
                assert_eq!(args.principal, 100_000.0);
                assert!(args.annual_return.is_none());
            }
            _ => panic!("expected expense command"),
        }
    }

    #[test]
    fn test_batch_requires_inputs() {
        assert!(Cli::try_parse_from(["etf_analytics", "batch"]).is_err());
    }
}
