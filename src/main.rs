mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use etf_analytics::analytics::momentum::FundSnapshot;
use etf_analytics::analytics::{FundHoldings, PricePoint};
use etf_analytics::batch::{read_json, read_request, run_batch};
use etf_analytics::config::AppConfig;
use etf_analytics::dispatch::dispatch;
use etf_analytics::errors::{AnalyticsError, AnalyticsResult};
use etf_analytics::state::AnalyticsRequest;

/// Input of the `correlate` command
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesPair {
    series_a: Vec<f64>,
    series_b: Vec<f64>,
}

#[tokio::main]
async fn main() {
    // Results go to stdout, so logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, &cfg).await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cfg: &AppConfig) -> AnalyticsResult<()> {
    let request = match cli.command {
        Commands::Overlap(args) => {
            let funds: Vec<FundHoldings> = read_json(&args.input).await?;
            AnalyticsRequest::Overlap { funds }
        }
        Commands::HotCold(args) => {
            let funds: Vec<FundSnapshot> = read_json(&args.input).await?;
            AnalyticsRequest::HotCold {
                funds,
                category: args.category,
                limit: args.limit,
            }
        }
        Commands::Correlate(args) => {
            let pair: SeriesPair = read_json(&args.input).await?;
            AnalyticsRequest::Correlation {
                series_a: pair.series_a,
                series_b: pair.series_b,
            }
        }
        Commands::Expense(args) => AnalyticsRequest::Expense {
            principal: args.principal,
            years: args.years,
            expense_ratio_a: args.er_a,
            expense_ratio_b: args.er_b,
            annual_return: args.annual_return,
        },
        Commands::Normalize(args) => {
            let prices: Vec<PricePoint> = read_json(&args.input).await?;
            AnalyticsRequest::Normalize { prices }
        }
        Commands::PriceChanges(args) => {
            let prices: Vec<PricePoint> = read_json(&args.input).await?;
            AnalyticsRequest::PriceChanges {
                prices,
                as_of: args.as_of,
            }
        }
        Commands::Run(args) => read_request(&args.input).await?,
        Commands::Batch(args) => {
            let summary = match args.output {
                Some(path) => {
                    let file = tokio::fs::File::create(&path)
                        .await
                        .map_err(|e| AnalyticsError::Io(format!("{}: {e}", path.display())))?;
                    run_batch(args.inputs, file, cfg).await?
                }
                None => run_batch(args.inputs, tokio::io::stdout(), cfg).await?,
            };
            if summary.failed > 0 {
                tracing::warn!(failed = summary.failed, "some batch requests failed");
            }
            return Ok(());
        }
    };

    let response = dispatch(request, cfg)?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");
    Ok(())
}
