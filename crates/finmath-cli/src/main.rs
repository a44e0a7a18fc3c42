mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::compound_interest::CompoundInterestArgs;
use commands::humanize::HumanizeArgs;
use commands::renegotiation::RenegotiateArgs;
use commands::simple_interest::SimpleInterestArgs;
use commands::solve::{AnalyzeArgs, SolveArgs};

/// Decimal-precise financial mathematics for interest and debt problems
#[derive(Parser)]
#[command(
    name = "finmath",
    version,
    about = "Decimal-precise financial mathematics for interest and debt problems",
    long_about = "A CLI for solving classroom financial-mathematics problems with decimal \
                  precision. Supports simple interest, compound interest, debt \
                  renegotiation through an equation of value, and dispatching of \
                  extracted problem records."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log solver decisions to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a simple-interest problem (capital, amount, rate, time or interest)
    SimpleInterest(SimpleInterestArgs),
    /// Solve a compound-interest problem (capital or amount)
    CompoundInterest(CompoundInterestArgs),
    /// Solve a debt renegotiation for the unknown payment x
    Renegotiate(RenegotiateArgs),
    /// Route a tagged problem record to its solver
    Solve(SolveArgs),
    /// Solve an extraction and wrap it in an analysis report
    Analyze(AnalyzeArgs),
    /// Render a month count as years, months and days
    Humanize(HumanizeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "finmath_core=debug,finmath=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stderr keeps stdout clean for piping results
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::SimpleInterest(args) => commands::simple_interest::run_simple_interest(args),
        Commands::CompoundInterest(args) => commands::compound_interest::run_compound_interest(args),
        Commands::Renegotiate(args) => commands::renegotiation::run_renegotiate(args),
        Commands::Solve(args) => commands::solve::run_solve(args),
        Commands::Analyze(args) => commands::solve::run_analyze(args),
        Commands::Humanize(args) => commands::humanize::run_humanize(args),
        Commands::Version => {
            println!("finmath {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
