mod commands;
mod infra;
mod obs;

use clap::{Parser, Subcommand};
use commands::{AddArgs, Command};
use std::path::PathBuf;
use tradelog_domain::value_objects::direction::Direction;

#[derive(Parser)]
#[command(name = "tradelog")]
#[command(about = "Personal trading journal over a versioned CSV store", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  tradelog add --symbol BTCUSDT.P --direction long --entry 100 --stop 95 --take-profit 115\n  tradelog close --index 0 --exit 110.5\n  tradelog list --session London\n  tradelog export --out journal_export.csv\n"
)]
struct Cli {
    /// Config file path (TOML). If omitted, uses env TRADELOG_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (overridden by env TRADELOG_LOG).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log format: text | json
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Record a new trade entry.
    Add {
        /// Trade date (YYYY-MM-DD, default: today).
        #[arg(long)]
        date: Option<String>,
        /// Local entry time (HH:MM, default: now). Determines the session label.
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        symbol: String,
        /// long | short
        #[arg(long)]
        direction: Direction,
        /// Daily bias label (e.g. Bullish, Bearish, Neutral).
        #[arg(long, default_value = "")]
        bias: String,
        /// Zone/level label (e.g. FVG, Orderblock, Liquidity Sweep).
        #[arg(long, default_value = "")]
        level: String,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        take_profit: f64,
        #[arg(long, default_value = "")]
        comment: String,
        /// Screenshot file to attach to this trade.
        #[arg(long)]
        screenshot: Option<PathBuf>,
    },
    /// Annotate a recorded trade with its exit price and result.
    Close {
        /// Row index from `tradelog list`, counted from the most recent trade.
        #[arg(long)]
        index: usize,
        #[arg(long)]
        exit: f64,
    },
    /// Print the journal, newest first.
    List {
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        direction: Option<Direction>,
    },
    /// Write the journal to a local CSV file.
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = obs::init_tracing(&cli.log_level, &cli.log_format) {
        eprintln!("tradelog: {err}");
        std::process::exit(1);
    }

    let command = match cli.command {
        CliCommand::Add {
            date,
            time,
            symbol,
            direction,
            bias,
            level,
            entry,
            stop,
            take_profit,
            comment,
            screenshot,
        } => Command::Add(AddArgs {
            date,
            time,
            symbol,
            direction,
            bias,
            level,
            entry,
            stop,
            take_profit,
            comment,
            screenshot,
        }),
        CliCommand::Close { index, exit } => Command::Close { index, exit },
        CliCommand::List { session, direction } => Command::List { session, direction },
        CliCommand::Export { out } => Command::Export { out },
    };

    if let Err(err) = commands::run(command, cli.config) {
        tracing::error!(error = %err, "command failed");
        eprintln!("tradelog: {err}");
        std::process::exit(1);
    }
}
