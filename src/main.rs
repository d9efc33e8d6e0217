use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use spend_ledger::cli::{
    handle_chart_command, handle_demo_command, handle_export_command, handle_run_command,
    handle_show_command, handle_summary_command,
};
use spend_ledger::config::{LedgerPaths, Settings};
use spend_ledger::export::ExportFormat;

#[derive(Parser)]
#[command(
    name = "ledger",
    author = "Kaylee Beyene",
    version,
    about = "Category ledgers with a terminal spend chart",
    long_about = "spend-ledger keeps a ledger per budget category, replays \
                  deposits, withdrawals and transfers from a session script, \
                  and draws how spending is split across categories."
)]
struct Cli {
    /// Log level (RUST_LOG takes precedence when set)
    #[arg(long, global = true, env = "LEDGER_LOG_LEVEL")]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session script and print every ledger and the spend chart
    Run {
        /// Path to a YAML or JSON session script
        script: PathBuf,
        /// Fail on the first operation rejected for insufficient funds
        #[arg(long)]
        strict: bool,
        /// Do not print the spend chart
        #[arg(long)]
        no_chart: bool,
    },

    /// Print only the spend chart for a session script
    Chart {
        /// Path to a YAML or JSON session script
        script: PathBuf,
        /// Print each category's share as CSV instead of drawing the chart
        #[arg(long)]
        csv: bool,
    },

    /// Print a table of balances and withdrawal shares
    Summary {
        /// Path to a YAML or JSON session script
        script: PathBuf,
    },

    /// Export the ledgers produced by a session script
    Export {
        /// Path to a YAML or JSON session script
        script: PathBuf,
        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write into the exports directory, named after the script
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },

    /// Print the ledgers and spend chart stored in a JSON or YAML snapshot
    Show {
        /// Path to a snapshot written by `ledger export`
        snapshot: PathBuf,
    },

    /// Run the built-in demonstration
    Demo,

    /// Write a default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings problems only abort the commands that need the settings directory
    let paths = LedgerPaths::new();
    let (settings, settings_error) = match &paths {
        Ok(paths) => match Settings::load_or_create(paths) {
            Ok(settings) => (settings, None),
            Err(e) => (Settings::default(), Some(e.to_string())),
        },
        Err(e) => (Settings::default(), Some(e.to_string())),
    };

    let (level, level_error) = match (cli.log_level, settings.log_level_filter()) {
        (Some(level), _) => (level, None),
        (None, Ok(level)) => (level, None),
        (None, Err(e)) => (LevelFilter::WARN, Some(e.to_string())),
    };
    init_logger(level);
    for error in settings_error.iter().chain(level_error.iter()) {
        warn!(%error, "using default settings");
    }
    if let Ok(paths) = &paths {
        debug!(base_dir = %paths.base_dir().display(), "settings loaded");
    }

    match cli.command {
        Some(Commands::Run {
            script,
            strict,
            no_chart,
        }) => handle_run_command(&settings, &script, strict, no_chart)?,
        Some(Commands::Chart { script, csv }) => handle_chart_command(&script, csv)?,
        Some(Commands::Summary { script }) => handle_summary_command(&script)?,
        Some(Commands::Export {
            script,
            format,
            output,
            save,
        }) => {
            let exports = if save { Some(paths?) } else { None };
            handle_export_command(&settings, &script, format, output, exports.as_ref())?
        }
        Some(Commands::Show { snapshot }) => handle_show_command(&settings, &snapshot)?,
        Some(Commands::Demo) => handle_demo_command()?,
        Some(Commands::Init) => {
            let paths = paths?;
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("spend-ledger Configuration");
            println!("==========================");
            match &paths {
                Ok(paths) => {
                    println!("Base directory:    {}", paths.base_dir().display());
                    println!("Settings file:     {}", paths.settings_file().display());
                    println!("Exports directory: {}", paths.exports_dir().display());
                }
                Err(e) => println!("Base directory:    unavailable ({})", e),
            }
            println!();
            println!("Settings:");
            println!("  Log level:             {}", settings.log_level);
            println!("  Show chart:            {}", settings.show_chart);
            println!("  Default export format: {}", settings.default_export_format);
        }
        None => {
            println!("spend-ledger - Category ledgers with a terminal spend chart");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger demo' to see an example.");
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber
///
/// Logs go to stderr so ledger and chart output on stdout stays exact.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "spend_ledger={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
