use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use finance_tracker::cli::{handle_transaction_command, Menu, TransactionCommands};
use finance_tracker::config::paths::DATA_DIR_ENV;
use finance_tracker::config::{Settings, TrackerPaths};
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Personal finance tracker for the terminal",
    long_about = "Record income and expenses, review them with simple filters, \
                  and see how each month balances out. Runs as an interactive \
                  menu, a terminal dashboard, or one-shot commands."
)]
struct Cli {
    /// Directory holding config.json and the transaction store
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive numbered menu (default)
    Menu,

    /// Launch the terminal dashboard
    #[command(alias = "ui")]
    Dashboard,

    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TrackerPaths::new(cli.data_dir.clone())?;
    let dashboard = matches!(cli.command, Some(Commands::Dashboard));
    init_logging(&paths, cli.verbose, dashboard)?;

    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths, &settings)?;
    let today = Local::now().date_naive();

    match cli.command {
        None | Some(Commands::Menu) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Menu::new(&storage, &settings, today, stdin.lock(), stdout.lock()).run()?;
        }
        Some(Commands::Dashboard) => {
            finance_tracker::tui::run_dashboard(&storage, &settings)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd, today)?;
        }
        Some(Commands::Config) => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            let paths = storage.paths();
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Transaction store: {}", storage.transactions.path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!("  Recent window:   {} days", settings.recent_days);
        }
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// Logs go to stderr, except in dashboard mode where the terminal is taken
/// and they are appended to `dashboard.log` instead.
fn init_logging(paths: &TrackerPaths, verbose: u8, dashboard: bool) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("finance_tracker={default_level},finance={default_level}")));

    if dashboard {
        paths.ensure_directories()?;
        let log_path = paths.dashboard_log();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    Ok(())
}
