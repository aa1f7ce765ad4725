mod cli;
mod core;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "spendwatch",
    about = "Meta ad account spend monitor with Telegram alerts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor loop (default)
    Run,
    /// List the Business Managers and ad accounts that would be monitored
    Accounts {
        /// Print as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Fetch today's spend once for every account, without alerting
    Spend {
        /// Print as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate a starter config file
    Init,
    /// Validate the config file
    Check,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = if verbose {
        "spendwatch=debug"
    } else {
        "spendwatch=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        None | Some(Commands::Run) => cli::run_cmd::run().await?,
        Some(Commands::Accounts { json }) => cli::accounts_cmd::run(json).await?,
        Some(Commands::Spend { json }) => cli::spend_cmd::run(json).await?,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init => cli::config_cmd::init()?,
            ConfigAction::Check => cli::config_cmd::check()?,
        },
    }

    Ok(())
}
