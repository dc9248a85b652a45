mod api;
mod bot;
mod config;
mod daemon;
mod error;
mod telegram;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "haddock-bot",
    version,
    about = "Telegram bot serving Captain Haddock's vocabulary and insults"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot as a background daemon
    Start,
    /// Stop the running daemon
    Stop,
    /// Restart the daemon
    Restart,
    /// Run the bot in the foreground
    Exec,
    /// Run the bot in the foreground with debug logging
    Debug,
}

fn init_tracing(default_level: &str, ansi: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => {
            if let Err(e) = start_daemon() {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Stop => match daemon::stop(&daemon::pid_file_path()) {
            Ok(()) => println!("haddock-bot stopped"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        Commands::Restart => {
            match daemon::stop(&daemon::pid_file_path()) {
                Ok(()) => println!("haddock-bot stopped"),
                Err(error::DaemonError::NotRunning(_)) => {}
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
            if let Err(e) = start_daemon() {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Exec => run_foreground("info"),
        Commands::Debug => run_foreground("debug"),
    }
}

fn start_daemon() -> anyhow::Result<()> {
    let pid_file = daemon::pid_file_path();
    daemon::detect_and_clean_stale_pid_file(&pid_file)?;

    // Load the configuration before forking so errors land on the terminal.
    let config = config::Config::load()?;

    let log_path = daemon::log_file_path();
    match daemon::daemonize(&log_path)? {
        daemon::Forked::Parent => {
            println!("haddock-bot started (pid file: {})", pid_file.display());
            Ok(())
        }
        daemon::Forked::Child => {
            init_tracing("warn", false);
            daemon::write_pid_file(&pid_file)?;
            let result = run_bot_blocking(config);
            let _ = std::fs::remove_file(&pid_file);
            result
        }
    }
}

fn run_foreground(default_level: &str) {
    init_tracing(default_level, true);

    let config = match config::Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_bot_blocking(config) {
        eprintln!("Bot error: {e}");
        std::process::exit(1);
    }
}

fn run_bot_blocking(config: config::Config) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(bot::run_bot(config))
}
