//! Binary entrypoint for the pgquest CLI.
//!
//! Commands:
//! - `start [--listen <addr>]` - serve the game until ctrl-c
//! - `init [--force]` - write a starter `config.toml`
//!
//! See the library crate docs for module-level details: `pgquest::`.
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::info;

use pgquest::config::Config;
use pgquest::server::GameServer;

#[derive(Parser)]
#[command(name = "pgquest")]
#[command(about = "A text adventure you play from a PostgreSQL client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Start {
        /// Address to listen on, overriding the config file (e.g. 127.0.0.1:5432)
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { listen } => {
            let mut config = Config::load(&cli.config).await?;
            if let Some(addr) = listen {
                config.server.listen_addr = addr;
                config.validate()?;
            }
            init_logging(Some(&config), cli.verbose);
            info!("Starting pgquest v{}", env!("CARGO_PKG_VERSION"));
            GameServer::new(config).run().await?;
        }
        Commands::Init { force } => {
            init_logging(None, cli.verbose);
            if Path::new(&cli.config).exists() && !force {
                bail!(
                    "{} already exists; pass --force to overwrite it",
                    cli.config
                );
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
    }

    Ok(())
}

fn init_logging(config: Option<&Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .and_then(|c| log::LevelFilter::from_str(&c.logging.level).ok())
        .unwrap_or(log::LevelFilter::Info);
    let level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    match log_file {
        Some(f) => {
            let file = std::sync::Mutex::new(f);
            // Echo to the console only when someone is watching
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!(
                    "{} [{}] {}: {}",
                    ts,
                    record.level(),
                    record.target(),
                    record.args()
                );
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}: {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.target(),
                    record.args()
                )
            });
        }
    }
    let _ = builder.try_init();
}
