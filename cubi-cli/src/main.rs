//! ethercubi CLI
//!
//! Runs the rig configuration service and a couple of helpers around it.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cubi_api::{ApiConfig, ApiServer};
use cubi_core::constants::{DEFAULT_ID_WORDS, DEFAULT_WORDLIST_PATH};
use cubi_core::types::CoinbaseAddress;
use cubi_words::{IdAllocator, WordList};

/// ethercubi - word-addressed mining rig configurations
#[derive(Parser)]
#[command(name = "cubi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Print sample identifiers drawn from a word list
    Id {
        /// Word list file
        #[arg(short, long, default_value = DEFAULT_WORDLIST_PATH)]
        wordlist: PathBuf,
        /// Words per identifier
        #[arg(short = 'n', long, default_value_t = DEFAULT_ID_WORDS)]
        words: usize,
        /// Number of identifiers to print
        #[arg(short, long, default_value = "5")]
        count: usize,
    },

    /// Check a coinbase address
    Check {
        /// Address to validate (0x + 40 hex digits)
        address: String,
    },
}

/// Overrides on top of the environment configuration.
#[derive(clap::Args)]
struct ServeArgs {
    /// Listening address
    #[arg(short, long)]
    bind: Option<SocketAddr>,
    /// Rig lifetime in seconds
    #[arg(long)]
    ttl_secs: Option<u64>,
    /// Expired-rig sweep period in seconds
    #[arg(long)]
    cleanup_secs: Option<u64>,
    /// Words per identifier
    #[arg(long)]
    id_words: Option<usize>,
    /// Word list file
    #[arg(long)]
    wordlist: Option<PathBuf>,
    /// Install script template
    #[arg(long)]
    template: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, mut config: ApiConfig) -> ApiConfig {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(secs) = self.ttl_secs {
            config.rig_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = self.cleanup_secs {
            config.cleanup_interval = Duration::from_secs(secs);
        }
        if let Some(words) = self.id_words {
            config.id_words = words;
        }
        if let Some(path) = self.wordlist {
            config.wordlist_path = path;
        }
        if let Some(path) = self.template {
            config.template_path = path;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "cubi=debug,info"
    } else {
        "cubi=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve(args) => cmd_serve(args).await,
        Commands::Id { wordlist, words, count } => cmd_id(&wordlist, words, count),
        Commands::Check { address } => cmd_check(&address),
    }
}

/// Run the HTTP server
async fn cmd_serve(args: ServeArgs) -> Result<()> {
    let config = args.apply(ApiConfig::from_env());
    let bind = config.bind;

    println!("{}", "⛏  Starting ethercubi...".cyan().bold());
    println!("   {} {}", "Word list:".dimmed(), config.wordlist_path.display());
    println!("   {} {}", "Template:".dimmed(), config.template_path.display());
    println!("   {} {}s", "Rig TTL:".dimmed(), config.rig_ttl.as_secs());

    debug!(?config, "Resolved server configuration");
    let server = ApiServer::new(config).context("Failed to load rig service assets")?;
    info!(%bind, "Rig service ready");

    println!("   {} http://{}", "Listening on:".green(), bind);
    println!("\n   Press Ctrl+C to stop.\n");

    server.run(bind).await.context("Server error")?;

    Ok(())
}

/// Print sample identifiers
fn cmd_id(wordlist: &Path, words: usize, count: usize) -> Result<()> {
    let list = WordList::from_path(wordlist).context("Failed to load word list")?;
    let space = list.identifier_space(words);
    let allocator = IdAllocator::new(list, words).context("Word list too small")?;

    println!(
        "{} {} words, {} per identifier",
        "📖 Word list:".cyan().bold(),
        allocator.words().len(),
        words
    );
    match space {
        Some(n) => println!("   {} {}", "Identifier space:".dimmed(), n),
        None => println!("   {} > 2^128", "Identifier space:".dimmed()),
    }
    println!();

    for _ in 0..count {
        println!("   {}", allocator.create_identifier()?.green());
    }

    Ok(())
}

/// Validate a coinbase address
fn cmd_check(address: &str) -> Result<()> {
    match CoinbaseAddress::parse(address) {
        Ok(addr) => {
            println!("{} {}", "✅ Valid coinbase:".green().bold(), addr);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "❌".red(), e);
            anyhow::bail!("invalid coinbase address")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["cubi", "serve", "--bind", "127.0.0.1:8080", "--ttl-secs", "30"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = args.apply(ApiConfig::default());
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.rig_ttl, Duration::from_secs(30));
        assert_eq!(config.id_words, DEFAULT_ID_WORDS);
    }

    #[test]
    fn test_check_command() {
        assert!(cmd_check("0x1111111111111111111111111111111111111111").is_ok());
        assert!(cmd_check("0x1111").is_err());
    }
}
