//! Feedgate CLI
//!
//! Runs the feed server, or fetches a single feed and prints it.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedgate_api::{ApiConfig, ApiServer, AppState};
use feedgate_core::Feed;

/// Feedgate - novel site feeds with a shared response cache
#[derive(Parser)]
#[command(name = "feedgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print feeds as JSON instead of a listing
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feed server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: IpAddr,
    },

    /// Search Syosetu and print the results feed
    Syosetu {
        /// Site: yomou, noc, mnlt or mid
        sub: String,
        /// Search query string, e.g. "word=dragon&order=new"
        query: String,
        /// Maximum number of novels
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Print a Pixiv user's latest novels
    Pixiv {
        /// Numeric Pixiv user ID
        user_id: String,
        /// Maximum number of novels
        #[arg(short, long)]
        limit: Option<usize>,
        /// Pixiv access token
        #[arg(long, env = "PIXIV_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "feedgate=debug,tower_http=debug,info"
    } else {
        "feedgate=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(bind, port).await,
        Commands::Syosetu { sub, query, limit } => cmd_syosetu(&sub, &query, limit, cli.json).await,
        Commands::Pixiv {
            user_id,
            limit,
            token,
        } => cmd_pixiv(&user_id, limit, token, cli.json).await,
    }
}

/// Run the feed server
async fn cmd_serve(bind: IpAddr, port: u16) -> Result<()> {
    println!("{}", "Starting Feedgate server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(ApiConfig::from_env()).context("Failed to build server state")?;
    server
        .run((bind, port))
        .await
        .with_context(|| format!("Server on {}:{} stopped", bind, port))?;

    Ok(())
}

/// Search Syosetu
async fn cmd_syosetu(sub: &str, query: &str, limit: Option<u32>, json: bool) -> Result<()> {
    let state = AppState::new(ApiConfig::from_env())?;

    let spinner = spinner(json, format!("Searching {}...", sub));
    let result = state.syosetu.search_feed(&state.gate, sub, query, limit).await;
    spinner.finish_and_clear();

    let feed = result.with_context(|| format!("Syosetu search on '{}' failed", sub))?;
    print_feed(&feed, json)
}

/// Fetch a Pixiv user's novels
async fn cmd_pixiv(user_id: &str, limit: Option<usize>, token: Option<String>, json: bool) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if let Some(token) = token {
        config = config.with_pixiv_token(token);
    }
    let state = AppState::new(config)?;

    let spinner = spinner(json, format!("Fetching novels of user {}...", user_id));
    let result = state.pixiv.user_novels_feed(&state.gate, user_id, limit).await;
    spinner.finish_and_clear();

    let feed = result.with_context(|| format!("Pixiv novels of user {} failed", user_id))?;
    print_feed(&feed, json)
}

fn spinner(hidden: bool, message: String) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_feed(feed: &Feed, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(feed)?);
        return Ok(());
    }

    println!("{}", feed.title.cyan().bold());
    println!("{}", feed.link.dimmed());
    if feed.is_empty() {
        println!("\n   {}", "No items.".yellow());
        return Ok(());
    }

    for (i, item) in feed.item.iter().enumerate() {
        println!("\n{:>3}. {}", i + 1, item.title.bold());
        if let Some(author) = &item.author {
            println!("     {} {}", "by".dimmed(), author.green());
        }
        if let Some(date) = &item.pub_date {
            println!("     {}", date.format("%Y-%m-%d %H:%M").to_string().dimmed());
        }
        println!("     {}", item.link.blue());
        if !item.category.is_empty() {
            println!("     {}", item.category.join(", ").dimmed());
        }
    }
    println!("\n{} {}", feed.len().to_string().green().bold(), "items".green());

    Ok(())
}
