//! chatdigest - Daily digests for a multi-chat messaging client
//!
//! Serves the digest HTTP API or answers one-off questions from the
//! command line.

use anyhow::Result;
use chatdigest::{
    api::build_app,
    config::DigestConfig,
    corpus::ChatFilter,
    engine::DigestEngine,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chatdigest")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Daily chat summaries, digests, highlights and search")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CHATDIGEST_CONFIG")]
    config: Option<PathBuf>,

    /// Corpus fixture (JSON) to load instead of the sample corpus
    #[arg(short, long, global = true)]
    fixture: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List chats with their activity
    Chats {
        /// Day to report on (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// all, groups or topN
        #[arg(long, default_value = "all")]
        filter: ChatFilter,
    },

    /// Summarize one chat
    Summarize {
        /// Chat ID
        chat: String,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List one chat's messages
    Messages {
        /// Chat ID
        chat: String,

        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Show at most this many messages
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the daily digest
    Digest {
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List categorized highlights
    Highlights {
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Ask a question about the day's messages
    Search {
        /// Query words
        #[arg(required = true)]
        query: Vec<String>,

        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("chatdigest={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = DigestConfig::load(cli.config.as_deref())?;
    if let Some(fixture) = cli.fixture {
        config.corpus.fixture = Some(fixture);
    }

    if let Commands::Config { default } = cli.command {
        let shown = if default {
            DigestConfig::default()
        } else {
            config
        };
        println!("{}", shown.to_toml()?);
        return Ok(());
    }

    let engine = DigestEngine::from_config(&config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            serve(engine, &config, &host, port).await?;
        }
        Commands::Chats { date, filter } => {
            print_json(&engine.chat_activity(date, filter))?;
        }
        Commands::Summarize { chat, date } => {
            if engine.store().chat_by_id(&chat).is_none() {
                anyhow::bail!("Chat {} not found", chat);
            }
            print_json(&engine.summarize_chat(&chat, date))?;
        }
        Commands::Messages { chat, date, limit } => {
            if engine.store().chat_by_id(&chat).is_none() {
                anyhow::bail!("Chat {} not found", chat);
            }
            print_json(&engine.chat_messages(&chat, date, limit))?;
        }
        Commands::Digest { date } => {
            println!("{}", engine.daily_digest(date));
        }
        Commands::Highlights { date } => {
            print_json(&engine.extract_highlights(date))?;
        }
        Commands::Search { query, date } => {
            print_json(&engine.search(&query.join(" "), date))?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

async fn serve(engine: DigestEngine, config: &DigestConfig, host: &str, port: u16) -> Result<()> {
    let app = build_app(Arc::new(engine), &config.server.cors_origins);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;

    tracing::info!("chatdigest API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
