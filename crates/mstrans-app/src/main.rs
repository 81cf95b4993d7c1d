//! Command-line front end: fetch a token document for page embedding, or
//! replay the sample call sequence against the live service.

mod demo;
mod token;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "mstrans-app")]
#[command(about = "Microsoft Translator V2 token broker and API client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an access token and print the embeddable token document
    Token {
        /// Path to the credentials file
        #[arg(long, default_value = "translator.env")]
        credentials: PathBuf,
    },
    /// Fetch a token, then run the sample call sequence
    Demo {
        /// Path to the credentials file
        #[arg(long, default_value = "translator.env")]
        credentials: PathBuf,
        /// Text to translate and speak
        #[arg(long, default_value = "the quick brown fox jumped over the lazy dog")]
        text: String,
        /// Target language of the translation
        #[arg(long, default_value = "nl")]
        to: String,
        /// Locale the language names are rendered in
        #[arg(long, default_value = "nl")]
        locale: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Token { credentials } => token::run(&credentials).await,
        Commands::Demo {
            credentials,
            text,
            to,
            locale,
        } => demo::run(&credentials, text, to, locale).await,
    }
}

/// Pretty logs on a terminal, JSON lines otherwise. Both go to stderr so
/// `token` can print its document on stdout.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    if atty::is(atty::Stream::Stderr) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
