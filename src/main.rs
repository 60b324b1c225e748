//! `mail-failover` host binary.
//!
//! Loads a TOML configuration, builds the engine over the built-in adapters
//! and either sends one message or lists the providers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mail_failover::config::{load_config, CredentialValue};
use mail_failover::observability::logging::init_logging;
use mail_failover::{FailoverEngine, Message};

#[derive(Parser)]
#[command(name = "mail-failover")]
#[command(about = "Send email through an ordered chain of delivery providers", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "mail-failover.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deliver one message through the configured chain
    Send {
        #[arg(long)]
        from: String,
        /// Recipient address (repeatable)
        #[arg(long = "to", required = true)]
        to: Vec<String>,
        #[arg(long)]
        subject: String,
        /// HTML body
        #[arg(long)]
        html: String,
        /// Plain-text alternative
        #[arg(long)]
        text: Option<String>,
    },
    /// List registered adapters and the configured chain
    Providers,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    tracing::info!(
        path = %cli.config.display(),
        providers = config.providers.len(),
        "Configuration loaded"
    );

    let engine = FailoverEngine::from_config(&config)?;

    match cli.command {
        Commands::Send {
            from,
            to,
            subject,
            html,
            text,
        } => {
            let mut message = Message::new(from, to, subject, html);
            if let Some(text) = text {
                message = message.with_text(text);
            }

            match engine.deliver(&message).await {
                Ok(outcome) => {
                    println!("delivered via {}", outcome.provider);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Providers => {
            println!("registered:");
            for id in engine.registry().ids() {
                println!("  {id}");
            }

            println!("chain:");
            for (position, entry) in engine.config().load().entries().iter().enumerate() {
                let status = match &entry.credentials {
                    _ if !engine.registry().contains(entry.id.as_str()) => "unknown provider".to_string(),
                    CredentialValue::Mapping(creds) => format!("{} credential field(s)", creds.len()),
                    CredentialValue::Malformed { found } => format!("malformed credentials ({found})"),
                };
                println!("  {}. {} ({status})", position + 1, entry.id);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
