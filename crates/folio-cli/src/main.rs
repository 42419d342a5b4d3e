//! folio - portfolio chat gateway and console client

mod config;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;

use folio_chat::{ChatMode, EmailConfig};
use folio_gateway::{GatewayConfig, GatewayState};

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787";

/// folio - portfolio chat backend
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the chat gateway
    Serve {
        /// Address to bind (default: 127.0.0.1:8787)
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Chat with a gateway from the terminal
    Chat {
        /// Gateway base URL
        #[arg(short, long)]
        url: Option<String>,
        /// Language code for persona selection
        #[arg(short, long)]
        language: Option<String>,
        /// Start in email mode
        #[arg(long)]
        email: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.init_config {
        let path = config::Config::init()?;
        println!("Config file: {}", path.display());
        return Ok(());
    }

    let config = config::Config::load();

    match args.command {
        Some(Command::Serve { bind }) => serve(bind, &config).await,
        Some(Command::Chat {
            url,
            language,
            email,
        }) => chat(url, language, email, &config).await,
        None => chat(None, None, false, &config).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(bind: Option<SocketAddr>, config: &config::Config) -> Result<()> {
    // Environment wins; the config file fills what it left unset.
    let mut gateway_config = GatewayConfig::from_env();
    if gateway_config.groq_api_key.is_none() {
        gateway_config.groq_api_key = config.api_keys.groq.clone();
    }
    if gateway_config.llama_api_key.is_none() {
        gateway_config.llama_api_key = config.api_keys.llama.clone();
    }
    if gateway_config.persona_path.is_none() {
        gateway_config.persona_path = config.persona_path.clone().map(Into::into);
    }

    let state = GatewayState::from_config(&gateway_config)?;
    let addr = bind
        .or(config.bind)
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8787)));

    folio_gateway::serve(addr, state).await
}

async fn chat(
    url: Option<String>,
    language: Option<String>,
    email: bool,
    config: &config::Config,
) -> Result<()> {
    let mut email_config = EmailConfig::default();
    if let Some(to) = &config.contact_email {
        email_config.to = to.clone();
    }
    if let Some(subject) = &config.contact_subject {
        email_config.subject = subject.clone();
    }

    let options = console::ConsoleOptions {
        url: url
            .or_else(|| config.gateway_url.clone())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        language: language.or_else(|| config.language.clone()),
        email: email_config,
        idle_timeout: Duration::from_secs(config.idle_timeout_secs.unwrap_or(30)),
        start_mode: if email { ChatMode::Email } else { ChatMode::Chat },
    };

    console::run(options).await
}
