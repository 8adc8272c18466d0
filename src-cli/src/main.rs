use std::process::ExitCode;

use log::{error, info};
use secrecy::SecretString;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use tekox::{
    load_config, resolve_password, ChannelProgress, Config, HarvestConfig, HarvestError,
    HarvestRequest, Harvester, ImapConnector, ProgressEvent, Severity,
};

const ADDRESS_ENV_VAR: &str = "TEKOX_ADDRESS";
const PROVIDER_ENV_VAR: &str = "TEKOX_PROVIDER";
const DEFAULT_PROVIDER: &str = "Gmail";

type Prompt = Lines<BufReader<Stdin>>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install log subscriber: {}", e);
    }
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to forward log records: {}", e);
    }
}

/// Loads the settings file named on the command line, or the defaults.
fn load_settings() -> Result<Config, HarvestError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Ok(load_config(&path)?)
        }
        None => Ok(Config::default()),
    }
}

async fn ask(prompt: &mut Prompt, question: &str) -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;
    Ok(prompt.next_line().await?.unwrap_or_default().trim().to_string())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn read_request() -> Result<HarvestRequest, String> {
    let mut prompt = BufReader::new(tokio::io::stdin()).lines();

    let address = match env_value(ADDRESS_ENV_VAR) {
        Some(address) => address,
        None => ask(&mut prompt, "Email address: ")
            .await
            .map_err(|e| e.to_string())?,
    };

    let secret = match resolve_password().map_err(|e| e.to_string())? {
        Some(secret) => secret,
        None => SecretString::from(
            ask(&mut prompt, "Password: ")
                .await
                .map_err(|e| e.to_string())?,
        ),
    };

    let provider = match env_value(PROVIDER_ENV_VAR) {
        Some(provider) => provider,
        None => {
            let question = format!(
                "Provider (Gmail, Office 365, Yahoo Mail) [{}]: ",
                DEFAULT_PROVIDER
            );
            let answer = ask(&mut prompt, &question)
                .await
                .map_err(|e| e.to_string())?;
            if answer.is_empty() {
                DEFAULT_PROVIDER.to_string()
            } else {
                answer
            }
        }
    };

    Ok(HarvestRequest::new(address, secret, provider))
}

async fn print_progress(events: &mut UnboundedReceiver<ProgressEvent>) {
    while let Some(event) = events.recv().await {
        if let ProgressEvent::Status(status) = event {
            let marker = match status.severity {
                Severity::Info => "..",
                Severity::Success => "ok",
                Severity::Error => "!!",
            };
            println!("[{}] {}", marker, status.text);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    info!("Starting TekOx v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_settings() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let request = match read_request().await {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to read credentials: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let harvester = Harvester::new(ImapConnector::new(), HarvestConfig::from_config(&config));
    let (progress, mut events) = ChannelProgress::new();

    let run = async move {
        let outcome = harvester.run(request, &progress).await;
        // Closing the channel ends the printer.
        drop(progress);
        outcome
    };
    let (outcome, ()) = tokio::join!(run, print_progress(&mut events));

    let count = outcome.link_count_text();
    if !count.is_empty() {
        println!("{}", count);
    }
    if let Some(path) = &outcome.report_path {
        println!("Report: {}", path.display());
    }

    match &outcome.error {
        None => ExitCode::SUCCESS,
        Some(e) => {
            error!("Harvest failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
