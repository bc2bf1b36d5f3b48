use std::{process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    config::timeout_from_secs, load_settings, render, ClientEvent, ClientSettings, CustomForm,
    RandomClient, SettlePolicy,
};
use shared::protocol::DEFAULT_BIT_LENGTH;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing_subscriber::EnvFilter;

mod prompt;

use prompt::{parse_prompt_line, PromptCommand, PROMPT_HELP};

#[derive(Parser, Debug)]
#[command(name = "qrng", about = "Request random values from a QRNG service")]
struct Cli {
    /// Base URL of the random service; overrides client.toml and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Per-request timeout in seconds, 0 disables it.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// Which response wins when requests overlap: latest_dispatched or last_settled.
    #[arg(long, global = true)]
    settle_policy: Option<SettlePolicy>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a 256-bit random value.
    Default,
    /// Fetch a value of a given bit length, optionally within [min, max].
    Custom {
        #[arg(long, allow_hyphen_values = true)]
        length: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        min: String,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        max: String,
    },
    /// Read requests from stdin; several may be in flight at once.
    Interactive,
}

impl Cli {
    fn settings(&self) -> ClientSettings {
        let mut settings = load_settings();
        if let Some(api_url) = &self.api_url {
            settings.api_url = api_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            settings.request_timeout = timeout_from_secs(secs);
        }
        if let Some(policy) = self.settle_policy {
            settings.settle_policy = policy;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = cli.settings();
    tracing::info!(api_url = %settings.api_url, policy = ?settings.settle_policy, "client configured");

    let client = RandomClient::new(&settings);

    let outcome = match cli.command {
        Command::Default => {
            tracing::info!("requesting {DEFAULT_BIT_LENGTH}-bit value");
            client.request_default().await
        }
        Command::Custom { length, min, max } => {
            client
                .request_custom(&CustomForm::new(length, min, max))
                .await
        }
        Command::Interactive => {
            run_interactive(client).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", render(&client.view()));
    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_interactive(client: Arc<RandomClient>) -> Result<()> {
    let mut events = client.subscribe_events();
    let renderer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ClientEvent::ViewChanged(state)) => {
                    let view = render(&state);
                    if !view.is_empty() {
                        println!("----\n{view}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "renderer fell behind view updates");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{PROMPT_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_prompt_line(&line) {
            Ok(PromptCommand::Empty) => {}
            Ok(PromptCommand::Help) => println!("{PROMPT_HELP}"),
            Ok(PromptCommand::Quit) => break,
            Ok(PromptCommand::Default) => {
                let client = client.clone();
                tokio::spawn(async move {
                    if let Err(err) = client.request_default().await {
                        tracing::debug!("default request ended with error: {err}");
                    }
                });
            }
            Ok(PromptCommand::Custom(form)) => {
                let client = client.clone();
                tokio::spawn(async move {
                    if let Err(err) = client.request_custom(&form).await {
                        tracing::debug!("custom request ended with error: {err}");
                    }
                });
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    renderer.abort();
    Ok(())
}
