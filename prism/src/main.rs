#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::Write;

use args::{Args, ChatArgs, Command};
use clap::Parser;
use futures_util::StreamExt;
use prism_config::{Config, ProviderKind};
use prism_llm::{LlmClient, LlmError, StreamEvent, TokenCost, TokenUsage, encode_sse, models};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(filter) = args.log_filter {
        config.telemetry.log_filter = Some(filter);
    }

    prism_telemetry::init(&config.telemetry, "warn")?;

    match args.command {
        Command::Models { provider } => list_models(provider),
        Command::Chat(chat) => run_chat(&config, &chat).await,
    }
}

fn list_models(provider: Option<ProviderKind>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();

    for kind in provider.map_or_else(|| ProviderKind::ALL.to_vec(), |kind| vec![kind]) {
        writeln!(stdout, "{kind}")?;
        for info in models::models_for(kind) {
            writeln!(stdout, "  {:<32} {}", info.id, info.display_name)?;
        }
    }

    Ok(())
}

async fn run_chat(config: &Config, chat: &ChatArgs) -> anyhow::Result<()> {
    let client = LlmClient::from_config(&config.llm)?;
    let request = chat.to_request();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        // Repeated interrupts only re-cancel the same token
        while tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling call");
            on_interrupt.cancel();
        }
    });

    if chat.buffered {
        let response = client.complete(&request, &cancel).await?;
        println!("{}", response.content);
        report_usage(response.usage.zip(response.cost));
        return Ok(());
    }

    let (provider, mut events) = client.events(&request, &cancel).await?;
    tracing::debug!(provider = %provider, model = %request.model, "streaming reply");

    let mut stdout = std::io::stdout().lock();
    let mut usage = None;

    while let Some(event) = events.next().await {
        if chat.sse {
            stdout.write_all(encode_sse(&event)?.as_bytes())?;
        }

        match event {
            StreamEvent::Delta(text) if !chat.sse => stdout.write_all(text.as_bytes())?,
            StreamEvent::Usage(reported) => usage = Some(reported),
            StreamEvent::Error(message) if !chat.sse => return Err(LlmError::Stream(message).into()),
            StreamEvent::Done if !chat.sse => writeln!(stdout)?,
            _ => {}
        }
        stdout.flush()?;
    }

    if cancel.is_cancelled() {
        eprintln!("cancelled");
    }

    report_usage(usage.map(|usage| (usage, prism_llm::pricing::vendor_cost(provider, &request.model, &usage))));
    Ok(())
}

fn report_usage(usage: Option<(TokenUsage, TokenCost)>) {
    if let Some((usage, cost)) = usage {
        eprintln!(
            "tokens: {} in / {} out, cost: ${:.6} ({:.4} local)",
            usage.tokens_in, usage.tokens_out, cost.usd, cost.local_currency
        );
    }
}
