use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prism_config::ProviderKind;
use prism_llm::{CompletionRequest, Message};

/// Prism LLM adapter layer
#[derive(Debug, Parser)]
#[command(name = "prism", about = "Talk to six LLM vendors through one streaming interface")]
pub struct Args {
    /// Path to configuration file; vendor credentials come from the environment otherwise
    #[arg(short, long, env = "PRISM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directive, overriding the configuration file
    #[arg(long, env = "PRISM_LOG")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one prompt and print the reply
    Chat(ChatArgs),

    /// List known models
    Models {
        /// Only list models of this vendor
        #[arg(short, long)]
        provider: Option<ProviderKind>,
    },
}

#[derive(Debug, clap::Args)]
pub struct ChatArgs {
    /// Model name, e.g. `gpt-4o-mini` or `claude-sonnet-4-5-20250929`
    #[arg(short, long)]
    pub model: String,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Wait for the whole reply instead of streaming it
    #[arg(long, conflicts_with = "sse")]
    pub buffered: bool,

    /// Print the raw event stream in its SSE encoding
    #[arg(long)]
    pub sse: bool,

    /// User message
    pub prompt: String,
}

impl ChatArgs {
    pub fn to_request(&self) -> CompletionRequest {
        let mut request = CompletionRequest::new(self.model.clone(), vec![Message::user(self.prompt.clone())]);
        request.system_prompt.clone_from(&self.system);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;
        request
    }
}
