// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{info, Level};

use shaimind::config::CONFIG;
use shaimind::llm::{OpenAiChatProvider, ResponseGenerator};
use shaimind::persona::PersonalityStore;
use shaimind::ChatController;

#[derive(Parser)]
#[command(name = "shaimind")]
#[command(about = "Talk to historical figures with moods of their own", long_about = None)]
struct Cli {
    /// Directory holding personality JSON files
    #[arg(short, long)]
    identities: Option<PathBuf>,

    /// Personality to start with (skips the selection prompt)
    #[arg(short, long)]
    persona: Option<String>,

    /// Print the available personalities and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { CONFIG.tracing_level() };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let identities = cli
        .identities
        .unwrap_or_else(|| PathBuf::from(&CONFIG.identities_dir));
    let store = PersonalityStore::open(&identities)
        .with_context(|| format!("cannot read personalities from {}", identities.display()))?;
    if store.is_empty() {
        anyhow::bail!("no loadable personalities in {}", identities.display());
    }

    if cli.list {
        for id in store.list_available() {
            println!("{}", id);
        }
        return Ok(());
    }

    let api_key = CONFIG.require_api_key()?;
    let provider = Arc::new(OpenAiChatProvider::new(
        api_key.to_string(),
        CONFIG.chat_completions_url(),
    ));
    let generator = ResponseGenerator::new(provider)
        .with_params(CONFIG.sampling_params())
        .with_word_cap(CONFIG.word_cap)
        .with_timeout(CONFIG.request_timeout());
    let controller = ChatController::new(generator);

    info!("Model: {}", CONFIG.model);

    let preferred = cli.persona.as_deref().or(CONFIG.default_persona());
    let stdin = BufReader::new(tokio::io::stdin());
    shaimind::cli::run(&controller, &store, preferred, stdin, std::io::stdout()).await?;

    Ok(())
}
