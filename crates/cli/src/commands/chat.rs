//! `lappybot chat`: interactive or single-message chat.

use lappybot_agent::{ChatEngine, ChatRequest, ReplyKind};
use lappybot_config::AppConfig;
use lappybot_core::message::SessionId;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    catalog: Option<PathBuf>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(catalog)?;

    // Check for API key early and give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    LAPPYBOT_API_KEY = 'sk-...'");
        eprintln!("    OPENAI_API_KEY   = 'sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let catalog = super::load_catalog(&config)?;
    let provider =
        lappybot_providers::build_generator(&config).ok_or("No default provider configured")?;
    let images = lappybot_providers::build_image_search(&config);
    let records = catalog.len();
    let engine = ChatEngine::from_config(&config, provider, images, catalog);
    let session = SessionId::new();

    if let Some(msg) = message {
        eprint!("  Thinking...");
        let reply = engine.handle(ChatRequest::from_text(session, &msg)).await;
        eprint!("\r              \r");
        println!("{}", to_terminal(&reply.response));
        if reply.kind == ReplyKind::Apology {
            return Err("Generation failed, see the log for details".into());
        }
        return Ok(());
    }

    println!();
    println!("  LappyBot, interactive mode");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", config.generation_model());
    println!("  Catalog:   {records} laptops");
    println!();
    println!("  Ask about laptops, or 'show me an image for the <model>'.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }
        if !text.is_empty() {
            eprint!("  ...");
            let reply = engine
                .handle(ChatRequest::from_text(session.clone(), text))
                .await;
            eprint!("\r     \r");
            println!();
            for line in to_terminal(&reply.response).lines() {
                println!("  LappyBot > {line}");
            }
            println!();
        }
        prompt()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

/// Undo the display markup for a plain terminal.
fn to_terminal(html: &str) -> String {
    html.replace("<br>", "\n").replace("<b>", "").replace("</b>", "")
}
