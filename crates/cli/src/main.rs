//! LappyBot CLI: the main entry point.
//!
//! Commands:
//! - `serve`        Start the HTTP gateway
//! - `recommend`    Pick one laptop for a budget and use case
//! - `quiz`         Run the guided quiz narrowing
//! - `compare`      Compare laptops by brand and price ceiling
//! - `chat`         Interactive or single-message chat
//! - `faq`          Answer a common laptop question
//! - `troubleshoot` Look up a fix for a laptop issue
//! - `doctor`       Diagnose configuration and catalog health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "lappybot",
    about = "LappyBot: laptop recommendations, comparisons, and chat",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog CSV to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override the bind host
        #[arg(long)]
        host: Option<String>,
    },

    /// Recommend one laptop within a budget
    Recommend {
        /// Budget in MYR
        #[arg(short, long)]
        budget: String,

        /// Use case, e.g. "gaming" or "science computer student"
        #[arg(short, long, default_value = "")]
        use_case: String,

        /// Seed the random pick for a repeatable result
        #[arg(long)]
        seed: Option<u64>,

        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Narrow the catalog with the guided quiz answers
    Quiz {
        /// Gaming, Work, School, or Editing
        #[arg(short, long)]
        use_case: Option<String>,

        /// "Under MYR 3000", "MYR 3000-5000", or "Over MYR 5000"
        #[arg(short, long)]
        budget: Option<String>,

        /// "13-14 inch" or "15-16 inch"
        #[arg(short, long)]
        size: Option<String>,

        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare laptops side by side
    Compare {
        /// Brand to include (repeatable; none means all brands)
        #[arg(short, long = "brand")]
        brands: Vec<String>,

        /// Price ceiling in MYR
        #[arg(short, long)]
        max_price: Option<String>,

        /// Print the full HTML table instead of a summary
        #[arg(long)]
        html: bool,
    },

    /// Chat with LappyBot
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Answer a frequently asked question
    Faq {
        /// The question, e.g. "what is the best laptop for students?"
        question: String,
    },

    /// Suggest a fix for a laptop issue (lists known issues when omitted)
    Troubleshoot {
        /// The issue, e.g. "overheating"
        issue: Option<String>,
    },

    /// Diagnose configuration and catalog health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let catalog = cli.catalog;
    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(catalog, port, host).await?,
        Commands::Recommend {
            budget,
            use_case,
            seed,
            json,
        } => commands::recommend::run(catalog, &budget, use_case, seed, json)?,
        Commands::Quiz {
            use_case,
            budget,
            size,
            json,
        } => commands::quiz::run(catalog, use_case, budget, size, json)?,
        Commands::Compare {
            brands,
            max_price,
            html,
        } => commands::compare::run(catalog, brands, max_price, html)?,
        Commands::Chat { message } => commands::chat::run(catalog, message).await?,
        Commands::Faq { question } => commands::guide::faq(&question)?,
        Commands::Troubleshoot { issue } => commands::guide::troubleshoot(issue.as_deref())?,
        Commands::Doctor => commands::doctor::run(catalog).await?,
    }

    Ok(())
}
