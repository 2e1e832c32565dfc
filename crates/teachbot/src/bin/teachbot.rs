//! Console front end for the chatbot
//!
//! Run with: cargo run -p teachbot

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use console::style;
use teachbot::{BotConfig, KnowledgeStore, Prompter, TeachingFlow};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "teachbot", version, about = "A teachable question/answer chatbot")]
struct Args {
    /// Path of the persisted knowledge base
    #[arg(long, value_name = "FILE")]
    knowledge_base: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teachbot=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BotConfig::from_file(path)?,
        None => BotConfig::default(),
    };
    if let Some(path) = args.knowledge_base {
        config.knowledge_path = path;
    }

    let store = KnowledgeStore::new(config.knowledge_path.clone());
    let mut flow = TeachingFlow::new(store, ConsolePrompter)?;

    println!(
        "{}",
        style("teachbot — ask me anything; I learn what I don't know.").bold()
    );
    println!(
        "Knowledge base: {} ({} entries)",
        config.knowledge_path.display(),
        flow.base().len()
    );
    println!("Press Ctrl+D to quit.\n");

    let stdin = io::stdin();
    loop {
        print!("{} ", style("You:").cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }

        match flow.get_answer(question) {
            Ok(answer) => println!("{} {}\n", style("Bot:").green().bold(), answer),
            Err(e) => eprintln!("{} {}\n", style("error:").red().bold(), e),
        }
    }

    Ok(())
}

/// Terminal prompter backing the teaching dialogs
struct ConsolePrompter;

impl ConsolePrompter {
    fn banner(&self, title: &str, message: &str) {
        println!("{} {}", style(format!("[{}]", title)).yellow().bold(), message);
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.banner(title, message);
        print!("{} ", style("(y/n)").dim());
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn input(&mut self, title: &str, message: &str) -> Option<String> {
        self.banner(title, message);
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            // EOF counts as a decline.
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn notify(&mut self, title: &str, message: &str) {
        self.banner(title, message);
    }
}
