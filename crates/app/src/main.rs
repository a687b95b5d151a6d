//! `quiz`: take multiple-choice quizzes built from stored flashcard sets.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use quiz_core::model::{Flashcard, SetId, UserId};
use services::{Clock, QuizHost, QuizLoopService};
use storage::repository::Storage;

mod db;
mod terminal;

use terminal::{Terminal, run_quiz};

#[derive(Parser)]
#[command(name = "quiz", version, about = "Multiple-choice quizzes from flashcard sets")]
struct Cli {
    /// SQLite database URL or path
    #[arg(long, env = "QUIZ_DB_URL", default_value = "sqlite:quiz.sqlite3", global = true)]
    db: String,

    /// User owning the flashcard sets
    #[arg(long, env = "QUIZ_USER", default_value = "local", global = true)]
    user: UserId,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a flashcard set from a JSON file of `{"front", "back"}` objects
    Seed {
        /// Set to create or replace
        #[arg(long, env = "QUIZ_SET")]
        set: SetId,

        /// JSON file with the cards
        #[arg(long)]
        file: PathBuf,
    },

    /// List the user's flashcard sets
    Sets,

    /// Take a quiz on a flashcard set
    Take {
        /// Set to quiz on
        #[arg(long, env = "QUIZ_SET")]
        set: SetId,
    },
}

async fn seed(storage: &Storage, user: &UserId, set: &SetId, file: PathBuf) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
    let cards: Vec<Flashcard> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", file.display()))?;

    storage.flashcards.upsert_set(user, set, &cards).await?;
    info!(%user, %set, cards = cards.len(), "seeded flashcard set");
    println!("Stored {} cards in set '{set}'.", cards.len());
    Ok(())
}

async fn list_sets(storage: &Storage, user: &UserId) -> anyhow::Result<()> {
    let sets = storage.flashcards.list_sets(user).await?;
    if sets.is_empty() {
        println!("No flashcard sets for '{user}'.");
    }
    for set in sets {
        println!("{set}");
    }
    Ok(())
}

async fn take(storage: &Storage, user: UserId, set: SetId) -> anyhow::Result<()> {
    let service = QuizLoopService::new(Clock::default(), storage.flashcards.clone());
    let mut host = QuizHost::new(service, user, set.clone());
    host.reload()
        .await
        .with_context(|| format!("loading flashcard set '{set}'"))?;

    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
    loop {
        run_quiz(&mut host, &mut terminal)?;
        if !terminal.ask_yes_no("\nRetake this quiz?")? {
            return Ok(());
        }
        host.retake().await?;
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_url = db::normalize_sqlite_url(&cli.db);
    // Keep file creation in the binary glue so storage stays backend-agnostic.
    db::prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url)
        .await
        .with_context(|| format!("opening {db_url}"))?;

    match cli.command {
        Commands::Seed { set, file } => seed(&storage, &cli.user, &set, file).await,
        Commands::Sets => list_sets(&storage, &cli.user).await,
        Commands::Take { set } => take(&storage, cli.user, set).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
