use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use trivia_api::db::queries::categories::get_all_categories;
use trivia_api::db::queries::questions::{
    count_questions, get_all_questions, get_questions_for_category,
};
use trivia_api::db::{establish_connection, import_bank, run_migrations, Category, Question};
use trivia_api::telemetry::init_tracing;
use trivia_api::trivia::{CategorySelector, QuizSession};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories and questions as CSV into a directory
    Export { path: PathBuf },
    /// Play a quiz in the terminal
    Play {
        /// Only ask questions from this category
        #[clap(long)]
        category: Option<i64>,
        /// Stop after this many questions
        #[clap(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let pool = establish_connection(&cli.db_path)
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await.context("Migrations failed")?;

    match cli.command {
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export"),
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import"),
        Commands::Play { category, limit } => play(&pool, category, limit).await,
    }
}

fn write_to(path: PathBuf, data: Vec<impl Serialize>) -> anyhow::Result<()> {
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: PathBuf) -> anyhow::Result<Vec<T>> {
    let file =
        std::fs::File::open(&path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record?;
        out.push(record);
    }
    Ok(out)
}

async fn export_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(path)?
    }
    write_to(path.join("categories.csv"), categories)?;
    write_to(path.join("questions.csv"), questions)?;
    tracing::info!("Exported to {}", path.display());
    Ok(())
}

async fn import_data(pool: &SqlitePool, path: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(path.join("categories.csv"))?;
    let questions: Vec<Question> = read_from(path.join("questions.csv"))?;
    let (n_categories, n_questions) = (categories.len(), questions.len());
    import_bank(pool, categories, questions).await?;
    let stored = count_questions(pool).await?;
    tracing::info!(
        "Imported {n_categories} categories and {n_questions} questions, {stored} questions stored"
    );
    Ok(())
}

async fn play(pool: &SqlitePool, category: Option<i64>, limit: Option<usize>) -> anyhow::Result<()> {
    let selector = CategorySelector::from_wire(Some(category.unwrap_or(0)), None)?;
    let questions = match selector {
        CategorySelector::All => get_all_questions(pool).await?,
        CategorySelector::Category(id) => get_questions_for_category(pool, id).await?,
    };

    let mut session = QuizSession::new(selector);
    if let Some(limit) = limit {
        session = session.with_limit(limit);
    }

    let mut rng = rand::rng();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut correct = 0usize;

    while let Some(question) = session.next(&questions, &mut rng) {
        print!("{}\n> ", question.question);
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            session.stop();
            break;
        };
        let reply = line?;
        if reply.trim().eq_ignore_ascii_case(question.answer.trim()) {
            correct += 1;
            println!("Correct!");
        } else {
            println!("The answer was: {}", question.answer);
        }
    }

    if session.asked() == 0 {
        println!("No questions available for category {}", session.selector());
    } else {
        println!("Score: {correct}/{}", session.asked());
    }
    Ok(())
}
