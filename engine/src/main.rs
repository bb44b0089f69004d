use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use wordrank_core::converter::{load_config, load_documents, load_requests, save_answers, EnginePaths};
use wordrank_core::{InvertedIndex, SearchConfig, SearchServer};

use std::time::Instant;

#[derive(Parser)]
#[command(name = "wordrank")]
#[command(about = "Rank documents against keyword queries by term frequency", long_about = None)]
struct Cli {
    /// Directory holding config.json and requests.json; answers.json is written here
    #[arg(long, default_value = ".")]
    root: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the configured documents, answer every request and write answers.json
    Search,
    /// Index the configured documents and print the postings of one word
    Count {
        #[arg(long)]
        word: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let paths = EnginePaths::new(&cli.root);

    match cli.command {
        Commands::Search => search(&paths),
        Commands::Count { word } => count(&paths, &word),
    }
}

fn load_index(paths: &EnginePaths) -> Result<(InvertedIndex, usize)> {
    let config = load_config(paths)?;
    let section = config.validate()?;
    tracing::info!(name = %section.name, version = %section.version, "welcome");

    let start = Instant::now();
    let mut index = InvertedIndex::new();
    index.update_document_base(load_documents(paths, &config))?;
    tracing::info!(
        num_docs = index.docs_amount(),
        num_words = index.freq_dictionary().len(),
        took_s = start.elapsed().as_secs_f64(),
        "document base built"
    );
    Ok((index, config.response_limit()))
}

fn search(paths: &EnginePaths) -> Result<()> {
    let (index, response_limit) = load_index(paths)?;
    let requests = load_requests(paths)?;

    let server = SearchServer::new(&index, SearchConfig { response_limit });
    let results = server.search(&requests);
    let hits: usize = results.iter().map(Vec::len).sum();
    tracing::info!(num_requests = requests.len(), hits, response_limit, "search complete");

    save_answers(paths, &results)?;
    tracing::info!(output = %paths.answers().display(), "answers written");
    Ok(())
}

fn count(paths: &EnginePaths, word: &str) -> Result<()> {
    let (index, _) = load_index(paths)?;
    let postings = index.word_count(word);
    println!("{}", serde_json::to_string_pretty(&postings)?);
    Ok(())
}
