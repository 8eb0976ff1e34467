use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use engine::Index;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "In-memory tf-idf search over small text corpora", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a corpus and score queries against it
    Query {
        /// Corpus path: a .txt/.jsonl file, or a directory walked for them
        #[arg(long)]
        input: PathBuf,
        /// Query to run; repeatable. Queries are read from stdin when omitted.
        #[arg(long = "query")]
        queries: Vec<String>,
        /// Print at most this many hits per query
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Emit hits as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load a corpus and print index statistics
    Stats {
        /// Corpus path: a .txt/.jsonl file, or a directory walked for them
        #[arg(long)]
        input: PathBuf,
    },
}

/// One corpus record: a bare JSON string, or an object with a `text` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum InputDoc {
    Text(String),
    Record { text: String },
}

impl InputDoc {
    fn into_text(self) -> String {
        match self {
            InputDoc::Text(text) | InputDoc::Record { text } => text,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { input, queries, limit, json } => run_queries(&input, queries, limit, json),
        Commands::Stats { input } => {
            let index = load_corpus(&input)?;
            println!("{}", serde_json::to_string_pretty(&index.stats())?);
            Ok(())
        }
    }
}

fn run_queries(input: &Path, queries: Vec<String>, limit: usize, json: bool) -> Result<()> {
    let index = load_corpus(input)?;
    if !queries.is_empty() {
        for query in &queries {
            print_hits(&index, query, limit, json)?;
        }
        return Ok(());
    }
    for line in io::stdin().lock().lines() {
        let query = line?;
        if query.trim().is_empty() {
            continue;
        }
        print_hits(&index, &query, limit, json)?;
    }
    Ok(())
}

// Presentation order: best score first, insertion order on ties.
fn rank_hits(hits: &mut [engine::Hit]) {
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.doc_id.cmp(&b.doc_id))
    });
}

fn print_hits(index: &Index, query: &str, limit: usize, json: bool) -> Result<()> {
    let mut hits = index.search(query);
    rank_hits(&mut hits);
    hits.truncate(limit);

    if json {
        println!("{}", serde_json::to_string(&hits)?);
    } else {
        println!("{query}: {} hit(s)", hits.len());
        for hit in &hits {
            println!("  {:>10.5}  #{:<5} {}", hit.score, hit.doc_id, hit.text);
        }
    }
    Ok(())
}

fn load_corpus(input: &Path) -> Result<Index> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input) {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && matches!(extension(path), Some("txt" | "jsonl")) {
                files.push(path.to_path_buf());
            }
        }
        // Deterministic document ids regardless of walk order.
        files.sort();
    } else {
        files.push(input.to_path_buf());
    }
    if files.is_empty() {
        bail!("no .txt or .jsonl files under {}", input.display());
    }

    let mut index = Index::new();
    for file in &files {
        load_file(file, &mut index).with_context(|| format!("loading {}", file.display()))?;
    }
    tracing::info!(num_docs = index.len(), num_terms = index.vocab_len(), "corpus loaded");
    Ok(index)
}

fn load_file(file: &Path, index: &mut Index) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let jsonl = extension(file) == Some("jsonl");
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if jsonl {
            let doc: InputDoc = serde_json::from_str(&line)?;
            index.index_document(&doc.into_text());
        } else {
            index.index_document(&line);
        }
    }
    Ok(())
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Hit;

    fn hit(doc_id: u32, score: f64) -> Hit {
        Hit { doc_id, score, text: String::new() }
    }

    #[test]
    fn ranks_by_score_then_doc_id() {
        let mut hits = vec![hit(2, 1.2), hit(1, 2.8), hit(0, 2.8)];
        rank_hits(&mut hits);
        let order: Vec<u32> = hits.iter().map(|h| h.doc_id).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
