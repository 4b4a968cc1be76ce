//! Interactive mode: load a model once, then export a graph per query line.
//!
//! Each line is `WORD LIM NR_NEIGHBORS`. Words without an underscore get `_NOUN`
//! appended, matching tagged models.

use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use vec2graph::embeddings::{collect_dataset, KeyedVectors};
use vec2graph::export::export_dataset;
use vec2graph::{Config, Vec2GraphError};

#[derive(Parser, Debug)]
#[command(name = "realtime")]
#[command(about = "Load a model once and export a graph for every query typed on stdin")]
struct Args {
    /// Path to the word2vec text model.
    #[arg(short, long)]
    model: PathBuf,

    /// Output directory (default: export.output_dir or a timestamped directory).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show only the part of each name before its first underscore.
    #[arg(short, long)]
    sep: bool,
}

/// Parsed `WORD LIM NR_NEIGHBORS` line.
#[derive(Debug, PartialEq)]
struct Query {
    word: String,
    threshold: f64,
    top_n: usize,
}

fn parse_query(line: &str) -> Result<Query> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [word, lim, nr] = parts.as_slice() else {
        anyhow::bail!("expected: WORD LIM NR_NEIGHBORS");
    };
    let word = if word.contains('_') {
        word.to_string()
    } else {
        format!("{}_NOUN", word)
    };
    Ok(Query {
        word,
        threshold: lim.parse()?,
        top_n: nr.parse()?,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.graph.log_level.as_str()),
    )
    .init();

    if args.sep {
        config.graph.split_hyphen = true;
    }
    let output = args.output.unwrap_or_else(|| config.export.output_dir());
    let model = KeyedVectors::load(&args.model)?;

    let stdin = std::io::stdin();
    loop {
        print!("Type your query (WORD, LIM, NR_NEIGHBORS): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let query = match parse_query(&line) {
            Ok(query) => query,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let mut query_config = config.clone();
        query_config.graph.top_n = query.top_n;
        query_config.graph.threshold = query.threshold;
        if let Err(e) = query_config.validate() {
            eprintln!("{}", e);
            continue;
        }

        let dataset = match collect_dataset(&model, &[query.word.as_str()], 0, query.top_n) {
            Ok(dataset) => dataset,
            Err(Vec2GraphError::WordNotFound(_)) => {
                println!("Word not found in the model");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        export_dataset(&output, &dataset, &query_config)?;
        println!(
            "Visualization generated: {}",
            output.join(format!("{}.json", query.word)).display()
        );
    }

    Ok(())
}
