use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use vec2graph::embeddings::{collect_dataset, KeyedVectors};
use vec2graph::export::export_dataset;
use vec2graph::layout::{LayoutScene, LayoutSession};
use vec2graph::{Config, GraphReducer, ReducedGraph, Relation};

/// Reduce ranked similarity relations into force-layout-ready graphs.
#[derive(Parser, Debug)]
#[command(name = "vec2graph", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reduce a JSON array of {source, target, value} relations and print the graph.
    Reduce {
        /// Path to the relations JSON file.
        #[arg(long)]
        relations: PathBuf,
        /// Override graph.top_n.
        #[arg(long)]
        top_n: Option<usize>,
        /// Override graph.threshold (values >= 1 are percentages).
        #[arg(long)]
        threshold: Option<f64>,
        /// Names marked as having a page.
        #[arg(long = "page")]
        pages: Vec<String>,
    },
    /// Build graphs for words from a word2vec model and export them.
    Visualize {
        /// Path to the word2vec model (text, or binary with .bin; optionally .gz).
        #[arg(long)]
        model: PathBuf,
        /// Word(s) to visualize.
        #[arg(long = "word", required = true)]
        words: Vec<String>,
        /// Also export pages for neighbors up to this many levels.
        #[arg(long)]
        depth: Option<usize>,
        #[arg(long)]
        top_n: Option<usize>,
        #[arg(long)]
        threshold: Option<f64>,
        /// Output directory (default: export.output_dir or a timestamped directory).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Show only the part of each name before its first underscore.
        #[arg(long)]
        sep: bool,
    },
}

#[derive(Serialize)]
struct ReduceOutput {
    graph: ReducedGraph,
    scene: LayoutScene,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    // RUST_LOG wins over graph.log_level
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.graph.log_level.as_str()),
    )
    .init();

    match cli.command {
        Command::Reduce {
            relations,
            top_n,
            threshold,
            pages,
        } => {
            apply_overrides(&mut config, top_n, threshold)?;
            run_reduce(&config, &relations, pages)
        }
        Command::Visualize {
            model,
            words,
            depth,
            top_n,
            threshold,
            output,
            sep,
        } => {
            apply_overrides(&mut config, top_n, threshold)?;
            if let Some(depth) = depth {
                config.graph.depth = depth;
            }
            if sep {
                config.graph.split_hyphen = true;
            }
            if output.is_some() {
                config.export.output_dir = output;
            }
            run_visualize(&config, &model, &words)
        }
    }
}

/// Apply CLI overrides and re-validate.
fn apply_overrides(config: &mut Config, top_n: Option<usize>, threshold: Option<f64>) -> Result<()> {
    if let Some(top_n) = top_n {
        config.graph.top_n = top_n;
    }
    if let Some(threshold) = threshold {
        config.graph.threshold = threshold;
    }
    config.validate()
}

fn run_reduce(config: &Config, path: &Path, pages: Vec<String>) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read relations file: {}", path.display()))?;
    let relations: Vec<Relation> =
        serde_json::from_str(&text).context("Relations must be a JSON array of {source, target, value}")?;

    let graph = GraphReducer::new(config.graph.top_n, config.graph.threshold())
        .with_pages(pages)
        .reduce(&relations)?;
    log::info!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());

    let scene = LayoutSession::new(config.layout.clone(), config.graph.split_hyphen).scene(&graph);
    println!("{}", serde_json::to_string_pretty(&ReduceOutput { graph, scene })?);
    Ok(())
}

fn run_visualize(config: &Config, model_path: &Path, words: &[String]) -> Result<()> {
    let model = KeyedVectors::load(model_path)
        .with_context(|| format!("Failed to load model: {}", model_path.display()))?;
    let dataset = collect_dataset(&model, words, config.graph.depth, config.graph.top_n)?;
    let output = config.export.output_dir();
    let written = export_dataset(&output, &dataset, config)?;
    println!("Visualizations written to {} ({} pages)", output.display(), written.len());
    Ok(())
}
