//! Export: one JSON document per page, ready for a force-layout front end.
//!
//! Every page is reduced with the same settings, and every page name is on the
//! allow-list, so neighbors that have their own page become navigable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::embeddings::Dataset;
use crate::error::Result;
use crate::graph::{page_stem, GraphReducer, ReducedGraph};
use crate::layout::{LayoutScene, LayoutSession};

/// Contents of `<word>.json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument<'a> {
    pub word: &'a str,
    pub top_n: usize,
    pub threshold: f64,
    /// Every exported page, for cross-page navigation.
    pub pages: &'a [String],
    pub graph: ReducedGraph,
    pub scene: LayoutScene,
}

/// Contents of `index.json`
#[derive(Debug, Serialize)]
pub struct ExportIndex<'a> {
    pub version: u32,
    pub pages: &'a [String],
}

/// Write `<word>.json` for each page of `dataset` plus `index.json` into `dir`.
/// Returns the written page paths in dataset order.
pub fn export_dataset(dir: &Path, dataset: &Dataset, config: &Config) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let pages = dataset.page_names();
    let reducer = GraphReducer::new(config.graph.top_n, config.graph.threshold())
        .with_pages(pages.iter().cloned());
    let session = LayoutSession::new(config.layout.clone(), config.graph.split_hyphen);

    let mut written = Vec::with_capacity(pages.len());
    for page in dataset.pages() {
        let graph = reducer.reduce(&page.relations)?;
        let scene = session.scene(&graph);
        let document = PageDocument {
            word: &page.word,
            top_n: reducer.top_n(),
            threshold: reducer.threshold(),
            pages: &pages,
            graph,
            scene,
        };
        let path = dir.join(format!("{}.json", page_stem(&page.word)));
        write_json(&path, &document)?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }

    write_json(
        &dir.join("index.json"),
        &ExportIndex {
            version: 1,
            pages: &pages,
        },
    )?;

    log::info!("Visualizations written to {} ({} pages)", dir.display(), written.len());
    Ok(written)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Relation;
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.insert(
            "cat".to_string(),
            vec![
                Relation::new("cat", "cat", 1.0),
                Relation::new("cat", "dog", 0.8),
                Relation::new("cat", "car", 0.2),
                Relation::new("dog", "car", 0.1),
            ],
        );
        dataset.insert(
            "dog".to_string(),
            vec![Relation::new("dog", "dog", 1.0), Relation::new("dog", "cat", 0.8)],
        );
        dataset
    }

    fn config(threshold: f64) -> Config {
        let mut config = Config::default();
        config.graph.top_n = 2;
        config.graph.threshold = threshold;
        config
    }

    #[test]
    fn test_export_writes_pages_and_index() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("viz");
        let written = export_dataset(&out, &dataset(), &config(0.5)).unwrap();
        assert_eq!(written, vec![out.join("cat.json"), out.join("dog.json")]);

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("index.json")).unwrap()).unwrap();
        assert_eq!(index["pages"], serde_json::json!(["cat", "dog"]));
    }

    #[test]
    fn test_export_page_content() {
        let temp_dir = TempDir::new().unwrap();
        export_dataset(temp_dir.path(), &dataset(), &config(0.5)).unwrap();
        let page: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(temp_dir.path().join("cat.json")).unwrap(),
        )
        .unwrap();

        assert_eq!(page["word"], "cat");
        assert_eq!(page["topN"], 2);
        assert_eq!(page["graph"]["nodes"].as_array().unwrap().len(), 3);
        // Only cat -> dog clears the threshold.
        assert_eq!(page["graph"]["edges"].as_array().unwrap().len(), 1);
        // "dog" has its own page, "car" does not.
        assert_eq!(page["graph"]["nodes"][1]["hasPage"], true);
        assert_eq!(page["graph"]["nodes"][2]["hasPage"], false);
        assert_eq!(page["scene"]["nodes"][1]["href"], "dog.html");
    }

    #[test]
    fn test_export_uses_normalized_threshold() {
        let temp_dir = TempDir::new().unwrap();
        export_dataset(temp_dir.path(), &dataset(), &config(15.0)).unwrap();
        let page: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(temp_dir.path().join("cat.json")).unwrap(),
        )
        .unwrap();
        assert!((page["threshold"].as_f64().unwrap() - 0.15).abs() < 1e-12);
        // cat -> dog (0.8) and cat -> car (0.2); dog -> car (0.1) is filtered.
        assert_eq!(page["graph"]["edges"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_export_keeps_unsafe_words_inside_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("viz");
        let mut dataset = Dataset::new();
        for word in ["../escape", "and/or", ".."] {
            dataset.insert(word.to_string(), vec![Relation::new(word, word, 1.0)]);
        }
        let written = export_dataset(&out, &dataset, &config(0.5)).unwrap();
        assert_eq!(
            written,
            vec![
                out.join("..%2Fescape.json"),
                out.join("and%2For.json"),
                out.join("%2E%2E.json"),
            ]
        );
        assert!(written.iter().all(|p| p.parent() == Some(out.as_path()) && p.is_file()));
        assert!(!temp_dir.path().join("escape.json").exists());

        let page: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
        assert_eq!(page["word"], "and/or");
    }

    #[test]
    fn test_export_propagates_reduction_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut dataset = Dataset::new();
        dataset.insert(
            "a".to_string(),
            vec![
                Relation::new("a", "a", 1.0),
                Relation::new("a", "b", 0.9),
                Relation::new("b", "zzz", 0.9),
            ],
        );
        let mut config = config(0.5);
        config.graph.top_n = 1;
        let err = export_dataset(temp_dir.path(), &dataset, &config).unwrap_err();
        assert!(matches!(err, crate::Vec2GraphError::UnknownNode { .. }));
    }
}
