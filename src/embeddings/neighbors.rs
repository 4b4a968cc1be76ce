//! Ranked relations for a query word, and multi-word datasets built from them.

use std::collections::{HashMap, HashSet, VecDeque};

use super::SimilarityModel;
use crate::error::{Result, Vec2GraphError};
use crate::graph::Relation;

/// Ranked relations for `word`.
///
/// Layout of the returned list:
/// 1. the focal self-relation `{word, word, 1.0}`,
/// 2. `{word, n, sim}` for each of the `topn` nearest neighbors, best first,
/// 3. `{a, b, sim(a, b)}` for every neighbor pair, `a` ranked before `b`.
///
/// Also returns the neighbor words in rank order.
pub fn ranked_relations<M: SimilarityModel + ?Sized>(
    model: &M,
    word: &str,
    topn: usize,
) -> Result<(Vec<Relation>, Vec<String>)> {
    let most_similar = model.most_similar(word, topn)?;
    let neighbors: Vec<String> = most_similar.iter().map(|(n, _)| n.clone()).collect();

    let pair_count = neighbors.len() * neighbors.len().saturating_sub(1) / 2;
    let mut relations = Vec::with_capacity(1 + neighbors.len() + pair_count);
    relations.push(Relation::new(word, word, 1.0));
    for (neighbor, similarity) in most_similar {
        relations.push(Relation::new(word, neighbor, similarity));
    }
    for (i, a) in neighbors.iter().enumerate() {
        for b in &neighbors[i + 1..] {
            relations.push(Relation::new(a.as_str(), b.as_str(), model.similarity(a, b)?));
        }
    }

    Ok((relations, neighbors))
}

/// Relations for one page (one focal word).
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub word: String,
    pub relations: Vec<Relation>,
}

/// Pages keyed by word, in first-inserted order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page. Replacing an existing word keeps its original position.
    pub fn insert(&mut self, word: String, relations: Vec<Relation>) {
        match self.index.get(&word) {
            Some(&i) => self.pages[i].relations = relations,
            None => {
                self.index.insert(word.clone(), self.pages.len());
                self.pages.push(Page { word, relations });
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&Page> {
        self.index.get(word).map(|&i| &self.pages[i])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_names(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.word.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Collect pages for `words` and, when `depth > 0`, for their neighbors up to
/// `depth` levels away (breadth-first, each word computed once).
///
/// A single missing word is an error; within a longer list missing words are
/// skipped with a warning.
pub fn collect_dataset<M, S>(model: &M, words: &[S], depth: usize, topn: usize) -> Result<Dataset>
where
    M: SimilarityModel + ?Sized,
    S: AsRef<str>,
{
    if words.is_empty() {
        return Err(Vec2GraphError::InvalidInput("no words to visualize".to_string()));
    }

    let mut dataset = Dataset::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    for word in words {
        let word = word.as_ref();
        if word.is_empty() {
            return Err(Vec2GraphError::InvalidInput("empty word".to_string()));
        }
        if !model.contains(word) {
            if words.len() == 1 {
                return Err(Vec2GraphError::WordNotFound(word.to_string()));
            }
            log::warn!("{} is not in model, skipping", word);
            continue;
        }
        if visited.insert(word.to_string()) {
            queue.push_back((word.to_string(), depth));
        }
    }

    while let Some((word, remaining)) = queue.pop_front() {
        let (relations, neighbors) = ranked_relations(model, &word, topn)?;
        log::debug!("{}: {} relations, {} neighbors", word, relations.len(), neighbors.len());
        dataset.insert(word, relations);

        if remaining == 0 {
            continue;
        }
        for neighbor in neighbors {
            if visited.insert(neighbor.clone()) {
                queue.push_back((neighbor, remaining - 1));
            }
        }
    }

    if dataset.is_empty() {
        return Err(Vec2GraphError::InvalidInput(
            "none of the requested words are in the model".to_string(),
        ));
    }
    Ok(dataset)
}
