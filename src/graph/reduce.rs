//! Single-pass reduction of ranked relations into nodes and edges.

use std::collections::{HashMap, HashSet};

use super::{Edge, Node, ReducedGraph, Relation};
use crate::{Result, Vec2GraphError};

/// Reduces a ranked relation list into a star of `top_n` neighbors around the focal
/// node, plus threshold-filtered edges.
///
/// Invariant: the neighbor introduced by the relation at rank `k` (1 <= k <= top_n)
/// sits at node index `k`. Relations beyond `top_n` address nodes by those indices.
#[derive(Debug, Clone)]
pub struct GraphReducer {
    top_n: usize,
    threshold: f64,
    pages: HashSet<String>,
}

impl GraphReducer {
    pub fn new(top_n: usize, threshold: f64) -> Self {
        Self {
            top_n,
            threshold,
            pages: HashSet::new(),
        }
    }

    /// Names that get `has_page` set when they become neighbor nodes.
    pub fn with_pages<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages = pages.into_iter().map(Into::into).collect();
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run one reduction pass.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` if `relations` is empty, `top_n` is zero or the threshold is not finite.
    /// * `UnknownNode` if a relation beyond `top_n` that passes the threshold names a
    ///   source or target that never became a node.
    pub fn reduce(&self, relations: &[Relation]) -> Result<ReducedGraph> {
        if self.top_n == 0 {
            return Err(Vec2GraphError::InvalidInput(
                "top_n must be greater than 0".to_string(),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(Vec2GraphError::InvalidInput(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }
        let focal = relations.first().ok_or_else(|| {
            Vec2GraphError::InvalidInput("at least one relation is required".to_string())
        })?;

        let mut nodes = Vec::with_capacity(self.top_n.min(relations.len() - 1) + 1);
        let mut edges = Vec::new();
        let mut name_to_index: HashMap<&str, usize> = HashMap::new();

        nodes.push(Node::focal(&focal.source));
        name_to_index.insert(focal.source.as_str(), 0);

        for (rank, relation) in relations.iter().enumerate().skip(1) {
            let visible = relation.value > self.threshold;

            let (source_index, target_index) = if rank <= self.top_n {
                let index = nodes.len();
                debug_assert_eq!(index, rank);
                let has_page = self.pages.contains(&relation.target);
                nodes.push(Node::neighbor(&relation.target, has_page));
                // First assignment wins; a repeated name keeps its original index.
                name_to_index.entry(relation.target.as_str()).or_insert(index);
                (0, index)
            } else {
                if !visible {
                    continue;
                }
                (
                    lookup(&name_to_index, &relation.source, rank)?,
                    lookup(&name_to_index, &relation.target, rank)?,
                )
            };

            if visible {
                edges.push(Edge {
                    source_index,
                    target_index,
                    key: relation.target.clone(),
                    distance_basis: relation.distance_basis(),
                });
            }
        }

        log::debug!(
            "Reduced {} relations around '{}' into {} nodes and {} edges (top_n={}, threshold={})",
            relations.len(),
            focal.source,
            nodes.len(),
            edges.len(),
            self.top_n,
            self.threshold
        );

        Ok(ReducedGraph { nodes, edges })
    }
}

fn lookup(name_to_index: &HashMap<&str, usize>, name: &str, rank: usize) -> Result<usize> {
    name_to_index
        .get(name)
        .copied()
        .ok_or_else(|| Vec2GraphError::UnknownNode {
            name: name.to_string(),
            rank,
        })
}
