//! Graph reduction: ranked relations in, bounded node/edge sets out.
//!
//! The first `top_n` relations after the focal one each introduce a neighbor node;
//! later relations may only add edges between nodes that already exist.

mod distance;
mod label;
mod reduce;

pub use distance::{link_distance, DEFAULT_DISTANCE_UNIT, DEFAULT_RADIUS};
pub use label::{display_name, page_stem};
pub use reduce::GraphReducer;

use serde::{Deserialize, Serialize};

/// A single ranked relation (source --value--> target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub source: String,
    pub target: String,
    /// Similarity score in (0, 1]; higher ranks come first.
    pub value: f64,
}

impl Relation {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }

    /// Dissimilarity used to derive layout distance.
    pub fn distance_basis(&self) -> f64 {
        1.0 - self.value
    }
}

/// A node of the reduced graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    pub is_focal: bool,
    pub is_neighbor: bool,
    /// Name is in the page allow-list, so the renderer may link to it.
    pub has_page: bool,
}

impl Node {
    fn focal(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_focal: true,
            is_neighbor: false,
            has_page: false,
        }
    }

    fn neighbor(name: &str, has_page: bool) -> Self {
        Self {
            name: name.to_string(),
            is_focal: false,
            is_neighbor: true,
            has_page,
        }
    }
}

/// An edge between two nodes, referenced by position in the node sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source_index: usize,
    pub target_index: usize,
    /// Target name of the originating relation.
    pub key: String,
    pub distance_basis: f64,
}

/// Output of one reduction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReducedGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ReducedGraph {
    pub fn focal(&self) -> Option<&Node> {
        self.nodes.first()
    }
}
