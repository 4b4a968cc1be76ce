//! Layout scene: the data a force-layout engine and a renderer need for one graph.
//!
//! A [`LayoutSession`] owns the physics parameters for one rendering session. Every
//! rebuild passes a fresh [`ReducedGraph`] and gets back a self-contained scene;
//! nothing is shared between scenes.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::graph::{display_name, page_stem, ReducedGraph};

/// Fill color of the focal node.
pub const FOCAL_COLOR: &str = "#F4B400";
/// Fill color of every other node.
pub const NEIGHBOR_COLOR: &str = "#DB4437";
/// Outline width of nodes that link to a page.
pub const PAGE_STROKE_WIDTH: f64 = 3.0;

/// Global physics parameters for the force-layout engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Physics {
    pub gravity: f64,
    pub charge: f64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub name: String,
    pub label: String,
    pub color: &'static str,
    pub radius: f64,
    pub stroke_width: f64,
    /// Navigation target, only for nodes with a page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLink {
    pub source: usize,
    pub target: usize,
    pub key: String,
    /// Desired link length.
    pub distance: f64,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutScene {
    pub physics: Physics,
    pub nodes: Vec<SceneNode>,
    pub links: Vec<SceneLink>,
}

/// Physics and styling for one rendering session.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    config: LayoutConfig,
    split_hyphen: bool,
}

impl LayoutSession {
    pub fn new(config: LayoutConfig, split_hyphen: bool) -> Self {
        Self {
            config,
            split_hyphen,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Change the canvas size, e.g. after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
    }

    pub fn physics(&self) -> Physics {
        Physics {
            gravity: self.config.gravity,
            charge: self.config.charge,
            width: self.config.width,
            height: self.config.height,
        }
    }

    /// Build the scene for `graph`.
    pub fn scene(&self, graph: &ReducedGraph) -> LayoutScene {
        let radius = self.config.radius;

        let nodes = graph
            .nodes
            .iter()
            .map(|node| SceneNode {
                name: node.name.clone(),
                label: display_name(&node.name, self.split_hyphen).to_string(),
                color: if node.is_focal { FOCAL_COLOR } else { NEIGHBOR_COLOR },
                radius: if node.is_focal { radius * 1.5 } else { radius },
                stroke_width: if node.has_page { PAGE_STROKE_WIDTH } else { 0.0 },
                href: node.has_page.then(|| format!("{}.html", page_stem(&node.name))),
            })
            .collect();

        let links = graph
            .edges
            .iter()
            .map(|edge| SceneLink {
                source: edge.source_index,
                target: edge.target_index,
                key: edge.key.clone(),
                distance: edge.link_distance(self.config.distance_unit, radius),
                stroke_width: self.config.link_stroke_width,
            })
            .collect();

        LayoutScene {
            physics: self.physics(),
            nodes,
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{link_distance, GraphReducer, Relation};

    fn graph() -> ReducedGraph {
        let relations = vec![
            Relation::new("cat_NOUN", "cat_NOUN", 1.0),
            Relation::new("cat_NOUN", "dog_NOUN", 0.8),
            Relation::new("cat_NOUN", "kitten_NOUN", 0.9),
            Relation::new("dog_NOUN", "kitten_NOUN", 0.6),
        ];
        GraphReducer::new(2, 0.5)
            .with_pages(["dog_NOUN"])
            .reduce(&relations)
            .unwrap()
    }

    #[test]
    fn test_scene_node_styles() {
        let session = LayoutSession::new(LayoutConfig::default(), true);
        let scene = session.scene(&graph());
        assert_eq!(scene.nodes.len(), 3);

        let focal = &scene.nodes[0];
        assert_eq!(focal.color, FOCAL_COLOR);
        assert_eq!(focal.radius, 15.0);
        assert_eq!(focal.label, "cat");
        assert!(focal.href.is_none());

        let dog = &scene.nodes[1];
        assert_eq!(dog.color, NEIGHBOR_COLOR);
        assert_eq!(dog.radius, 10.0);
        assert_eq!(dog.stroke_width, PAGE_STROKE_WIDTH);
        assert_eq!(dog.href.as_deref(), Some("dog_NOUN.html"));

        assert_eq!(scene.nodes[2].stroke_width, 0.0);
        assert!(scene.nodes[2].href.is_none());
    }

    #[test]
    fn test_scene_labels_without_split() {
        let session = LayoutSession::new(LayoutConfig::default(), false);
        let scene = session.scene(&graph());
        assert_eq!(scene.nodes[0].label, "cat_NOUN");
    }

    #[test]
    fn test_scene_link_distances() {
        let session = LayoutSession::new(LayoutConfig::default(), false);
        let graph = graph();
        let scene = session.scene(&graph);
        assert_eq!(scene.links.len(), graph.edges.len());
        for (link, edge) in scene.links.iter().zip(graph.edges.iter()) {
            assert_eq!(link.source, edge.source_index);
            assert_eq!(link.target, edge.target_index);
            assert_eq!(link.distance, link_distance(edge.distance_basis, 100.0, 10.0));
            assert_eq!(link.stroke_width, 1.0);
        }
    }

    #[test]
    fn test_session_resize_only_changes_canvas() {
        let mut session = LayoutSession::new(LayoutConfig::default(), false);
        session.resize(1280, 720);
        let physics = session.physics();
        assert_eq!((physics.width, physics.height), (1280, 720));
        assert_eq!(physics.gravity, 0.05);
        assert_eq!(physics.charge, -100.0);
    }

    #[test]
    fn test_scene_href_matches_page_file() {
        let relations = vec![
            Relation::new("x", "x", 1.0),
            Relation::new("x", "and/or", 0.9),
            Relation::new("x", "..", 0.8),
        ];
        let graph = GraphReducer::new(2, 0.5)
            .with_pages(["and/or", ".."])
            .reduce(&relations)
            .unwrap();
        let scene = LayoutSession::new(LayoutConfig::default(), false).scene(&graph);
        assert_eq!(scene.nodes[1].href.as_deref(), Some("and%2For.html"));
        assert_eq!(scene.nodes[2].href.as_deref(), Some("%2E%2E.html"));
        assert_eq!(scene.nodes[1].name, "and/or");
    }

    #[test]
    fn test_scene_serializes_for_engine() {
        let session = LayoutSession::new(LayoutConfig::default(), false);
        let json = serde_json::to_value(session.scene(&graph())).unwrap();
        assert_eq!(json["physics"]["gravity"], 0.05);
        assert_eq!(json["nodes"][1]["href"], "dog_NOUN.html");
        assert!(json["nodes"][0].get("href").is_none());
        assert!(json["links"][0]["strokeWidth"].is_number());
    }
}
