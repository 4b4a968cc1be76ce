pub mod config;
pub mod error;
pub mod graph;
pub mod embeddings;
pub mod layout;
pub mod export;

pub use config::Config;
pub use error::{Result, Vec2GraphError};
pub use graph::{link_distance, Edge, GraphReducer, Node, ReducedGraph, Relation};
