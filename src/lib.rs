//! Dijkstra Stepper - incremental single-source shortest paths
//!
//! This library runs Dijkstra's algorithm one settled node at a time so that a
//! presentation shell can render the intermediate state after every step.
//!
//! Two frontier strategies are interchangeable at run start: a binary min-heap
//! with lazy deletion of stale entries, and a linear scan over the unvisited set.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod shell;

pub use algorithm::{
    engine::StepEngine,
    report::{EngineSnapshot, FinishReason, RunState, RunSummary, StepResult, StepStatus},
    Frontier, FrontierMode,
};
/// Re-export main types for convenient use
pub use graph::undirected::{GraphBuilder, UndirectedGraph};

/// Default concrete edge weight
pub type Weight = ordered_float::OrderedFloat<f64>;

/// Node identifier
pub type NodeId = String;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid state: expected {expected:?}, engine is {actual:?}")]
    InvalidState {
        expected: RunState,
        actual: RunState,
    },

    #[error("Negative edge weight {weight} on edge {from} -> {to}")]
    NegativeWeight { from: String, to: String, weight: f64 },

    #[error("Edge {from} -> {to} has no matching reverse edge")]
    AsymmetricEdge { from: String, to: String },

    #[error("Unknown frontier mode: {0}")]
    InvalidMode(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
