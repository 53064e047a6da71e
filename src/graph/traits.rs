use std::fmt::Debug;
use num_traits::Float;

use crate::Result;

/// Trait representing an immutable weighted graph keyed by node identifier
pub trait Graph<W>: Debug
where
    W: Float + Debug + Copy,
{
    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of undirected edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over all node identifiers in ascending order
    fn nodes(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Returns the ordered `(neighbor, weight)` pairs of a node
    ///
    /// Fails with [`crate::Error::UnknownNode`] if the node is not present.
    fn neighbors(&self, node: &str) -> Result<Box<dyn Iterator<Item = (&str, W)> + '_>>;

    /// Returns true if the node exists in the graph
    fn has_node(&self, node: &str) -> bool;

    /// Gets the weight of an edge if it exists
    fn edge_weight(&self, from: &str, to: &str) -> Option<W>;
}
