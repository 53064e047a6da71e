use crate::graph::traits::Graph;
use crate::{Error, NodeId, Result};
use num_traits::Float;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// An undirected weighted graph stored as duplicated directed adjacency entries
///
/// Immutable once built. Every entry `(b, w)` in `a`'s list is mirrored by
/// `(a, w)` in `b`'s list, and all weights are non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct UndirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    /// node -> [(neighbor, weight)] in insertion order
    adjacency: BTreeMap<NodeId, Vec<(NodeId, W)>>,
}

impl<W> UndirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    /// Starts building a graph edge by edge
    pub fn builder() -> GraphBuilder<W> {
        GraphBuilder::new()
    }

    /// Builds a graph from a literal adjacency mapping
    ///
    /// Rejects neighbors that are not themselves keys, negative weights, and
    /// entries without a reverse entry of equal weight.
    pub fn from_adjacency<I, N, E>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, E)>,
        N: Into<NodeId>,
        E: IntoIterator<Item = (N, W)>,
    {
        let adjacency: BTreeMap<NodeId, Vec<(NodeId, W)>> = adjacency
            .into_iter()
            .map(|(node, edges)| {
                let node: NodeId = node.into();
                let edges: Vec<(NodeId, W)> = edges
                    .into_iter()
                    .map(|(neighbor, weight)| (neighbor.into(), weight))
                    .collect();
                (node, edges)
            })
            .collect();

        for (node, edges) in &adjacency {
            for (neighbor, weight) in edges {
                check_weight(node, neighbor, *weight)?;
                let reverse = adjacency
                    .get(neighbor)
                    .ok_or_else(|| Error::UnknownNode(neighbor.clone()))?;
                let mirrored = reverse
                    .iter()
                    .any(|(back, back_weight)| back == node && back_weight == weight);
                if !mirrored {
                    return Err(Error::AsymmetricEdge {
                        from: node.clone(),
                        to: neighbor.clone(),
                    });
                }
            }
        }

        Ok(UndirectedGraph { adjacency })
    }

    /// Iterates over each undirected edge once, as `(a, b, weight)` with `a <= b`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, W)> + '_ {
        self.adjacency.iter().flat_map(|(node, edges)| {
            edges
                .iter()
                .filter(move |(neighbor, _)| node <= neighbor)
                .map(move |(neighbor, weight)| (node.as_str(), neighbor.as_str(), *weight))
        })
    }
}

impl<W> Graph<W> for UndirectedGraph<W>
where
    W: Float + Debug + Copy,
{
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges().count()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.adjacency.keys().map(String::as_str))
    }

    fn neighbors(&self, node: &str) -> Result<Box<dyn Iterator<Item = (&str, W)> + '_>> {
        match self.adjacency.get(node) {
            Some(edges) => Ok(Box::new(
                edges.iter().map(|(neighbor, weight)| (neighbor.as_str(), *weight)),
            )),
            None => Err(Error::UnknownNode(node.to_string())),
        }
    }

    fn has_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    fn edge_weight(&self, from: &str, to: &str) -> Option<W> {
        self.adjacency
            .get(from)?
            .iter()
            .find(|(neighbor, _)| neighbor == to)
            .map(|(_, weight)| *weight)
    }
}

/// Incremental builder that keeps both directions of every edge in step
#[derive(Debug, Clone)]
pub struct GraphBuilder<W>
where
    W: Float + Debug + Copy,
{
    adjacency: BTreeMap<NodeId, Vec<(NodeId, W)>>,
}

impl<W> Default for GraphBuilder<W>
where
    W: Float + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> GraphBuilder<W>
where
    W: Float + Debug + Copy,
{
    /// Creates a builder with no nodes
    pub fn new() -> Self {
        GraphBuilder {
            adjacency: BTreeMap::new(),
        }
    }

    /// Adds an isolated node; a no-op if it already exists
    pub fn node(mut self, node: impl Into<NodeId>) -> Self {
        self.adjacency.entry(node.into()).or_default();
        self
    }

    /// Adds an undirected edge, creating missing endpoints
    ///
    /// Adding the same pair again overwrites the weight in both directions.
    pub fn edge(mut self, a: impl Into<NodeId>, b: impl Into<NodeId>, weight: W) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        check_weight(&a, &b, weight)?;

        self.insert_directed(&a, &b, weight);
        if a != b {
            self.insert_directed(&b, &a, weight);
        }
        Ok(self)
    }

    /// Freezes the builder into an immutable graph
    pub fn build(self) -> UndirectedGraph<W> {
        UndirectedGraph {
            adjacency: self.adjacency,
        }
    }

    fn insert_directed(&mut self, from: &str, to: &str, weight: W) {
        let edges = self.adjacency.entry(from.to_string()).or_default();
        match edges.iter_mut().find(|(neighbor, _)| neighbor == to) {
            Some(edge) => edge.1 = weight,
            None => edges.push((to.to_string(), weight)),
        }
        self.adjacency.entry(to.to_string()).or_default();
    }
}

fn check_weight<W>(from: &str, to: &str, weight: W) -> Result<()>
where
    W: Float + Debug + Copy,
{
    // NaN fails this comparison as well
    if weight >= W::zero() {
        Ok(())
    } else {
        Err(Error::NegativeWeight {
            from: from.to_string(),
            to: to.to_string(),
            weight: weight.to_f64().unwrap_or(f64::NAN),
        })
    }
}
