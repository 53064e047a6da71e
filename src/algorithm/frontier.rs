use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use log::trace;
use num_traits::Float;

use crate::algorithm::report::FrontierEntry;
use crate::algorithm::traits::{Frontier, FrontierMode, Selection};
use crate::data_structures::{MinHeap, UnvisitedSet};
use crate::graph::Graph;
use crate::NodeId;

impl FrontierMode {
    /// Creates the initial frontier for a run from `start`
    ///
    /// The heap is seeded with `(0, start)`; the scan frontier starts as every node.
    pub fn build<W, G>(self, graph: &G, start: &str) -> Box<dyn Frontier<W>>
    where
        W: Float + Debug + Copy + Ord + 'static,
        G: Graph<W> + ?Sized,
    {
        match self {
            FrontierMode::PriorityQueue => {
                let mut frontier = HeapFrontier::new();
                frontier.insert_or_update(start, W::zero());
                Box::new(frontier)
            }
            FrontierMode::LinearScan => Box::new(ScanFrontier::new(graph.nodes())),
        }
    }
}

/// Min-heap frontier that may hold several entries per node
#[derive(Debug, Clone)]
pub struct HeapFrontier<W>
where
    W: Float + Debug + Copy + Ord,
{
    heap: MinHeap<NodeId, W>,
    stale_discarded: usize,
}

impl<W> Default for HeapFrontier<W>
where
    W: Float + Debug + Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> HeapFrontier<W>
where
    W: Float + Debug + Copy + Ord,
{
    /// Creates an empty heap frontier
    pub fn new() -> Self {
        HeapFrontier {
            heap: MinHeap::new(),
            stale_discarded: 0,
        }
    }
}

impl<W> Frontier<W> for HeapFrontier<W>
where
    W: Float + Debug + Copy + Ord,
{
    fn mode(&self) -> FrontierMode {
        FrontierMode::PriorityQueue
    }

    fn insert_or_update(&mut self, node: &str, distance: W) {
        // Older entries for the node stay behind and are skipped on pop
        self.heap.push(node.to_string(), distance);
    }

    fn pop_min_unvisited(
        &mut self,
        _distances: &BTreeMap<NodeId, W>,
        visited: &BTreeSet<NodeId>,
    ) -> Selection<W> {
        let (entry, discarded) = self.heap.pop_fresh(|node| visited.contains(node));
        if discarded > 0 {
            trace!("discarded {} stale heap entries", discarded);
        }
        self.stale_discarded += discarded;

        match entry {
            Some((node, distance)) => Selection::Settle(node, distance),
            None => Selection::Exhausted,
        }
    }

    fn entries(
        &self,
        distances: &BTreeMap<NodeId, W>,
        visited: &BTreeSet<NodeId>,
    ) -> Vec<FrontierEntry<W>> {
        self.heap
            .sorted_entries()
            .into_iter()
            .map(|(distance, node)| {
                // Superseded by a later, shorter entry or already settled
                let superseded = distances.get(&node).map_or(false, |best| distance > *best);
                let stale = superseded || visited.contains(&node);
                FrontierEntry { node, distance, stale }
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn stale_discarded(&self) -> usize {
        self.stale_discarded
    }
}

/// Frontier that is literally the unvisited set
#[derive(Debug, Clone)]
pub struct ScanFrontier {
    unvisited: UnvisitedSet,
}

impl ScanFrontier {
    /// Creates a frontier over every given node
    pub fn new<'a, I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        ScanFrontier {
            unvisited: UnvisitedSet::new(nodes),
        }
    }
}

impl<W> Frontier<W> for ScanFrontier
where
    W: Float + Debug + Copy + Ord,
{
    fn mode(&self) -> FrontierMode {
        FrontierMode::LinearScan
    }

    fn insert_or_update(&mut self, _node: &str, _distance: W) {
        // Distances are read from the table at scan time
    }

    fn pop_min_unvisited(
        &mut self,
        distances: &BTreeMap<NodeId, W>,
        _visited: &BTreeSet<NodeId>,
    ) -> Selection<W> {
        let best = self
            .unvisited
            .min_by_distance(|node| distance_of(distances, node))
            .map(|(node, distance)| (node.to_string(), distance));

        match best {
            None => Selection::Exhausted,
            // Everything left is unreachable; leave the set as is
            Some((_, distance)) if distance.is_infinite() => Selection::Unreachable,
            Some((node, distance)) => {
                self.unvisited.remove(&node);
                Selection::Settle(node, distance)
            }
        }
    }

    fn entries(
        &self,
        distances: &BTreeMap<NodeId, W>,
        _visited: &BTreeSet<NodeId>,
    ) -> Vec<FrontierEntry<W>> {
        let mut entries: Vec<FrontierEntry<W>> = self
            .unvisited
            .iter()
            .map(|node| FrontierEntry {
                node: node.to_string(),
                distance: distance_of(distances, node),
                stale: false,
            })
            .collect();
        // Stable sort keeps identifier order among equal distances
        entries.sort_by_key(|entry| entry.distance);
        entries
    }

    fn len(&self) -> usize {
        self.unvisited.len()
    }
}

fn distance_of<W>(distances: &BTreeMap<NodeId, W>, node: &str) -> W
where
    W: Float + Copy,
{
    distances.get(node).copied().unwrap_or_else(W::infinity)
}
