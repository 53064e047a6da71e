use std::collections::BTreeSet;

use crate::NodeId;

/// The set of nodes not yet settled, searched by linear scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnvisitedSet {
    nodes: BTreeSet<NodeId>,
}

impl UnvisitedSet {
    /// Creates a set holding every given node
    pub fn new<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        UnvisitedSet {
            nodes: nodes.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of nodes still unsettled
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes a node, returning whether it was present
    pub fn remove(&mut self, node: &str) -> bool {
        self.nodes.remove(node)
    }

    /// Iterates in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(String::as_str)
    }

    /// Scans every member for the smallest `distance`
    ///
    /// Ties go to the lowest identifier: members are visited in ascending order
    /// and only a strictly smaller distance replaces the current best.
    pub fn min_by_distance<P, F>(&self, mut distance: F) -> Option<(&str, P)>
    where
        P: PartialOrd + Copy,
        F: FnMut(&str) -> P,
    {
        let mut best: Option<(&str, P)> = None;
        for node in self.iter() {
            let d = distance(node);
            match best {
                Some((_, best_d)) if !(d < best_d) => {}
                _ => best = Some((node, d)),
            }
        }
        best
    }
}
