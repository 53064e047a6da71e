use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug};
use std::str::FromStr;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::algorithm::report::FrontierEntry;
use crate::{Error, NodeId};

/// Which frontier representation a run uses; chosen once at `begin`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontierMode {
    /// Binary min-heap of `(distance, node)` with lazy deletion
    PriorityQueue,
    /// Linear minimum scan over the unvisited set
    LinearScan,
}

impl FrontierMode {
    pub const ALL: [FrontierMode; 2] = [FrontierMode::PriorityQueue, FrontierMode::LinearScan];

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            FrontierMode::PriorityQueue => "Min-Heap",
            FrontierMode::LinearScan => "Linear Scan",
        }
    }
}

impl fmt::Display for FrontierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FrontierMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heap" | "pq" | "priority-queue" | "priorityqueue" => Ok(FrontierMode::PriorityQueue),
            "lin" | "linear" | "scan" | "linear-scan" | "linearscan" => Ok(FrontierMode::LinearScan),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

/// Outcome of asking a frontier for the next node to settle
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<W> {
    /// Settle this node at this distance
    Settle(NodeId, W),
    /// Nothing left to select
    Exhausted,
    /// Candidates remain but none has a finite distance
    Unreachable,
}

/// Frontier strategy shared by the heap and scan modes
///
/// Implementations never own the distance table; the engine passes it in.
pub trait Frontier<W>: Debug
where
    W: Float + Debug + Copy + Ord,
{
    /// The mode this frontier implements
    fn mode(&self) -> FrontierMode;

    /// Records that `node` now has tentative distance `distance`
    fn insert_or_update(&mut self, node: &str, distance: W);

    /// Removes and returns the unvisited node with the smallest tentative distance
    fn pop_min_unvisited(
        &mut self,
        distances: &BTreeMap<NodeId, W>,
        visited: &BTreeSet<NodeId>,
    ) -> Selection<W>;

    /// Current contents in display order
    fn entries(
        &self,
        distances: &BTreeMap<NodeId, W>,
        visited: &BTreeSet<NodeId>,
    ) -> Vec<FrontierEntry<W>>;

    /// Number of entries currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stale entries thrown away so far
    fn stale_discarded(&self) -> usize {
        0
    }
}
