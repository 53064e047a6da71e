use std::fmt::{Debug, Write};

use colored::{ColoredString, Colorize};
use num_traits::Float;

use crate::algorithm::report::{EngineSnapshot, RunState, RunSummary};
use crate::algorithm::FrontierMode;
use crate::graph::UndirectedGraph;
use crate::NodeId;

/// How a node should be painted, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// On the reported shortest path of a finished run
    Path,
    /// Settled by the latest step
    Current,
    Visited,
    Start,
    End,
    Unvisited,
}

impl NodeRole {
    /// Role of `node`; a path is only highlighted once the run has finished
    pub fn classify<W: Float + Debug>(snapshot: &EngineSnapshot<W>, path: Option<&[NodeId]>, node: &str) -> Self {
        let on_path = path.map_or(false, |path| path.iter().any(|step| step == node));
        if snapshot.state == RunState::Finished && on_path {
            NodeRole::Path
        } else if snapshot.current.as_deref() == Some(node) {
            NodeRole::Current
        } else if snapshot.is_visited(node) {
            NodeRole::Visited
        } else if snapshot.start == node {
            NodeRole::Start
        } else if snapshot.end == node {
            NodeRole::End
        } else {
            NodeRole::Unvisited
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            NodeRole::Path => text.truecolor(255, 165, 0).bold(),
            NodeRole::Current => text.bright_yellow().bold(),
            NodeRole::Visited => text.bright_black(),
            NodeRole::Start => text.bright_green().bold(),
            NodeRole::End => text.bright_red().bold(),
            NodeRole::Unvisited => text.bright_cyan(),
        }
    }
}

/// Distance label: `∞` when unreached, no decimals when whole
pub fn format_distance<W: Float>(distance: W) -> String {
    match distance.to_f64() {
        Some(d) if d.is_infinite() => "∞".to_string(),
        Some(d) if d.fract() == 0.0 => format!("{}", d as i64),
        Some(d) => format!("{:.1}", d),
        None => "?".to_string(),
    }
}

/// Heading of the frontier panel for the run's strategy
pub fn frontier_title(mode: Option<FrontierMode>) -> &'static str {
    match mode {
        Some(FrontierMode::LinearScan) => "Unvisited Nodes",
        _ => "Priority Queue",
    }
}

/// One-line status for the run state; a finished run also reports reachability
pub fn status_text(state: RunState, summary: Option<&RunSummary>) -> &'static str {
    match (state, summary) {
        (RunState::Idle, _) => "Select an algorithm and press Start",
        (RunState::Running, _) => "Running... Press Step to continue.",
        (RunState::Finished, Some(summary)) if summary.reachable => "Path found!",
        (RunState::Finished, _) => "Target is unreachable.",
    }
}

/// Elapsed time of a finished run, empty before that
pub fn timing_text(summary: Option<&RunSummary>) -> String {
    summary
        .map(|summary| format!("{:.1} ms", summary.elapsed_millis()))
        .unwrap_or_default()
}

/// Frontier panel rows: `d: node` for the heap, bare nodes for the scan
pub fn frontier_lines<W: Float + Debug>(snapshot: &EngineSnapshot<W>) -> Vec<String> {
    snapshot
        .frontier
        .iter()
        .map(|entry| match snapshot.mode {
            Some(FrontierMode::LinearScan) => entry.node.clone(),
            _ if entry.stale => format!("{}: {} (stale)", format_distance(entry.distance), entry.node),
            _ => format!("{}: {}", format_distance(entry.distance), entry.node),
        })
        .collect()
}

/// Renders snapshots as plain or coloured terminal text
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// `color` false renders plain text, as for `NO_COLOR` or tests
    pub fn new(color: bool) -> Self {
        Renderer { color }
    }

    /// Edge list, each undirected edge once
    pub fn describe_graph<W: Float + Debug>(&self, graph: &UndirectedGraph<W>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading("Graph"));
        for (a, b, weight) in graph.edges() {
            let _ = writeln!(out, "  {} - {}  ({})", a, b, format_distance(weight));
        }
        out
    }

    /// Header, status, node table and frontier panel; path and timing once finished
    pub fn render<W: Float + Debug>(
        &self,
        snapshot: &EngineSnapshot<W>,
        path: Option<&[NodeId]>,
        summary: Option<&RunSummary>,
    ) -> String {
        let mut out = String::new();
        let mode = snapshot.mode.map_or("-", |mode| mode.label());

        let _ = writeln!(out, "{} [{}]", self.heading("Dijkstra Visualizer"), mode);
        let _ = writeln!(out, "{}", status_text(snapshot.state, summary));

        for (node, distance) in &snapshot.distances {
            let role = NodeRole::classify(snapshot, path, node);
            let label = format!("{:>6}", node);
            let label = if self.color {
                role.paint(&label).to_string()
            } else {
                label
            };
            let _ = writeln!(out, "{}  {:>4}  {:?}", label, format_distance(*distance), role);
        }

        let _ = writeln!(out, "{}", self.heading(frontier_title(snapshot.mode)));
        for line in frontier_lines(snapshot) {
            let _ = writeln!(out, "  {}", line);
        }

        if snapshot.state == RunState::Finished {
            match path {
                Some(path) => {
                    let _ = writeln!(out, "Path: {}", path.join(" -> "));
                }
                None => {
                    let _ = writeln!(out, "Path: unreachable");
                }
            }
            let _ = writeln!(out, "Time: {}", timing_text(summary));
        }
        out
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}
