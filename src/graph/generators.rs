use crate::graph::UndirectedGraph;
use crate::{Result, Weight};
use ordered_float::OrderedFloat;
use rand::prelude::*;

/// Start node of the demo graph
pub const DEMO_START: &str = "A";
/// End node of the demo graph
pub const DEMO_END: &str = "G";

/// The seven-node teaching graph
///
/// Shortest A -> G route is A-B-D-E-G with cost 6.
pub fn demo_graph() -> Result<UndirectedGraph<Weight>> {
    let w = |value: f64| OrderedFloat(value);
    UndirectedGraph::from_adjacency(vec![
        ("A", vec![("B", w(2.0)), ("C", w(5.0))]),
        ("B", vec![("A", w(2.0)), ("C", w(6.0)), ("D", w(1.0))]),
        ("C", vec![("A", w(5.0)), ("B", w(6.0)), ("E", w(3.0))]),
        ("D", vec![("B", w(1.0)), ("E", w(1.0)), ("F", w(4.0))]),
        ("E", vec![("C", w(3.0)), ("D", w(1.0)), ("G", w(2.0))]),
        ("F", vec![("D", w(4.0)), ("G", w(1.0))]),
        ("G", vec![("E", w(2.0)), ("F", w(1.0))]),
    ])
}

/// The demo graph with every edge touching G removed, leaving G isolated
pub fn demo_graph_without_target_edges() -> Result<UndirectedGraph<Weight>> {
    let full = demo_graph()?;
    let mut builder = UndirectedGraph::builder().node(DEMO_END);
    for (a, b, weight) in full.edges() {
        if a != DEMO_END && b != DEMO_END {
            builder = builder.edge(a, b, weight)?;
        }
    }
    Ok(builder.build())
}

/// Label used for the `i`-th generated node
///
/// Zero-padded to six digits, so lexical order matches numeric order for
/// `i < 1_000_000`. Larger indices still get unique labels but sort out of order.
pub fn node_label(i: usize) -> String {
    format!("v{:06}", i)
}

/// Generates a connected graph: a random spanning tree plus `extra_edges` random chords
///
/// Weights are small integers so that equal-cost paths show up regularly.
pub fn generate_random_connected<R: Rng>(
    n: usize,
    extra_edges: usize,
    rng: &mut R,
) -> Result<UndirectedGraph<Weight>> {
    let mut builder = UndirectedGraph::builder();
    if n == 0 {
        return Ok(builder.build());
    }
    builder = builder.node(node_label(0));

    // Attach each new node to a random earlier one
    for i in 1..n {
        let parent = rng.gen_range(0..i);
        let weight = OrderedFloat(rng.gen_range(1..=20) as f64);
        builder = builder.edge(node_label(i), node_label(parent), weight)?;
    }

    for _ in 0..extra_edges {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a != b {
            let weight = OrderedFloat(rng.gen_range(1..=20) as f64);
            builder = builder.edge(node_label(a), node_label(b), weight)?;
        }
    }

    Ok(builder.build())
}

/// Generates `components` disjoint connected pieces over `n` nodes in total
///
/// Node `i` belongs to component `i % components`.
pub fn generate_components<R: Rng>(
    n: usize,
    components: usize,
    rng: &mut R,
) -> Result<UndirectedGraph<Weight>> {
    let components = components.max(1);
    let mut builder = UndirectedGraph::builder();
    for i in 0..n {
        builder = builder.node(node_label(i));
        // Earlier members of the same component
        let peers: Vec<usize> = (0..i).filter(|j| j % components == i % components).collect();
        if let Some(&peer) = peers.choose(rng) {
            let weight = OrderedFloat(rng.gen_range(1..=20) as f64);
            builder = builder.edge(node_label(i), node_label(peer), weight)?;
        }
    }
    Ok(builder.build())
}

/// Generates a `width` x `height` grid with unit weights
pub fn generate_grid(width: usize, height: usize) -> Result<UndirectedGraph<Weight>> {
    let label = |x: usize, y: usize| node_label(y * width + x);
    let mut builder = UndirectedGraph::builder();

    for y in 0..height {
        for x in 0..width {
            builder = builder.node(label(x, y));
            if x + 1 < width {
                builder = builder.edge(label(x, y), label(x + 1, y), OrderedFloat(1.0))?;
            }
            if y + 1 < height {
                builder = builder.edge(label(x, y), label(x, y + 1), OrderedFloat(1.0))?;
            }
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use rand::rngs::StdRng;

    #[test]
    fn demo_graph_shape() {
        let graph = demo_graph().unwrap();
        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.edge_count(), 9);
        assert_eq!(graph.edge_weight("F", "G"), Some(OrderedFloat(1.0)));
    }

    #[test]
    fn target_edges_removed() {
        let graph = demo_graph_without_target_edges().unwrap();
        assert!(graph.has_node(DEMO_END));
        assert_eq!(graph.neighbors(DEMO_END).unwrap().count(), 0);
        assert_eq!(graph.edge_count(), 7);
        assert_eq!(graph.edge_weight("F", "G"), None);
    }

    #[test]
    fn random_connected_has_spanning_tree() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate_random_connected(50, 30, &mut rng).unwrap();
        assert_eq!(graph.node_count(), 50);
        assert!(graph.edge_count() >= 49);
    }

    #[test]
    fn labels_sort_numerically_past_ten_thousand() {
        let indices = [0, 9, 10, 999, 9_999, 10_000, 10_001, 99_999, 100_000, 999_999];
        let labels: Vec<String> = indices.iter().map(|&i| node_label(i)).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
        assert!(node_label(9_999) < node_label(10_000));
    }

    #[test]
    fn grid_edge_count() {
        let graph = generate_grid(4, 3).unwrap();
        assert_eq!(graph.node_count(), 12);
        // 3 * 3 horizontal + 4 * 2 vertical
        assert_eq!(graph.edge_count(), 17);
    }

    #[test]
    fn components_are_disjoint() {
        let mut rng = StdRng::seed_from_u64(11);
        let graph = generate_components(12, 3, &mut rng).unwrap();
        assert_eq!(graph.node_count(), 12);
        for (a, b, _) in graph.edges() {
            let index = |label: &str| label[1..].parse::<usize>().unwrap();
            assert_eq!(index(a) % 3, index(b) % 3);
        }
    }
}
