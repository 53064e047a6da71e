use dijkstra_stepper::graph::generators::{
    generate_components, generate_random_connected, node_label,
};
use dijkstra_stepper::graph::{Graph, UndirectedGraph};
use dijkstra_stepper::{FrontierMode, RunState, StepEngine, Weight};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

// Steps a fresh run to the end, checking the per-step invariants along the way
fn run_checked(
    graph: &UndirectedGraph<Weight>,
    start: &str,
    end: &str,
    mode: FrontierMode,
) -> (BTreeMap<String, Weight>, Vec<String>, Option<Vec<String>>, bool) {
    let mut engine = StepEngine::new(graph, start, end).unwrap();
    engine.begin(mode).unwrap();

    let mut previous = engine.snapshot();
    let mut steps = 0;
    loop {
        let result = engine.step();
        steps += 1;
        let snapshot = &result.snapshot;

        for (node, distance) in &snapshot.distances {
            let before = previous.distances[node];
            assert!(*distance <= before, "{} grew from {:?} to {:?}", node, before, distance);
            if previous.visited.contains(node) {
                assert_eq!(*distance, before, "settled node {} changed", node);
            }
        }

        let grown = snapshot.visited.len() - previous.visited.len();
        if result.finished() {
            assert!(grown <= 1);
        } else {
            assert_eq!(grown, 1, "a running step settles exactly one node");
        }
        assert!(previous.visited.is_subset(&snapshot.visited));

        previous = result.snapshot.clone();
        if result.finished() {
            assert!(steps <= graph.node_count(), "took {} steps", steps);
            assert_eq!(engine.state(), RunState::Finished);
            let reachable = result.reachable();
            return (
                engine.distances().clone(),
                engine.snapshot().settle_order,
                engine.current_path(),
                reachable,
            );
        }
    }
}

fn path_cost(graph: &UndirectedGraph<Weight>, path: &[String]) -> f64 {
    path.windows(2)
        .map(|pair| graph.edge_weight(&pair[0], &pair[1]).unwrap().into_inner())
        .sum()
}

#[test]
fn test_modes_agree_on_random_connected_graphs() {
    let mut rng = StdRng::seed_from_u64(2024);

    for round in 0..40 {
        let n = rng.gen_range(2..60);
        let graph = generate_random_connected(n, rng.gen_range(0..2 * n), &mut rng).unwrap();
        let start = node_label(rng.gen_range(0..n));
        let end = node_label(rng.gen_range(0..n));

        let (heap_dist, heap_order, heap_path, heap_reach) =
            run_checked(&graph, &start, &end, FrontierMode::PriorityQueue);
        let (scan_dist, scan_order, scan_path, scan_reach) =
            run_checked(&graph, &start, &end, FrontierMode::LinearScan);

        assert!(heap_reach && scan_reach, "round {}: connected graph", round);
        assert_eq!(heap_dist, scan_dist, "round {}: distance tables", round);
        // Same (distance, identifier) tie-break in both modes
        assert_eq!(heap_order, scan_order, "round {}: settle order", round);

        let heap_path = heap_path.unwrap();
        let scan_path = scan_path.unwrap();
        assert_eq!(heap_path.first(), Some(&start));
        assert_eq!(heap_path.last(), Some(&end));
        assert_eq!(path_cost(&graph, &heap_path), heap_dist[&end].into_inner());
        assert_eq!(path_cost(&graph, &scan_path), path_cost(&graph, &heap_path));
    }
}

#[test]
fn test_modes_agree_on_disconnected_graphs() {
    let mut rng = StdRng::seed_from_u64(99);

    for round in 0..20 {
        let n = rng.gen_range(6..40);
        let graph = generate_components(n, 3, &mut rng).unwrap();
        // Node i sits in component i % 3
        let start = node_label(0);
        let end = node_label(1);

        let (heap_dist, _, heap_path, heap_reach) =
            run_checked(&graph, &start, &end, FrontierMode::PriorityQueue);
        let (scan_dist, _, scan_path, scan_reach) =
            run_checked(&graph, &start, &end, FrontierMode::LinearScan);

        assert!(!heap_reach && !scan_reach, "round {}", round);
        assert_eq!(heap_path, None);
        assert_eq!(scan_path, None);
        assert!(heap_dist[&end].into_inner().is_infinite());
        assert_eq!(heap_dist, scan_dist, "round {}", round);
    }
}

#[test]
fn test_settled_distances_are_final() {
    let mut rng = StdRng::seed_from_u64(5);
    let graph = generate_random_connected(30, 45, &mut rng).unwrap();
    let start = node_label(0);
    let end = node_label(29);

    for mode in FrontierMode::ALL {
        let mut engine = StepEngine::new(&graph, &start, &end).unwrap();
        engine.begin(mode).unwrap();
        let mut settled_at: BTreeMap<String, Weight> = BTreeMap::new();

        loop {
            let result = engine.step();
            if let Some(node) = &result.settled {
                settled_at.insert(node.clone(), result.snapshot.distances[node]);
            }
            if result.finished() {
                break;
            }
        }

        // Every settled distance is no larger than any one-edge detour through a settled node
        for (node, distance) in &settled_at {
            for (neighbor, weight) in graph.neighbors(node).unwrap() {
                if let Some(other) = settled_at.get(neighbor) {
                    assert!(*distance <= *other + weight, "{} via {}", node, neighbor);
                }
            }
        }
    }
}
