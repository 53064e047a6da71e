use dijkstra_stepper::graph::generators::{
    demo_graph, generate_random_connected, node_label, DEMO_END, DEMO_START,
};
use dijkstra_stepper::graph::{Graph, UndirectedGraph};
use dijkstra_stepper::{FrontierMode, RunSummary, StepEngine, Weight};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

type Distances = BTreeMap<String, Weight>;

// Runs one mode to completion and returns its final distances and summary
fn run_mode(
    graph: &UndirectedGraph<Weight>,
    start: &str,
    end: &str,
    mode: FrontierMode,
) -> Result<(Distances, Option<Vec<String>>, RunSummary), Box<dyn std::error::Error>> {
    let mut engine = StepEngine::new(graph, start, end)?;
    engine.begin(mode)?;
    let result = engine.run_to_completion()?;
    let summary = result
        .summary
        .ok_or("run did not finish within |V| + 1 steps")?;
    Ok((engine.distances().clone(), engine.current_path(), summary))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=====================================================");
    println!("Demo graph: {} -> {}", DEMO_START, DEMO_END);
    println!("=====================================================");

    let demo = demo_graph()?;
    for mode in FrontierMode::ALL {
        let (_, path, summary) = run_mode(&demo, DEMO_START, DEMO_END, mode)?;
        let path = path.map_or_else(|| "unreachable".to_string(), |path| path.join(" -> "));
        println!(
            "{:<12} | path {:<22} | {} steps | {} relaxations | {} stale | {:.3} ms",
            mode.label(),
            path,
            summary.steps,
            summary.relaxations,
            summary.stale_discarded,
            summary.elapsed_millis()
        );
    }

    // Define graph sizes to test
    let graph_sizes = vec![100, 500, 1_000, 2_000];
    let extra_edges_per_node = 2;
    let mut rng = StdRng::seed_from_u64(42);
    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random connected graph with {} nodes...", size);
        let graph = generate_random_connected(size, size * extra_edges_per_node, &mut rng)?;
        let start = node_label(0);
        let end = node_label(size - 1);
        println!("Graph has {} nodes and {} edges", graph.node_count(), graph.edge_count());

        let (heap_distances, _, heap) = run_mode(&graph, &start, &end, FrontierMode::PriorityQueue)?;
        let (scan_distances, _, scan) = run_mode(&graph, &start, &end, FrontierMode::LinearScan)?;

        // Only the target is compared; nodes past it may still be tentative
        let agree = heap.reachable == scan.reachable
            && heap_distances.get(&end) == scan_distances.get(&end);
        if !agree {
            println!("  !! modes disagree on the distance to {}", end);
        }

        results.push((size, heap, scan, agree));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<8} | {:<12} | {:<12} | {:<10} | {:<10} | {:<6}",
        "Nodes", "Heap (ms)", "Scan (ms)", "Heap stale", "Speedup", "Agree"
    );
    println!("-----------------------------------------------------");
    for (size, heap, scan, agree) in &results {
        let speedup = scan.elapsed.as_secs_f64() / heap.elapsed.as_secs_f64().max(f64::EPSILON);
        println!(
            "{:<8} | {:<12.3} | {:<12.3} | {:<10} | {:<10.2} | {:<6}",
            size,
            heap.elapsed_millis(),
            scan.elapsed_millis(),
            heap.stale_discarded,
            speedup,
            agree
        );
    }

    Ok(())
}
