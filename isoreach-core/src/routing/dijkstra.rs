use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::{Seconds, model::RoadNetwork};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: Seconds,
    node: NodeIndex,
}

// Costs are finite non-negative floats, so total_cmp is a total order
impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap)
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm over the road network.
///
/// Returns the minimum cumulative travel time in seconds from `start` to
/// every reachable node; nodes with no path from `start` are absent from
/// the map. With `max_cost` set, expansion stops past that cost: nodes
/// settled at or below `max_cost` keep exact times, anything beyond is
/// either absent or carries a time greater than `max_cost`.
pub fn travel_times_from(
    network: &RoadNetwork,
    start: NodeIndex,
    max_cost: Option<Seconds>,
) -> HashMap<NodeIndex, Seconds> {
    let mut distances: HashMap<NodeIndex, Seconds> = HashMap::new();
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }

        // Edge weights are non-negative, nothing past max_cost can
        // lead back under it
        if let Some(max) = max_cost
            && cost > max
        {
            continue;
        }

        // Examine neighbors
        for edge in network.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().travel_time;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}
