use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::network::{AdjacencyTable, AirportId};

/// Run Dijkstra's algorithm over route distances from `start` to `goal`.
///
/// Every outbound edge of a settled airport enters the frontier, so parallel
/// edges all compete. The first time an airport is popped it is settled and
/// later arrivals are ignored. Equal cumulative distances pop in insertion
/// order, which makes the earliest edge in adjacency order win a tie.
///
/// Returns the airport ids from `start` to `goal` inclusive.
pub fn find_route_dijkstra(
    adjacency: &AdjacencyTable,
    start: AirportId,
    goal: AirportId,
) -> Option<Vec<AirportId>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut settled: HashSet<AirportId> = HashSet::new();
    let mut parents: HashMap<AirportId, AirportId> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0_u64;

    settled.insert(start);
    push_edges(adjacency, start, 0.0, &mut queue, &mut sequence);

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }
        parents.insert(entry.node, entry.parent);

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        push_edges(adjacency, entry.node, entry.cost.0, &mut queue, &mut sequence);
    }

    None
}

fn push_edges(
    adjacency: &AdjacencyTable,
    from: AirportId,
    cost: f64,
    queue: &mut BinaryHeap<QueueEntry>,
    sequence: &mut u64,
) {
    for edge in adjacency.neighbours(from) {
        queue.push(QueueEntry {
            node: edge.destination,
            parent: from,
            cost: FloatOrd(cost + edge.distance),
            sequence: *sequence,
        });
        *sequence += 1;
    }
}

fn reconstruct_path(
    parents: &HashMap<AirportId, AirportId>,
    start: AirportId,
    goal: AirportId,
) -> Vec<AirportId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: AirportId,
    parent: AirportId,
    cost: FloatOrd,
    sequence: u64,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then FIFO.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
