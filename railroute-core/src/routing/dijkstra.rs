//! Generalized Dijkstra between two anchor sets
//!
//! Both query endpoints are sets of weighted anchors rather than single
//! zero-distance nodes: origin anchors seed the frontier with their
//! along-track distances, while destination anchors form a lookup table
//! consulted whenever a real node settles. The destination itself is a
//! synthetic sentinel vertex reachable only through that table (or
//! directly along an edge both endpoints share).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use log::trace;

use crate::routing::resolver::AnchorSet;
use crate::store::GraphStore;
use crate::{EdgeId, Error, NodeId};

/// Vertex of the search graph: real junctions plus the two synthetic
/// sentinels. Sentinels are variants rather than reserved id values so
/// they can never collide with store identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SearchVertex {
    Node(NodeId),
    Origin,
    Destination,
}

/// How the search entered a vertex: the predecessor and the portion of
/// the predecessor edge's shape the final geometry must use. Fractions
/// are 0 or 1 except at the two ends of the route, where the
/// resolver-computed contact fraction applies.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RouteStep {
    pub predecessor: SearchVertex,
    pub edge: EdgeId,
    pub start_fraction: f64,
    pub end_fraction: f64,
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    vertex: SearchVertex,
}

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

/// Approach to the destination point recorded against a real node.
#[derive(Debug, Clone, Copy)]
struct DestinationApproach {
    distance: f64,
    edge: EdgeId,
    endpoint_fraction: f64,
    point_fraction: f64,
}

/// Mutable state of one search invocation. Nothing here is shared
/// across queries or outlives the query that created it.
struct SearchState {
    distances: HashMap<SearchVertex, f64>,
    steps: HashMap<SearchVertex, RouteStep>,
    settled: HashSet<SearchVertex>,
    heap: BinaryHeap<State>,
}

impl SearchState {
    fn new() -> Self {
        Self {
            distances: HashMap::new(),
            steps: HashMap::new(),
            settled: HashSet::new(),
            heap: BinaryHeap::new(),
        }
    }

    /// Records a tentative distance iff it strictly improves on what is
    /// already known for the vertex.
    fn record(&mut self, vertex: SearchVertex, distance: f64, step: RouteStep) {
        match self.distances.entry(vertex) {
            hashbrown::hash_map::Entry::Vacant(entry) => {
                entry.insert(distance);
                self.steps.insert(vertex, step);
                self.heap.push(State {
                    cost: distance,
                    vertex,
                });
            }
            hashbrown::hash_map::Entry::Occupied(mut entry) => {
                if distance < *entry.get() {
                    *entry.get_mut() = distance;
                    self.steps.insert(vertex, step);
                    self.heap.push(State {
                        cost: distance,
                        vertex,
                    });
                }
            }
        }
    }
}

/// Everything reconstruction needs from a successful search.
pub(crate) struct SearchOutcome {
    pub steps: HashMap<SearchVertex, RouteStep>,
    pub settled_count: usize,
    pub total_distance: f64,
}

/// Runs the search, pulling edges lazily from the store as nodes settle.
///
/// # Errors
///
/// [`Error::RouteNotFound`] when the frontier is exhausted before the
/// destination sentinel settles.
pub(crate) fn run_search<S: GraphStore + ?Sized>(
    store: &S,
    origin: &AnchorSet,
    destination: &AnchorSet,
) -> Result<SearchOutcome, Error> {
    let mut state = SearchState::new();

    for anchor in &origin.anchors {
        state.record(
            SearchVertex::Node(anchor.node),
            anchor.distance,
            RouteStep {
                predecessor: SearchVertex::Origin,
                edge: anchor.edge,
                start_fraction: anchor.point_fraction,
                end_fraction: anchor.endpoint_fraction,
            },
        );
    }

    // Destination anchors are consulted as nodes settle, never pushed
    // into the frontier themselves. Dedupe per node by minimum distance,
    // matching the origin side.
    let mut approaches: HashMap<NodeId, DestinationApproach> = HashMap::new();
    for anchor in &destination.anchors {
        let candidate = DestinationApproach {
            distance: anchor.distance,
            edge: anchor.edge,
            endpoint_fraction: anchor.endpoint_fraction,
            point_fraction: anchor.point_fraction,
        };
        approaches
            .entry(anchor.node)
            .and_modify(|current| {
                if candidate.distance < current.distance {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    // Both endpoints may land on the same edge; the along-edge distance
    // between the two contact points then competes with every route
    // through a real junction.
    for (edge, from) in &origin.contacts {
        if let Some(to) = destination.contacts.get(edge) {
            state.record(
                SearchVertex::Destination,
                (from.fraction - to.fraction).abs() * from.length,
                RouteStep {
                    predecessor: SearchVertex::Origin,
                    edge: *edge,
                    start_fraction: from.fraction,
                    end_fraction: to.fraction,
                },
            );
        }
    }

    while let Some(State { cost, vertex }) = state.heap.pop() {
        if state.settled.contains(&vertex) {
            continue;
        }
        // Stale heap entry superseded by a later improvement
        if state.distances.get(&vertex).is_some_and(|&best| cost > best) {
            continue;
        }
        state.settled.insert(vertex);

        if vertex == SearchVertex::Destination {
            trace!("destination settled {cost} units from origin");
            return Ok(SearchOutcome {
                steps: state.steps,
                settled_count: state.settled.len(),
                total_distance: cost,
            });
        }
        let SearchVertex::Node(node) = vertex else {
            continue;
        };
        trace!("following edges from node {node}, {cost} units from origin");

        for incident in store.edges_at(node) {
            let neighbour = SearchVertex::Node(incident.other);
            if state.settled.contains(&neighbour) {
                continue;
            }
            state.record(
                neighbour,
                cost + incident.length,
                RouteStep {
                    predecessor: vertex,
                    edge: incident.edge,
                    start_fraction: incident.from_fraction,
                    end_fraction: 1.0 - incident.from_fraction,
                },
            );
        }

        if let Some(approach) = approaches.get(&node) {
            state.record(
                SearchVertex::Destination,
                cost + approach.distance,
                RouteStep {
                    predecessor: vertex,
                    edge: approach.edge,
                    start_fraction: approach.endpoint_fraction,
                    end_fraction: approach.point_fraction,
                },
            );
        }
    }

    Err(Error::RouteNotFound)
}
