//! Route geometry assembly from the settled search state

use geo::{Coord, LineString};

use crate::Error;
use crate::geometry::line_substring;
use crate::routing::dijkstra::{SearchOutcome, SearchVertex};
use crate::store::GraphStore;

/// Walks the predecessor chain back from the destination sentinel and
/// stitches the travelled portion of each edge shape into one polyline
/// running origin to destination.
///
/// # Errors
///
/// [`Error::RouteReconstruction`] when the chain is broken, cyclic, or
/// references an edge the store no longer knows.
pub(crate) fn assemble_route<S: GraphStore + ?Sized>(
    store: &S,
    outcome: &SearchOutcome,
) -> Result<LineString<f64>, Error> {
    let mut parts: Vec<LineString<f64>> = Vec::new();
    let mut current = SearchVertex::Destination;
    let mut steps_taken = 0usize;

    loop {
        let step = outcome.steps.get(&current).ok_or_else(|| {
            Error::RouteReconstruction(format!("predecessor chain broken at {current:?}"))
        })?;
        // A chain longer than the settled set can only mean a cycle
        steps_taken += 1;
        if steps_taken > outcome.settled_count {
            return Err(Error::RouteReconstruction(
                "predecessor chain does not terminate".to_string(),
            ));
        }

        // Equal fractions mean a zero-length traversal; emitting a
        // single-point segment would corrupt the merged geometry.
        if step.start_fraction != step.end_fraction {
            let shape = store.shape_of(step.edge).ok_or_else(|| {
                Error::RouteReconstruction(format!("no shape for edge {}", step.edge))
            })?;
            // The slicing primitive only runs forward; a backward
            // traversal slices the forward range and reverses the points.
            let part = if step.start_fraction <= step.end_fraction {
                line_substring(&shape, step.start_fraction, step.end_fraction)
            } else {
                let mut part = line_substring(&shape, step.end_fraction, step.start_fraction);
                part.0.reverse();
                part
            };
            parts.push(part);
        }

        match step.predecessor {
            SearchVertex::Origin => break,
            predecessor => current = predecessor,
        }
    }

    // Collected destination-first; flip to origin -> destination and
    // merge, dropping coincident joint coordinates.
    parts.reverse();
    let mut coords: Vec<Coord<f64>> = Vec::new();
    for part in parts {
        for coord in part.0 {
            if coords.last() != Some(&coord) {
                coords.push(coord);
            }
        }
    }

    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrackEdge, TrackNetwork};
    use crate::routing::dijkstra::RouteStep;
    use geo::line_string;
    use hashbrown::HashMap;

    fn single_edge_network() -> TrackNetwork {
        TrackNetwork::from_edges(vec![TrackEdge {
            id: 1,
            node_a: 1,
            node_b: 2,
            length: 100.0,
            shape: line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0)],
        }])
        .unwrap()
    }

    fn outcome_with(steps: Vec<(SearchVertex, RouteStep)>, settled_count: usize) -> SearchOutcome {
        SearchOutcome {
            steps: steps.into_iter().collect::<HashMap<_, _>>(),
            settled_count,
            total_distance: 0.0,
        }
    }

    #[test]
    fn backward_traversal_reverses_the_forward_slice() {
        let network = single_edge_network();

        let backward = outcome_with(
            vec![(
                SearchVertex::Destination,
                RouteStep {
                    predecessor: SearchVertex::Origin,
                    edge: 1,
                    start_fraction: 0.8,
                    end_fraction: 0.2,
                },
            )],
            1,
        );
        let forward = outcome_with(
            vec![(
                SearchVertex::Destination,
                RouteStep {
                    predecessor: SearchVertex::Origin,
                    edge: 1,
                    start_fraction: 0.2,
                    end_fraction: 0.8,
                },
            )],
            1,
        );

        let mut expected = assemble_route(&network, &forward).unwrap();
        expected.0.reverse();
        assert_eq!(assemble_route(&network, &backward).unwrap(), expected);
    }

    #[test]
    fn degenerate_steps_contribute_no_points() {
        let network = single_edge_network();
        let outcome = outcome_with(
            vec![(
                SearchVertex::Destination,
                RouteStep {
                    predecessor: SearchVertex::Origin,
                    edge: 1,
                    start_fraction: 0.5,
                    end_fraction: 0.5,
                },
            )],
            1,
        );

        let geometry = assemble_route(&network, &outcome).unwrap();
        assert!(geometry.0.is_empty());
    }

    #[test]
    fn broken_chain_is_reported() {
        let network = single_edge_network();
        let outcome = outcome_with(Vec::new(), 1);
        assert!(matches!(
            assemble_route(&network, &outcome),
            Err(Error::RouteReconstruction(_))
        ));
    }

    #[test]
    fn cyclic_chain_is_detected() {
        let network = single_edge_network();
        // Degenerate fractions keep the walk away from shape lookups.
        let step = |predecessor| RouteStep {
            predecessor,
            edge: 1,
            start_fraction: 0.0,
            end_fraction: 0.0,
        };
        let outcome = outcome_with(
            vec![
                (SearchVertex::Destination, step(SearchVertex::Node(1))),
                (SearchVertex::Node(1), step(SearchVertex::Node(2))),
                (SearchVertex::Node(2), step(SearchVertex::Node(1))),
            ],
            3,
        );

        assert!(matches!(
            assemble_route(&network, &outcome),
            Err(Error::RouteReconstruction(message)) if message.contains("terminate")
        ));
    }
}
