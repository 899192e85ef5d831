//! In-memory track network with a spatial index
//!
//! Adjacency lives in an undirected petgraph graph; the radius query is
//! answered from an R-tree over the individual shape segments. This is
//! the substitutable [`GraphStore`] used by tests and embedded callers —
//! production deployments back the same trait with a spatial database.

use geo::{LineLocatePoint, LineString, Point};
use hashbrown::{HashMap, HashSet};
use log::info;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use rstar::RTree;
use rstar::primitives::{GeomWithData, Line};

use crate::model::TrackEdge;
use crate::store::{GraphStore, IncidentEdge, NearbyEdge};
use crate::{EdgeId, Error, NodeId};

type ShapeSegment = GeomWithData<Line<[f64; 2]>, EdgeId>;

/// In-memory graph store over a set of canonical track edges.
pub struct TrackNetwork {
    graph: UnGraph<NodeId, TrackEdge>,
    nodes: HashMap<NodeId, NodeIndex>,
    edges: HashMap<EdgeId, EdgeIndex>,
    spatial: RTree<ShapeSegment>,
}

impl TrackNetwork {
    /// Builds the network from canonical edge records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for a negative or non-finite
    /// length, endpoints out of canonical order, a shape with fewer than
    /// two points, or a duplicate edge id.
    pub fn from_edges(track_edges: Vec<TrackEdge>) -> Result<Self, Error> {
        let mut graph = UnGraph::new_undirected();
        let mut nodes: HashMap<NodeId, NodeIndex> = HashMap::new();
        let mut edges: HashMap<EdgeId, EdgeIndex> = HashMap::with_capacity(track_edges.len());
        let mut segments: Vec<ShapeSegment> = Vec::new();

        for edge in track_edges {
            validate_edge(&edge)?;

            let a = *nodes
                .entry(edge.node_a)
                .or_insert_with(|| graph.add_node(edge.node_a));
            let b = *nodes
                .entry(edge.node_b)
                .or_insert_with(|| graph.add_node(edge.node_b));

            for pair in edge.shape.0.windows(2) {
                segments.push(GeomWithData::new(
                    Line::new([pair[0].x, pair[0].y], [pair[1].x, pair[1].y]),
                    edge.id,
                ));
            }

            let id = edge.id;
            let index = graph.add_edge(a, b, edge);
            if edges.insert(id, index).is_some() {
                return Err(Error::InvalidData(format!("Duplicate edge id {id}")));
            }
        }

        info!(
            "Indexed {} track edges between {} nodes",
            edges.len(),
            nodes.len()
        );

        Ok(Self {
            graph,
            nodes,
            edges,
            spatial: RTree::bulk_load(segments),
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

fn validate_edge(edge: &TrackEdge) -> Result<(), Error> {
    if !edge.length.is_finite() || edge.length < 0.0 {
        return Err(Error::InvalidData(format!(
            "Edge {} has invalid length {}",
            edge.id, edge.length
        )));
    }
    if edge.node_a >= edge.node_b {
        return Err(Error::InvalidData(format!(
            "Edge {} endpoints are not in canonical order",
            edge.id
        )));
    }
    if edge.shape.0.len() < 2 {
        return Err(Error::InvalidData(format!(
            "Edge {} has a degenerate shape",
            edge.id
        )));
    }
    Ok(())
}

impl GraphStore for TrackNetwork {
    fn edges_near(&self, point: Point<f64>, radius: f64) -> Vec<NearbyEdge> {
        let mut seen: HashSet<EdgeId> = HashSet::new();
        let mut found = Vec::new();

        for segment in self
            .spatial
            .locate_within_distance([point.x(), point.y()], radius * radius)
        {
            if !seen.insert(segment.data) {
                continue;
            }
            let edge = &self.graph[self.edges[&segment.data]];
            let Some(fraction) = edge.shape.line_locate_point(&point) else {
                continue;
            };
            found.push(NearbyEdge {
                edge: edge.id,
                length: edge.length,
                node_a: edge.node_a,
                node_b: edge.node_b,
                fraction,
            });
        }

        found
    }

    fn edges_at(&self, node: NodeId) -> Vec<IncidentEdge> {
        let Some(&index) = self.nodes.get(&node) else {
            return Vec::new();
        };

        self.graph
            .edges(index)
            .map(|edge_ref| {
                let edge = edge_ref.weight();
                let (other, from_fraction) = if edge.node_a == node {
                    (edge.node_b, 0.0)
                } else {
                    (edge.node_a, 1.0)
                };
                IncidentEdge {
                    edge: edge.id,
                    length: edge.length,
                    other,
                    from_fraction,
                }
            })
            .collect()
    }

    fn shape_of(&self, edge: EdgeId) -> Option<LineString<f64>> {
        self.edges.get(&edge).map(|&index| self.graph[index].shape.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    fn edge(id: EdgeId, node_a: NodeId, node_b: NodeId, length: f64) -> TrackEdge {
        let offset = id as f64 * 100.0;
        TrackEdge {
            id,
            node_a,
            node_b,
            length,
            shape: line_string![(x: offset, y: 0.0), (x: offset + length, y: 0.0)],
        }
    }

    #[test]
    fn rejects_negative_length() {
        let mut bad = edge(1, 1, 2, 50.0);
        bad.length = -1.0;
        assert!(matches!(
            TrackNetwork::from_edges(vec![bad]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn rejects_non_canonical_endpoint_order() {
        assert!(matches!(
            TrackNetwork::from_edges(vec![edge(1, 2, 1, 50.0)]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn rejects_duplicate_edge_ids() {
        assert!(matches!(
            TrackNetwork::from_edges(vec![edge(1, 1, 2, 50.0), edge(1, 2, 3, 50.0)]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn radius_query_reports_each_edge_once_with_fraction() {
        let network = TrackNetwork::from_edges(vec![TrackEdge {
            id: 1,
            node_a: 1,
            node_b: 2,
            length: 100.0,
            shape: line_string![(x: 0.0, y: 0.0), (x: 50.0, y: 0.0), (x: 100.0, y: 0.0)],
        }])
        .unwrap();

        let nearby = network.edges_near(Point::new(25.0, 3.0), 10.0);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].edge, 1);
        assert!((nearby[0].fraction - 0.25).abs() < 1e-12);

        assert!(network.edges_near(Point::new(25.0, 30.0), 10.0).is_empty());
    }

    #[test]
    fn incident_edges_carry_the_entry_fraction() {
        let network =
            TrackNetwork::from_edges(vec![edge(1, 1, 2, 100.0), edge(2, 2, 3, 100.0)]).unwrap();

        let incident = network.edges_at(2);
        assert_eq!(incident.len(), 2);
        for entry in incident {
            match entry.edge {
                1 => {
                    assert_eq!(entry.other, 1);
                    assert_eq!(entry.from_fraction, 1.0);
                }
                2 => {
                    assert_eq!(entry.other, 3);
                    assert_eq!(entry.from_fraction, 0.0);
                }
                other => panic!("unexpected edge {other}"),
            }
        }

        assert!(network.edges_at(99).is_empty());
    }
}
