//! Query contracts against the canonical track store.
//!
//! The store itself — a spatial database in production, an in-memory
//! structure in tests — is owned outside the search. The search only
//! needs the three lazy query patterns below, so implementations can be
//! substituted freely.

use geo::{LineString, Point};

use crate::{EdgeId, NodeId};

/// An edge passing within the snap radius of a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyEdge {
    pub edge: EdgeId,
    pub length: f64,
    pub node_a: NodeId,
    pub node_b: NodeId,
    /// Closest approach of the shape to the query point, as a fraction
    /// from 0 (`node_a`) to 1 (`node_b`).
    pub fraction: f64,
}

/// An edge touching a queried node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidentEdge {
    pub edge: EdgeId,
    pub length: f64,
    /// The node at the far end of the edge.
    pub other: NodeId,
    /// Position of the queried node on the shape: 0.0 at `node_a`, 1.0
    /// at `node_b`.
    pub from_fraction: f64,
}

/// Read-only access to the canonical path records.
///
/// All methods are pure lookups; concurrent queries may share one store.
pub trait GraphStore {
    /// Edges whose shape passes within `radius` of `point`, each
    /// reported once.
    fn edges_near(&self, point: Point<f64>, radius: f64) -> Vec<NearbyEdge>;

    /// Edges touching `node`. Unknown nodes yield an empty list.
    fn edges_at(&self, node: NodeId) -> Vec<IncidentEdge>;

    /// The shape of an edge, ordered from `node_a` to `node_b`.
    fn shape_of(&self, edge: EdgeId) -> Option<LineString<f64>>;
}

/// Lookup of station names against a station gazetteer.
pub trait StationRegistry {
    fn resolve(&self, name: &str) -> Option<Point<f64>>;
}
