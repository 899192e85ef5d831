//! Shortest-route search over a rail track network.
//!
//! The network is a sparse graph of canonical non-branching track
//! segments ("paths"), each with a known real-world length and geographic
//! shape. Queries name two endpoints — literal coordinates or station
//! names — which are snapped onto nearby track, joined by a generalized
//! Dijkstra search between synthetic origin and destination sentinels,
//! and turned back into one continuous route polyline.
//!
//! Graph construction and persistence are external concerns: the search
//! pulls edges lazily through the [`store::GraphStore`] trait, and
//! [`model::TrackNetwork`] provides the in-memory implementation.

pub mod error;
pub mod geometry;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod store;

pub use error::Error;

pub use model::{StationIndex, TrackEdge, TrackNetwork};
pub use routing::{Route, RoutingConfig, find_route};
pub use store::{GraphStore, IncidentEdge, NearbyEdge, StationRegistry};

/// Identifier of a junction node in the canonical store.
pub type NodeId = i64;

/// Identifier of a canonical non-branching track segment.
pub type EdgeId = i64;

/// Edges passing within this distance of an endpoint are considered
/// valid start/end positions for a route.
pub const DEFAULT_SNAP_RADIUS: f64 = 80.0;
