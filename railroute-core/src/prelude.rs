pub use crate::DEFAULT_SNAP_RADIUS;

// Re-export key components
pub use crate::error::Error;
pub use crate::model::{StationIndex, TrackEdge, TrackNetwork};
pub use crate::routing::{Route, RoutingConfig, find_route};
pub use crate::store::{GraphStore, IncidentEdge, NearbyEdge, StationRegistry};

// Identifier types of the canonical store
pub use crate::EdgeId;
pub use crate::NodeId;
