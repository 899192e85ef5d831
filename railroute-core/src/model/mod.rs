//! Data model for the rail track network
//!
//! Contains the canonical edge record plus the in-memory store
//! implementations used for testing and embedded deployments.

pub mod components;
pub mod network;
pub mod stations;

pub use components::TrackEdge;
pub use network::TrackNetwork;
pub use stations::StationIndex;
