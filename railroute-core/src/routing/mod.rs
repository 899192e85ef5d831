//! Shortest-route search between two snapped endpoints

pub(crate) mod dijkstra;
pub(crate) mod reconstruct;
pub(crate) mod resolver;
mod route;

pub use route::{Route, RoutingConfig, find_route};
